pub mod census;
pub mod kmeans;
pub mod stats;

pub use kmeans::{run_kmeans, ClusterResult};
