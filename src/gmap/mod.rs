pub mod places;

pub use places::{layout_types_for, GmapClient, LandmarkMap};
