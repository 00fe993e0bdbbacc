pub mod connection;
pub mod housing;
pub mod layout;
pub mod query_builder;

pub use connection::{init_db, Database};
