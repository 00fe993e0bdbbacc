mod models;
pub mod monthly;
pub mod parse;

pub use monthly::{update_db_monthly, IngestOutcome};
