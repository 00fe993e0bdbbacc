pub mod card;
pub mod error;
pub mod filter_form;
pub mod plot;
pub mod tables;

pub use card::card;
pub use error::html_error_response;
pub use filter_form::filter_form;
pub use plot::plot;
pub use tables::{census_table, summary_table};
