use crate::errors::ServerError;
use chrono::{Local, NaiveDate};

/// Current crawl month label, e.g. `2022-11`.
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Accepts `YYYY-MM` only. Crawl months compare as strings, so the
/// zero padding matters.
pub fn validate_month(month: &str) -> Result<String, ServerError> {
    let month = month.trim();
    let well_formed = month.len() == 7
        && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(month.to_string())
    } else {
        Err(ServerError::BadRequest(format!(
            "month must look like YYYY-MM, got '{month}'"
        )))
    }
}
