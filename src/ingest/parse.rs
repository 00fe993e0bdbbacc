// src/ingest/parse.rs

use crate::ingest::models::LatLong;

/// Pulls latitude/longitude out of the crawler's dict-like string by swapping
/// single quotes for double quotes and reading it as JSON. Anything that does
/// not parse gives `(None, None)`.
pub fn parse_lat_long(raw: &str) -> (Option<f64>, Option<f64>) {
    let json = raw.replace('\'', "\"");
    match serde_json::from_str::<LatLong>(&json) {
        Ok(ll) => (ll.latitude, ll.longitude),
        Err(e) => {
            log::warn!("Unparseable latLong '{raw}': {e}");
            (None, None)
        }
    }
}

/// Days on market from the `variableData` column, e.g.
/// `{'type': 'DAYS_ON', 'text': '3 days on Zillow'}` gives `Some(3)`.
///
/// The value is the token after `text`, minus its leading quote.
pub fn parse_days_on_market(raw: &str) -> Option<i64> {
    if !raw.contains("DAYS_ON") {
        return None;
    }
    let idx = raw.find("text")?;
    let token = raw[idx..].split_whitespace().nth(1)?;
    let mut chars = token.chars();
    chars.next();
    chars.as_str().parse().ok()
}

/// City slug of a crawl file: everything before the month in the file name,
/// e.g. `seattle2022-11.csv` is `seattle`.
pub fn city_slug<'a>(file_name: &'a str, month: &str) -> &'a str {
    match file_name.find(month) {
        Some(idx) => file_name[..idx].trim_end_matches(&['_', '-'][..]),
        None => file_name.trim_end_matches(".csv"),
    }
}
