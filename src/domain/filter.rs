// src/domain/filter.rs

use crate::errors::ServerError;
use std::collections::HashMap;

/// Per-request listing preferences. Built from the request's own query string
/// or form body and handed down to the queries; nothing is kept between requests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HousingFilter {
    /// Inclusive (min, max).
    pub bedrooms: Option<(u32, u32)>,
    /// Inclusive (min, max).
    pub bathrooms: Option<(u32, u32)>,
    pub max_days_posted: Option<u32>,
    /// Show price per square foot instead of the list price.
    pub price_per_area: bool,
}

impl HousingFilter {
    pub fn is_empty(&self) -> bool {
        self == &HousingFilter::default()
    }

    /// Reads `min_bedrooms`, `max_bedrooms`, `min_bathrooms`, `max_bathrooms`,
    /// `max_days` and `price_per_area`. Blank fields are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ServerError> {
        let bedrooms = range(params, "min_bedrooms", "max_bedrooms")?;
        let bathrooms = range(params, "min_bathrooms", "max_bathrooms")?;
        let max_days_posted = number(params, "max_days")?;
        let price_per_area = matches!(
            params.get("price_per_area").map(|s| s.trim()),
            Some("on" | "true" | "1" | "yes")
        );

        Ok(Self {
            bedrooms,
            bathrooms,
            max_days_posted,
            price_per_area,
        })
    }

    /// Query string that reproduces this filter, used to link between pages.
    pub fn to_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        if let Some((lo, hi)) = self.bedrooms {
            ser.append_pair("min_bedrooms", &lo.to_string());
            ser.append_pair("max_bedrooms", &hi.to_string());
        }
        if let Some((lo, hi)) = self.bathrooms {
            ser.append_pair("min_bathrooms", &lo.to_string());
            ser.append_pair("max_bathrooms", &hi.to_string());
        }
        if let Some(d) = self.max_days_posted {
            ser.append_pair("max_days", &d.to_string());
        }
        if self.price_per_area {
            ser.append_pair("price_per_area", "on");
        }
        ser.finish()
    }

    pub fn price_label(&self) -> &'static str {
        if self.price_per_area {
            "Price / sqft"
        } else {
            "Price"
        }
    }
}

fn number(params: &HashMap<String, String>, key: &str) -> Result<Option<u32>, ServerError> {
    match params.get(key).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{key} must be a whole number, got '{v}'"))),
    }
}

/// A one-sided range is open on the other side.
fn range(
    params: &HashMap<String, String>,
    min_key: &str,
    max_key: &str,
) -> Result<Option<(u32, u32)>, ServerError> {
    let lo = number(params, min_key)?;
    let hi = number(params, max_key)?;
    match (lo, hi) {
        (None, None) => Ok(None),
        (lo, hi) => {
            let lo = lo.unwrap_or(0);
            let hi = hi.unwrap_or(u32::MAX);
            if lo > hi {
                return Err(ServerError::BadRequest(format!(
                    "{min_key} ({lo}) is larger than {max_key} ({hi})"
                )));
            }
            Ok(Some((lo, hi)))
        }
    }
}
