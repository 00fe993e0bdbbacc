/// Listing columns as returned by the housing query. Any value may be NULL
/// in the crawl, so everything stays optional until clustering filters it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListingPoints {
    pub urls: Vec<Option<String>>,
    pub lons: Vec<Option<f64>>,
    pub lats: Vec<Option<f64>>,
    pub prices: Vec<Option<f64>>,
}

impl ListingPoints {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// One row of the bedroom/bathroom price summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummaryRow {
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// A single (crawl month, price) observation for the monthly box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPrice {
    pub month: String,
    pub price: f64,
}

/// A crawled listing ready to be inserted into `city_housing`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub crawled_date: String,
    pub address: Option<String>,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub bathrooms: Option<f64>,
    pub bedrooms: Option<f64>,
    pub days_posted: Option<i64>,
    pub url: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city_id: i64,
}

/// Formats a price the way the summary table shows it, e.g. `$512.3k`.
pub fn format_thousands(price: f64) -> String {
    format!("${:.1}k", price / 1000.0)
}

/// Median of a non-empty slice; the mean of the two middle values for even sizes.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
