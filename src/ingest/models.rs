use serde::Deserialize;

/// One row of a crawler CSV. Only the columns we keep are named; the crawler
/// writes many more and they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRow {
    pub crawled_month: Option<String>,

    #[serde(rename = "addressStreet")]
    pub address_street: Option<String>,

    #[serde(rename = "unformattedPrice", default, deserialize_with = "csv::invalid_option")]
    pub unformatted_price: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub area: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub baths: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub beds: Option<f64>,

    #[serde(rename = "detailUrl")]
    pub detail_url: Option<String>,

    /// Python-dict style string: `{'latitude': 40.35, 'longitude': -74.66}`.
    #[serde(rename = "latLong")]
    pub lat_long: Option<String>,

    /// Free text; carries the days-on-market badge when there is one.
    #[serde(rename = "variableData", default)]
    pub variable_data: Option<String>,
}

/// Decoded `latLong` column.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct LatLong {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
