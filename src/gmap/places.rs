// src/gmap/places.rs

use crate::domain::city::City;
use crate::domain::landmark::{Landmark, LandmarkType};
use crate::errors::ServerError;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

pub const DEFAULT_RADIUS_M: u32 = 5000;
pub const DEFAULT_MAX_PAGES: usize = 5;

#[derive(Debug, Deserialize)]
pub struct NearbyResponse {
    #[serde(default)]
    pub results: Vec<Place>,
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Place {
    pub name: String,
    pub geometry: Geometry,
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Landmarks keyed by name. Nearby searches around close-by towns overlap,
/// so a later hit for the same name replaces the earlier one.
pub type LandmarkMap = BTreeMap<String, Landmark>;

/// Adds one page of results to `acc`.
pub fn merge_page(acc: &mut LandmarkMap, page: &NearbyResponse, kind: LandmarkType, city: &City) {
    for place in &page.results {
        acc.insert(
            place.name.clone(),
            Landmark {
                name: place.name.clone(),
                kind,
                lat: place.geometry.location.lat,
                lng: place.geometry.location.lng,
                rating: place.rating.unwrap_or(0.0),
                city_id: city.id,
            },
        );
    }
}

pub struct GmapClient {
    client: Client,
    api_key: String,
    radius_m: u32,
    max_pages: usize,
}

impl GmapClient {
    pub fn new(api_key: String) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ServerError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            radius_m: DEFAULT_RADIUS_M,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    fn nearby_page(
        &self,
        kind: LandmarkType,
        center: (f64, f64),
        page_token: Option<&str>,
    ) -> Result<NearbyResponse, ServerError> {
        let location = format!("{},{}", center.0, center.1);
        let radius = self.radius_m.to_string();
        let mut query = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", kind.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pagetoken", token));
        }

        let page: NearbyResponse = self
            .client
            .get(NEARBY_SEARCH_URL)
            .query(&query)
            .send()?
            .error_for_status()?
            .json()?;

        match page.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => Ok(page),
            Some(status) => Err(ServerError::Http(format!(
                "Places API returned {status}: {}",
                page.error_message.as_deref().unwrap_or("no message")
            ))),
        }
    }

    /// Fetches up to `max_pages` pages of one landmark type around a city
    /// and merges them into `acc`.
    pub fn fetch_gmap_data(
        &self,
        kind: LandmarkType,
        city: &City,
        acc: &mut LandmarkMap,
    ) -> Result<(), ServerError> {
        let mut token: Option<String> = None;
        for page_no in 1..=self.max_pages {
            if page_no > 1 {
                // Google needs a moment before a next_page_token becomes valid.
                std::thread::sleep(Duration::from_secs(2));
            }
            let page = self.nearby_page(kind, city.center, token.as_deref())?;
            log::debug!(
                "{} {} page {page_no}: {} results",
                city.name,
                kind.as_str(),
                page.results.len()
            );
            merge_page(acc, &page, kind, city);

            token = page.next_page_token;
            if token.is_none() {
                break;
            }
        }
        Ok(())
    }
}

/// Landmark types fetched for a city; subway stations only where there is a subway.
pub fn layout_types_for(city: &City) -> Vec<LandmarkType> {
    LandmarkType::ALL
        .into_iter()
        .filter(|t| *t != LandmarkType::SubwayStation || city.has_subway)
        .collect()
}
