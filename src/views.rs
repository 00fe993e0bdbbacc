// src/views.rs

use crate::analysis::census::get_census_data;
use crate::analysis::run_kmeans;
use crate::config::AppConfig;
use crate::db::Database;
use crate::db::housing::{analysis_query, get_housing, get_monthly_price};
use crate::db::layout::get_layout;
use crate::domain::city::{location_by_slug, Location};
use crate::domain::filter::HousingFilter;
use crate::domain::landmark::{LandmarkPoints, LandmarkType};
use crate::domain::month::{current_month, validate_month};
use crate::errors::ServerError;
use crate::figures::plotly::{
    cluster_trace, density_trace, landmark_trace, listing_scatter_trace, mapbox_layout,
    monthly_box_figure,
};
use crate::figures::Figure;
use crate::templates::pages::{
    city_stats_page, customize_page, graph_page, map_page, CustomizeVm, GraphVm, MapVm,
};
use maud::Markup;
use rusqlite::Connection;
use std::collections::HashMap;

/// Everything a request handler needs. Immutable and shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub mapbox_token: Option<String>,
}

/// Location, month and filter of one request.
struct MapRequest {
    location: &'static Location,
    month: String,
    filter: HousingFilter,
}

impl MapRequest {
    fn parse(
        state: &AppState,
        slug: &str,
        params: &HashMap<String, String>,
    ) -> Result<Self, ServerError> {
        let location = location_by_slug(slug).ok_or(ServerError::NotFound)?;
        let month = match params.get("month").filter(|m| !m.trim().is_empty()) {
            Some(m) => validate_month(m)?,
            None => match &state.config.month {
                Some(m) => validate_month(m)?,
                None => current_month(),
            },
        };
        let filter = HousingFilter::from_params(params)?;
        Ok(Self {
            location,
            month,
            filter,
        })
    }
}

/// Queries return `None` only when handed a city list of the wrong size.
fn require<T>(value: Option<T>) -> Result<T, ServerError> {
    value.ok_or_else(|| ServerError::BadRequest("invalid city selection".into()))
}

fn landmarks(
    conn: &Connection,
    cities: &[&str],
    kinds: &[LandmarkType],
) -> Result<LandmarkPoints, ServerError> {
    let mut all = LandmarkPoints::default();
    for kind in kinds {
        all.extend(require(get_layout(conn, *kind, cities)?)?);
    }
    Ok(all)
}

/// School, train, shop, hospital and subway overlays.
fn add_landmark_traces(
    fig: &mut Figure,
    conn: &Connection,
    cities: &[&str],
) -> Result<(), ServerError> {
    let overlays: [(&str, &str, u32, &[LandmarkType]); 5] = [
        ("School", "school", 10, &[LandmarkType::School]),
        ("Train", "rail", 20, &[LandmarkType::TrainStation]),
        (
            "Shop",
            "shop",
            10,
            &[LandmarkType::Supermarket, LandmarkType::ShoppingMall],
        ),
        ("Hospital", "hospital", 10, &[LandmarkType::Hospital]),
        ("Subway", "rail-metro", 10, &[LandmarkType::SubwayStation]),
    ];
    for (name, symbol, size, kinds) in overlays {
        let points = landmarks(conn, cities, kinds)?;
        log::debug!("{name} overlay: {} landmarks", points.len());
        // Only the subway overlay is dropped when empty; the NJ towns have none.
        if kinds.contains(&LandmarkType::SubwayStation) && points.is_empty() {
            continue;
        }
        fig.add_trace(landmark_trace(name, symbol, size, &points));
    }
    Ok(())
}

pub fn city_map(
    state: &AppState,
    slug: &str,
    params: &HashMap<String, String>,
) -> Result<Markup, ServerError> {
    let req = MapRequest::parse(state, slug, params)?;
    let cities = req.location.cities;

    state.db.with_conn(|conn| {
        let summary = require(analysis_query(conn, cities, &req.month, &req.filter)?)?;
        let listings = require(get_housing(conn, cities, &req.month, &req.filter)?)?;
        if listings.is_empty() {
            log::info!("No listings for {} in {}", req.location.slug, req.month);
        }

        let mut price_map = Figure::new(mapbox_layout(
            req.location.center,
            state.mapbox_token.as_deref(),
        ));
        price_map.add_trace(density_trace(&listings));
        add_landmark_traces(&mut price_map, conn, cities)?;

        let monthly = require(get_monthly_price(conn, cities, &req.month, true)?)?;

        Ok(map_page(&MapVm {
            location: req.location,
            month: req.month.clone(),
            listing_count: listings.len(),
            price_map,
            monthly_prices: monthly_box_figure(&monthly),
            summary,
        }))
    })
}

pub fn customize(
    state: &AppState,
    slug: &str,
    params: &HashMap<String, String>,
) -> Result<Markup, ServerError> {
    let req = MapRequest::parse(state, slug, params)?;
    let cities = req.location.cities;

    state.db.with_conn(|conn| {
        let summary = require(analysis_query(conn, cities, &req.month, &req.filter)?)?;
        let listings = require(get_housing(conn, cities, &req.month, &req.filter)?)?;

        let mut listing_map = Figure::new(mapbox_layout(
            req.location.center,
            state.mapbox_token.as_deref(),
        ));
        listing_map.add_trace(listing_scatter_trace(&listings, req.filter.price_label()));
        add_landmark_traces(&mut listing_map, conn, cities)?;

        Ok(customize_page(&CustomizeVm {
            location: req.location,
            month: req.month.clone(),
            filter: req.filter.clone(),
            listing_count: listings.len(),
            listing_map,
            summary,
        }))
    })
}

pub fn graph(
    state: &AppState,
    slug: &str,
    params: &HashMap<String, String>,
) -> Result<Markup, ServerError> {
    let req = MapRequest::parse(state, slug, params)?;
    let cities = req.location.cities;

    let listings = state.db.with_conn(|conn| {
        require(get_housing(conn, cities, &req.month, &req.filter)?)
    })?;

    let clusters = run_kmeans(
        &listings.lats,
        &listings.lons,
        &listings.prices,
        &listings.urls,
        state.config.kmeans_seed,
    );

    if clusters.is_empty() {
        log::info!("Nothing to cluster for {} in {}", req.location.slug, req.month);
    }

    let mut cluster_map = Figure::new(mapbox_layout(
        req.location.center,
        state.mapbox_token.as_deref(),
    ));
    cluster_map.add_trace(cluster_trace(&clusters, req.filter.price_label()));

    Ok(graph_page(&GraphVm {
        location: req.location,
        month: req.month,
        filter: req.filter,
        point_count: clusters.len(),
        cluster_count: clusters.cluster_count(),
        cluster_map,
    }))
}

pub fn city_stats(state: &AppState) -> Result<Markup, ServerError> {
    let table = get_census_data(&state.config.census_dir)?;
    Ok(city_stats_page(&table))
}
