// src/figures/plotly.rs

use crate::analysis::ClusterResult;
use crate::domain::landmark::LandmarkPoints;
use crate::domain::listing::{MonthlyPrice, ListingPoints};
use serde_json::{json, Value};

const MAP_HEIGHT: u32 = 800;
const MAP_WIDTH: u32 = 1000;
const MAP_ZOOM: u32 = 11;

/// A Plotly figure: `{ data: [...traces], layout: {...} }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(layout: Value) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Value) {
        self.data.push(trace);
    }

    pub fn to_json(&self) -> Value {
        json!({ "data": self.data, "layout": self.layout })
    }
}

/// Map layout centered on a location. Without a Mapbox token the
/// token-free OpenStreetMap tiles are used.
pub fn mapbox_layout(center: (f64, f64), mapbox_token: Option<&str>) -> Value {
    let mut mapbox = json!({
        "center": { "lat": center.0, "lon": center.1 },
        "zoom": MAP_ZOOM,
    });
    match mapbox_token {
        Some(token) => {
            mapbox["accesstoken"] = json!(token);
            mapbox["style"] = json!("outdoors");
        }
        None => mapbox["style"] = json!("open-street-map"),
    }
    json!({
        "mapbox": mapbox,
        "height": MAP_HEIGHT,
        "width": MAP_WIDTH,
        "margin": { "l": 0, "r": 0, "t": 30, "b": 0 },
    })
}

pub fn density_trace(points: &ListingPoints) -> Value {
    json!({
        "type": "densitymapbox",
        "lat": points.lats,
        "lon": points.lons,
        "z": points.prices,
        "customdata": points.urls,
        "hovertemplate": "Price: %{z} <br> More Info on: <a href=\"%{customdata}\">Zillow Link</a>",
        "radius": 30,
        "opacity": 1,
    })
}

pub fn listing_scatter_trace(points: &ListingPoints, price_label: &str) -> Value {
    json!({
        "type": "scattermapbox",
        "name": "Listings",
        "mode": "markers",
        "lat": points.lats,
        "lon": points.lons,
        "customdata": points.urls,
        "marker": {
            "size": 9,
            "color": points.prices,
            "colorscale": "Viridis",
            "showscale": true,
            "colorbar": { "title": price_label },
        },
        "hovertemplate": format!("{price_label}: %{{marker.color}}<br>%{{customdata}}<extra></extra>"),
    })
}

/// Symbol and marker size per landmark legend entry.
pub fn landmark_trace(name: &str, symbol: &str, size: u32, points: &LandmarkPoints) -> Value {
    json!({
        "type": "scattermapbox",
        "name": name,
        "mode": "markers+text",
        "lon": points.lons,
        "lat": points.lats,
        "hovertext": points.names,
        "marker": { "size": size, "opacity": 1, "symbol": symbol },
        "showlegend": true,
    })
}

pub fn monthly_box_figure(prices: &[MonthlyPrice]) -> Figure {
    let mut fig = Figure::new(json!({
        "title": "Monthly price (2 bath, 2-3 bed)",
        "yaxis": { "title": "Price" },
    }));
    let months: Vec<&str> = prices.iter().map(|p| p.month.as_str()).collect();
    let values: Vec<f64> = prices.iter().map(|p| p.price).collect();
    fig.add_trace(json!({
        "type": "box",
        "x": months,
        "y": values,
        "boxpoints": false,
    }));
    fig
}

pub fn cluster_trace(clusters: &ClusterResult, price_label: &str) -> Value {
    json!({
        "type": "scattermapbox",
        "name": "Clusters",
        "mode": "markers",
        "lat": clusters.lats,
        "lon": clusters.lngs,
        "customdata": clusters.urls,
        "text": clusters.price,
        "marker": {
            "size": 10,
            "color": clusters.medium_prices,
            "colorscale": "Jet",
            "showscale": true,
            "colorbar": { "title": format!("Cluster median {}", price_label.to_lowercase()) },
        },
        "hovertemplate": "Cluster median: %{marker.color}<br>Price: %{text}<br>%{customdata}<extra></extra>",
    })
}
