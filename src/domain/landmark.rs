// src/domain/landmark.rs

/// Google Places types we keep in `city_layout.landmark_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkType {
    School,
    ShoppingMall,
    Supermarket,
    TrainStation,
    Hospital,
    SubwayStation,
}

impl LandmarkType {
    pub const ALL: [LandmarkType; 6] = [
        LandmarkType::School,
        LandmarkType::ShoppingMall,
        LandmarkType::Supermarket,
        LandmarkType::TrainStation,
        LandmarkType::Hospital,
        LandmarkType::SubwayStation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkType::School => "school",
            LandmarkType::ShoppingMall => "shopping_mall",
            LandmarkType::Supermarket => "supermarket",
            LandmarkType::TrainStation => "train_station",
            LandmarkType::Hospital => "hospital",
            LandmarkType::SubwayStation => "subway_station",
        }
    }
}

/// A landmark as fetched from Google Maps, before it gets a row id.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub name: String,
    pub kind: LandmarkType,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    pub city_id: i64,
}

/// Column-oriented landmark points, ready for a map trace.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LandmarkPoints {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub names: Vec<String>,
}

impl LandmarkPoints {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn extend(&mut self, other: LandmarkPoints) {
        self.lons.extend(other.lons);
        self.lats.extend(other.lats);
        self.names.extend(other.names);
    }
}
