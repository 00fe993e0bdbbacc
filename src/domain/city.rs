// src/domain/city.rs

/// One of the five metros stored in the `city` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub id: i64,
    pub name: &'static str,
    /// File-name prefix the crawler uses for this city's CSV.
    pub crawl_slug: &'static str,
    pub center: (f64, f64),
    pub has_subway: bool,
}

pub const CITIES: &[City] = &[
    City {
        id: 1,
        name: "Princeton,NJ",
        crawl_slug: "princeton",
        center: (40.3573, -74.6672),
        has_subway: false,
    },
    City {
        id: 2,
        name: "West Windsor,NJ",
        crawl_slug: "west-windsor-township-nj",
        center: (40.2983, -74.6186),
        has_subway: false,
    },
    City {
        id: 3,
        name: "Lawrence,NJ",
        crawl_slug: "lawrence-township-nj",
        center: (40.2778, -74.7294),
        has_subway: false,
    },
    City {
        id: 4,
        name: "Seattle,WA",
        crawl_slug: "seattle",
        center: (47.6062, -122.3321),
        has_subway: true,
    },
    City {
        id: 5,
        name: "NYC,NY",
        crawl_slug: "nyc",
        center: (40.7128, -74.0060),
        has_subway: true,
    },
];

pub fn city_by_slug(slug: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.crawl_slug == slug)
}

#[cfg(test)]
pub fn city_by_name(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.name == name)
}

/// A map page: the cities it covers and where the map is centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub slug: &'static str,
    pub title: &'static str,
    pub cities: &'static [&'static str],
    pub center: (f64, f64),
}

pub const LOCATIONS: &[Location] = &[
    Location {
        slug: "princeton",
        title: "Princeton area",
        cities: &["Princeton,NJ", "West Windsor,NJ", "Lawrence,NJ"],
        center: (40.3573, -74.6672),
    },
    Location {
        slug: "nyc",
        title: "New York City",
        cities: &["NYC,NY"],
        center: (40.7128, -74.0060),
    },
    Location {
        slug: "seattle",
        title: "Seattle",
        cities: &["Seattle,WA"],
        center: (47.6062, -122.3321),
    },
];

pub const DEFAULT_LOCATION: &str = "princeton";

pub fn location_by_slug(slug: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.slug == slug)
}
