use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::housing::insert_listing;
use crate::domain::listing::NewListing;
use crate::views::AppState;
use tempfile::TempDir;

/// A fresh, initialized database in its own temp directory.
/// Keep the `TempDir` alive for as long as the database is used.
pub fn init_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(dir.path().join("housing.sqlite"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    (dir, db)
}

pub fn test_state(dir: &TempDir, db: &Database) -> AppState {
    let config = AppConfig {
        database: db.path().to_path_buf(),
        crawled_data_dir: dir.path().join("crawled_data"),
        census_dir: dir.path().join("census_data"),
        month: Some("2022-11".to_string()),
        ..AppConfig::default()
    };
    AppState {
        db: db.clone(),
        config,
        mapbox_token: None,
    }
}

/// Minimal listing builder for seeding `city_housing`.
pub fn listing(city_id: i64, month: &str, price: f64, beds: f64, baths: f64) -> NewListing {
    NewListing {
        crawled_date: month.to_string(),
        address: Some(format!("{price} Main St")),
        price: Some(price),
        area: Some(1000.0),
        bathrooms: Some(baths),
        bedrooms: Some(beds),
        days_posted: Some(5),
        url: Some(format!("https://www.zillow.com/homedetails/{price}")),
        lat: Some(40.35),
        lng: Some(-74.66),
        city_id,
    }
}

pub fn seed(db: &Database, listings: &[NewListing]) {
    db.with_conn(|conn| {
        for l in listings {
            insert_listing(conn, l)?;
        }
        Ok(())
    })
    .expect("seed listings");
}
