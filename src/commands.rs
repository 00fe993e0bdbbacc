// src/commands.rs

use crate::config::{read_token, AppConfig};
use crate::db::{init_db, Database};
use crate::db::layout::insert_landmarks;
use crate::domain::city::CITIES;
use crate::errors::ServerError;
use crate::gmap::{layout_types_for, GmapClient, LandmarkMap};
use crate::ingest::{update_db_monthly, IngestOutcome};
use std::fs;

/// Makes sure the directory holding the database file exists.
pub fn ensure_instance_dir(config: &AppConfig) -> Result<(), ServerError> {
    if let Some(parent) = config.database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// `init-db`: recreate the tables, seed the cities and fetch landmarks.
pub fn init_db_command(config: &AppConfig) -> Result<usize, ServerError> {
    ensure_instance_dir(config)?;
    let db = Database::new(&config.database);

    log::info!("========= Initializing tables and city data =========");
    init_db(&db)?;

    let Some(token) = read_token(&config.gmap_token_path) else {
        log::warn!(
            "No Google Maps token at {}, city_layout stays empty",
            config.gmap_token_path.display()
        );
        return Ok(0);
    };

    log::info!("========= Starting API call to get layout data =========");
    let client = GmapClient::new(token)?;
    let mut landmarks = LandmarkMap::new();
    for city in CITIES {
        for kind in layout_types_for(city) {
            client.fetch_gmap_data(kind, city, &mut landmarks)?;
        }
    }

    log::info!("========= API call was done, storing data to DB =========");
    let rows: Vec<_> = landmarks.into_values().collect();
    let n = db.with_conn(|conn| insert_landmarks(conn, &rows))?;
    log::info!("{n} landmarks stored");
    Ok(n)
}

/// `update-db-monthly <month>`.
pub fn update_db_monthly_command(config: &AppConfig, month: &str) -> Result<IngestOutcome, ServerError> {
    let month = crate::domain::month::validate_month(month)?;
    ensure_instance_dir(config)?;
    let db = Database::new(&config.database);
    let outcome = update_db_monthly(&db, &config.crawled_data_dir, &month)?;
    if let IngestOutcome::Inserted(per_city) = &outcome {
        for (city, n) in per_city {
            log::info!("{city}: {n} rows");
        }
    }
    Ok(outcome)
}
