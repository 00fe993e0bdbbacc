// src/ingest/monthly.rs

use crate::db::Database;
use crate::db::housing::{count_month_rows, insert_listing};
use crate::domain::city::city_by_slug;
use crate::domain::listing::NewListing;
use crate::errors::ServerError;
use crate::ingest::models::CrawlRow;
use crate::ingest::parse::{city_slug, parse_days_on_market, parse_lat_long};
use std::fs;
use std::path::{Path, PathBuf};

/// What a monthly load ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// `<data_dir>/<month>` does not exist; nothing was written.
    MissingDirectory(PathBuf),
    /// Rows for the month are already in the database; nothing was written.
    AlreadyIngested { existing: i64 },
    /// Rows inserted, per city name.
    Inserted(Vec<(String, usize)>),
}

impl IngestOutcome {
    pub fn inserted_rows(&self) -> usize {
        match self {
            IngestOutcome::Inserted(per_city) => per_city.iter().map(|(_, n)| n).sum(),
            _ => 0,
        }
    }
}

/// Loads every crawler CSV of `month` from `data_dir/<month>/` into
/// `city_housing`, at most once per month.
pub fn update_db_monthly(
    db: &Database,
    data_dir: &Path,
    month: &str,
) -> Result<IngestOutcome, ServerError> {
    let month_dir = data_dir.join(month);
    if !month_dir.is_dir() {
        log::error!(
            "Data folder {} does not exist. Please create it and start crawling first.\n\
             Directory tree:\n  {dir}/2022-11/<city>2022-11.csv\n  {dir}/2022-12/<city>2022-12.csv\n  ...",
            month_dir.display(),
            dir = data_dir.display(),
        );
        return Ok(IngestOutcome::MissingDirectory(month_dir));
    }

    let existing = db.with_conn(|conn| count_month_rows(conn, month))?;
    if existing > 0 {
        log::error!("Data for {month} already added ({existing} rows), skipping");
        return Ok(IngestOutcome::AlreadyIngested { existing });
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&month_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();

    let mut batches = Vec::new();
    for file in &files {
        let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let slug = city_slug(file_name, month);
        let Some(city) = city_by_slug(slug) else {
            log::warn!("No city known for crawl file {file_name} (slug '{slug}'), skipping");
            continue;
        };

        let listings = read_crawl_file(file, month, city.id)?;
        log::info!("{} records crawled for {}", listings.len(), city.name);
        batches.push((city.name.to_string(), listings));
    }

    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        for (city_name, listings) in &batches {
            log::info!("Start sync DB for city: {city_name}");
            for listing in listings {
                insert_listing(&tx, listing)?;
            }
            log::info!("DB sync is done for city: {city_name}");
        }
        tx.commit()?;
        Ok(())
    })?;

    Ok(IngestOutcome::Inserted(
        batches
            .into_iter()
            .map(|(name, listings)| (name, listings.len()))
            .collect(),
    ))
}

/// Parses one crawler CSV into rows for `city_housing`.
pub fn read_crawl_file(path: &Path, month: &str, city_id: i64) -> Result<Vec<NewListing>, ServerError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Vec::new();

    for row in reader.deserialize::<CrawlRow>() {
        let row = row?;
        if let Some(m) = row.crawled_month.as_deref() {
            if m != month {
                log::warn!("{}: row labelled {m}, stored under {month}", path.display());
            }
        }

        let (lat, lng) = row
            .lat_long
            .as_deref()
            .map(parse_lat_long)
            .unwrap_or((None, None));
        let days_posted = row.variable_data.as_deref().and_then(parse_days_on_market);

        out.push(NewListing {
            crawled_date: month.to_string(),
            address: row.address_street,
            price: row.unformatted_price,
            area: row.area,
            bathrooms: row.baths,
            bedrooms: row.beds,
            days_posted,
            url: row.detail_url,
            lat,
            lng,
            city_id,
        });
    }
    Ok(out)
}
