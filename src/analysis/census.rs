// src/analysis/census.rs

use crate::errors::ServerError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SHOWN_FACTS: [&str; 8] = [
    "Population Estimates, July 1 2021, (V2021)",
    "Foreign born persons, percent, 2016-2020",
    "Owner-occupied housing unit rate, 2016-2020",
    "Median value of owner-occupied housing units, 2016-2020",
    "Median selected monthly owner costs -with a mortgage, 2016-2020",
    "Median selected monthly owner costs -without a mortgage, 2016-2020",
    "Bachelor's degree or higher, percent of persons age 25 years+, 2016-2020",
    "Median household income (in 2020 dollars), 2016-2020",
];

pub const SHOWN_LOCATIONS: [&str; 4] = [
    "Princeton, New Jersey",
    "New York city, New York",
    "Seattle city, Washington",
    "United States",
];

/// Facts down the side, locations across the top.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusTable {
    pub locations: Vec<String>,
    /// (fact, one value per location; empty when the export lacks it)
    pub rows: Vec<(String, Vec<String>)>,
}

/// Reads every QuickFacts CSV export in `dir` (first column `Fact`, then one
/// column per location) and picks out the shown facts and locations.
pub fn get_census_data(dir: &Path) -> Result<CensusTable, ServerError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();

    // location -> fact -> value
    let mut values: HashMap<String, HashMap<String, String>> = HashMap::new();
    for file in &files {
        read_quickfacts(file, &mut values)?;
    }
    log::debug!("census: {} files, {} locations", files.len(), values.len());

    let rows = SHOWN_FACTS
        .iter()
        .map(|fact| {
            let cells = SHOWN_LOCATIONS
                .iter()
                .map(|loc| {
                    values
                        .get(*loc)
                        .and_then(|facts| facts.get(*fact))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            (fact.to_string(), cells)
        })
        .collect();

    Ok(CensusTable {
        locations: SHOWN_LOCATIONS.iter().map(|s| s.to_string()).collect(),
        rows,
    })
}

fn read_quickfacts(
    path: &Path,
    values: &mut HashMap<String, HashMap<String, String>>,
) -> Result<(), ServerError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    for record in reader.records() {
        let record = record?;
        let Some(fact) = record.get(0).map(str::trim) else {
            continue;
        };
        if fact.is_empty() {
            continue;
        }
        for (col, location) in headers.iter().enumerate().skip(1) {
            // QuickFacts puts note columns next to the value columns.
            if location.trim().is_empty() || location.contains("Note") {
                continue;
            }
            if let Some(v) = record.get(col) {
                values
                    .entry(location.trim().to_string())
                    .or_default()
                    .insert(fact.to_string(), v.trim().to_string());
            }
        }
    }
    Ok(())
}
