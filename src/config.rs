// src/config.rs

use crate::errors::ServerError;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "housing.toml";

#[derive(Debug, Parser)]
#[command(name = "housing_map", version, about = "Housing listings and amenities on a map")]
pub struct Cli {
    /// TOML settings file. `housing.toml` is picked up when present.
    #[arg(long, env = "HOUSING_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the web server (default).
    Serve,
    /// Clear the existing data, create new tables and fetch landmarks.
    InitDb,
    /// Load the crawled CSV files of one month, e.g. `2022-11`.
    UpdateDbMonthly { month: String },
}

/// Settings that can be given on the command line or through the environment.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    #[arg(long, env = "HOUSING_DATABASE")]
    pub database: Option<PathBuf>,

    #[arg(long, env = "HOUSING_BIND_ADDR")]
    pub bind_addr: Option<SocketAddr>,

    #[arg(long, env = "HOUSING_MAX_WORKERS")]
    pub max_workers: Option<usize>,

    #[arg(long, env = "HOUSING_CRAWLED_DATA_DIR")]
    pub crawled_data_dir: Option<PathBuf>,

    #[arg(long, env = "HOUSING_CENSUS_DIR")]
    pub census_dir: Option<PathBuf>,

    #[arg(long, env = "HOUSING_GMAP_TOKEN")]
    pub gmap_token_path: Option<PathBuf>,

    #[arg(long, env = "HOUSING_MAPBOX_TOKEN")]
    pub mapbox_token_path: Option<PathBuf>,

    /// Pin the displayed month instead of using the current one.
    #[arg(long, env = "HOUSING_MONTH")]
    pub month: Option<String>,

    #[arg(long, env = "HOUSING_KMEANS_SEED")]
    pub kmeans_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub crawled_data_dir: PathBuf,
    pub census_dir: PathBuf,
    pub gmap_token_path: PathBuf,
    pub mapbox_token_path: PathBuf,
    pub month: Option<String>,
    pub kmeans_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("instance").join("housing.sqlite"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            crawled_data_dir: PathBuf::from("crawled_data"),
            census_dir: PathBuf::from("census_data"),
            gmap_token_path: PathBuf::from("access_token").join("gmap.txt"),
            mapbox_token_path: PathBuf::from("access_token").join("mapbox.txt"),
            month: None,
            kmeans_seed: 42,
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file, then CLI/env overrides.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self, ServerError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    fn apply(&mut self, o: Overrides) {
        if let Some(v) = o.database {
            self.database = v;
        }
        if let Some(v) = o.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = o.max_workers {
            self.max_workers = v;
        }
        if let Some(v) = o.crawled_data_dir {
            self.crawled_data_dir = v;
        }
        if let Some(v) = o.census_dir {
            self.census_dir = v;
        }
        if let Some(v) = o.gmap_token_path {
            self.gmap_token_path = v;
        }
        if let Some(v) = o.mapbox_token_path {
            self.mapbox_token_path = v;
        }
        if o.month.is_some() {
            self.month = o.month;
        }
        if let Some(v) = o.kmeans_seed {
            self.kmeans_seed = v;
        }
    }
}

/// Reads a token file, trimming the trailing newline editors like to add.
/// A missing or empty file is `None`.
pub fn read_token(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Token file {} not readable: {e}", path.display());
            None
        }
    }
}
