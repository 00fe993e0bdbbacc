use crate::commands::{ensure_instance_dir, init_db_command, update_db_monthly_command};
use crate::config::{read_token, AppConfig, Cli, Command};
use crate::db::Database;
use crate::ingest::IngestOutcome;
use crate::router::handle;
use crate::views::AppState;
use astra::Server;
use chrono::Local;
use clap::Parser;
use env_logger::{Builder, Env};
use std::io::Write;

mod analysis;
mod commands;
mod config;
mod db;
mod domain;
mod errors;
mod figures;
mod gmap;
mod ingest;
mod responses;
mod router;
mod templates;
mod views;

#[cfg(test)]
mod tests;

fn setup_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() {
    setup_logger();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref(), cli.overrides) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config),
        Command::InitDb => init_db_command(&config).map(|n| {
            println!("Initialized the database ({n} landmarks).");
        }),
        Command::UpdateDbMonthly { month } => {
            update_db_monthly_command(&config, &month).map(|outcome| match outcome {
                IngestOutcome::Inserted(_) => {
                    println!("Updated the database ({} rows).", outcome.inserted_rows())
                }
                IngestOutcome::AlreadyIngested { .. } | IngestOutcome::MissingDirectory(_) => {
                    println!("Database left unchanged.")
                }
            })
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn serve(config: AppConfig) -> Result<(), errors::ServerError> {
    ensure_instance_dir(&config)?;
    let db = Database::new(&config.database);
    if !db.is_initialized()? {
        log::warn!(
            "{} has no tables yet, run `init-db` first",
            config.database.display()
        );
    }

    let mapbox_token = read_token(&config.mapbox_token_path);
    if mapbox_token.is_none() {
        log::warn!("No Mapbox token, maps fall back to OpenStreetMap tiles");
    }

    let addr = config.bind_addr;
    let server = Server::bind(&addr).max_workers(config.max_workers);
    let state = AppState {
        db,
        config,
        mapbox_token,
    };

    log::info!("Starting server at http://{addr}");
    server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    })?;

    log::info!("Server shut down cleanly.");
    Ok(())
}
