use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::errors::ServerError;

const SQL_SCHEMA: &str = include_str!("../../sql/schema.sql");
const SQL_INITIAL_DATA: &str = include_str!("../../sql/initial_data.sql");

// Thread-local connection slot, remembered together with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(PathBuf, Connection)>> = RefCell::new(None);
}

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides the worker thread's connection to the closure, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }

    /// True once `init-db` has created the tables.
    pub fn is_initialized(&self) -> Result<bool, ServerError> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "select count(*) from sqlite_master where type = 'table' and name = 'city_housing'",
                [],
                |r| r.get(0),
            )?;
            Ok(n > 0)
        })
    }
}

/// Drops every table, recreates the schema and seeds the city reference rows.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SQL_SCHEMA)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        conn.execute_batch(SQL_INITIAL_DATA)
            .map_err(|e| ServerError::DbError(format!("Failed to seed cities: {e}")))?;
        Ok(())
    })?;

    log::info!("Database initialized at {}", db.path().display());
    Ok(())
}
