use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::LunchError;

use super::migrations;

/// Overrides the default data directory.
pub const DATA_DIR_ENV: &str = "LUNCHPLAN_HOME";

/// Pick the data directory: explicit flag, then `$LUNCHPLAN_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf, LunchError> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("lunchplan"))
        .ok_or_else(|| LunchError::config(format!("Cannot determine a data directory. Set {DATA_DIR_ENV} or pass --data-dir.")))
}

/// Get the path to the lunchplan database.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("lunchplan.db")
}

/// Get the settings file path.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(data_dir: &Path) -> Result<Connection, LunchError> {
    let path = db_path(data_dir);
    if !path.exists() {
        return Err(LunchError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    tracing::debug!(path = %path.display(), "opened database");
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db(data_dir: &Path) -> Result<PathBuf, LunchError> {
    let path = db_path(data_dir);
    fs::create_dir_all(data_dir).map_err(|e| LunchError::database(e.to_string()))?;
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    tracing::info!(path = %path.display(), "database initialized");
    Ok(path)
}

/// A migrated in-memory store.
pub fn open_in_memory() -> Result<Connection, LunchError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Run `f` inside `BEGIN IMMEDIATE`; commit on `Ok`, roll back on `Err`.
pub fn with_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T, LunchError>,
) -> Result<T, LunchError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    match f(conn) {
        Ok(value) => {
            conn.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

fn configure_connection(conn: &Connection) -> Result<(), LunchError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
