//! SQLite connection and row mapping.

use crate::error::AppError;
use crate::infra::config::DbConfig;
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Setup script for a fresh store. Tables only; the data layer never runs it on its own.
pub const SCHEMA_SQL: &str = include_str!("../../schema/questions.sql");

pub struct DbPool(pub Mutex<Connection>);

/// Build a record from a result row. Columns are read by name, so `SELECT *`
/// and joined selects map the same way.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Open the store at path with default settings.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    open_db(&DbConfig {
        path: db_path.to_path_buf(),
        ..DbConfig::default()
    })
}

/// Open the store described by `config`.
pub fn open_db(config: &DbConfig) -> Result<DbPool, AppError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
    }
    let conn = Connection::open(&config.path)?;
    // The bundled build starts with foreign keys on; set both ways.
    conn.pragma_update(None, "foreign_keys", config.enforce_foreign_keys)?;
    log::info!(
        "DB path: {:?} (foreign keys {})",
        config.path,
        if config.enforce_foreign_keys { "on" } else { "off" }
    );
    Ok(DbPool(Mutex::new(conn)))
}

/// In-memory store with the setup script applied. Used by the test suites.
pub fn init_test_db() -> Result<DbPool, AppError> {
    let conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", false)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(DbPool(Mutex::new(conn)))
}

/// Lock the shared connection.
pub fn get_connection(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.0
        .lock()
        .map_err(|e| AppError::Db(format!("db lock poisoned: {}", e)))
}

/// Run one statement and map every row.
pub(crate) fn query_all<T, P>(pool: &DbPool, sql: &str, params: P) -> Result<Vec<T>, AppError>
where
    T: FromRow,
    P: Params,
{
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| T::from_row(row))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Run one statement and map the first row, if any.
pub(crate) fn query_first<T, P>(pool: &DbPool, sql: &str, params: P) -> Result<Option<T>, AppError>
where
    T: FromRow,
    P: Params,
{
    let conn = get_connection(pool)?;
    let found = conn
        .query_row(sql, params, |row| T::from_row(row))
        .optional()?;
    Ok(found)
}

/// Numeric identity keys start at 1; anything else is rejected before querying.
pub(crate) fn valid_key(id: i64) -> bool {
    id > 0
}
