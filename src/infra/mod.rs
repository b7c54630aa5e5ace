//! Infrastructure: SQLite connection, settings, row mapping.

pub mod config;
pub mod db;

pub(crate) use db::{query_all, query_first, valid_key};
pub use config::DbConfig;
pub use db::{get_connection, init_db, init_test_db, open_db, DbPool, FromRow};
