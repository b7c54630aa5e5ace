//! Store settings.

use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "aa-questions";
const DB_FILE: &str = "questions.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// Database file. Created on first open if missing.
    pub path: PathBuf,
    /// Issue `PRAGMA foreign_keys = ON` after opening.
    pub enforce_foreign_keys: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            enforce_foreign_keys: false,
        }
    }
}

impl DbConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }
}

fn default_db_path() -> PathBuf {
    match dirs::data_dir() {
        Some(base) => base.join(APP_DIR).join(DB_FILE),
        None => PathBuf::from(DB_FILE),
    }
}
