//! User records.

use crate::app::{Question, QuestionFollow, Reply};
use crate::error::AppError;
use crate::infra::{get_connection, query_all, query_first, valid_key, DbPool, FromRow};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    id: Option<i64>,
    pub fname: String,
    pub lname: String,
}

impl FromRow for User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            fname: row.get("fname")?,
            lname: row.get("lname")?,
        })
    }
}

impl User {
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            id: None,
            fname: fname.into(),
            lname: lname.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn all(pool: &DbPool) -> Result<Vec<User>, AppError> {
        query_all(pool, "SELECT * FROM users", [])
    }

    /// Non-positive ids are treated as absent without querying.
    pub fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, AppError> {
        if !valid_key(id) {
            return Ok(None);
        }
        query_first(pool, "SELECT * FROM users WHERE id = ?1", [id])
    }

    pub fn find_by_name(pool: &DbPool, fname: &str, lname: &str) -> Result<Option<User>, AppError> {
        query_first(
            pool,
            "SELECT * FROM users WHERE fname = ?1 AND lname = ?2",
            [fname, lname],
        )
    }

    pub fn create(&mut self, pool: &DbPool) -> Result<i64, AppError> {
        if let Some(id) = self.id {
            return Err(AppError::AlreadyPersisted(format!("user {}", id)));
        }
        let conn = get_connection(pool)?;
        conn.execute(
            "INSERT INTO users (id, fname, lname) VALUES (?1, ?2, ?3)",
            params![self.id, &self.fname, &self.lname],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        log::debug!("users: inserted {}", id);
        Ok(id)
    }

    pub fn update(&self, pool: &DbPool) -> Result<(), AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::NotPersisted(format!("user '{} {}'", self.fname, self.lname))
        })?;
        let conn = get_connection(pool)?;
        let changed = conn.execute(
            "UPDATE users SET fname = ?1, lname = ?2 WHERE id = ?3",
            params![&self.fname, &self.lname, id],
        )?;
        if changed == 0 {
            log::warn!("users: update matched no row for {}", id);
            return Err(AppError::NotFound(format!("user {}", id)));
        }
        log::debug!("users: updated {}", id);
        Ok(())
    }

    pub fn authored_questions(&self, pool: &DbPool) -> Result<Vec<Question>, AppError> {
        match self.id {
            Some(id) => Question::find_by_author_id(pool, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn authored_replies(&self, pool: &DbPool) -> Result<Vec<Reply>, AppError> {
        match self.id {
            Some(id) => Reply::find_by_user_id(pool, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn followed_questions(&self, pool: &DbPool) -> Result<Vec<Question>, AppError> {
        match self.id {
            Some(id) => QuestionFollow::followed_questions_for_user_id(pool, id),
            None => Ok(Vec::new()),
        }
    }
}
