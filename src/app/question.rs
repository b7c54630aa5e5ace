//! Question records and their relationships.

use crate::app::{QuestionFollow, Reply, User};
use crate::error::AppError;
use crate::infra::{get_connection, query_all, query_first, valid_key, DbPool, FromRow};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    id: Option<i64>,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

impl FromRow for Question {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            author_id: row.get("author_id")?,
            title: row.get("title")?,
            body: row.get("body")?,
        })
    }
}

impl Question {
    pub fn new(author_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            author_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Store-assigned identity; `None` until `create` succeeds.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn all(pool: &DbPool) -> Result<Vec<Question>, AppError> {
        query_all(pool, "SELECT * FROM questions", [])
    }

    /// Non-positive ids are treated as absent without querying.
    pub fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Question>, AppError> {
        if !valid_key(id) {
            return Ok(None);
        }
        query_first(pool, "SELECT * FROM questions WHERE id = ?1", [id])
    }

    pub fn find_by_author_id(pool: &DbPool, author_id: i64) -> Result<Vec<Question>, AppError> {
        if !valid_key(author_id) {
            return Ok(Vec::new());
        }
        query_all(
            pool,
            "SELECT * FROM questions WHERE author_id = ?1",
            [author_id],
        )
    }

    pub fn most_followed(pool: &DbPool, n: usize) -> Result<Vec<Question>, AppError> {
        QuestionFollow::most_followed_questions(pool, n)
    }

    /// Insert as a new row and record the assigned id on `self`.
    pub fn create(&mut self, pool: &DbPool) -> Result<i64, AppError> {
        if let Some(id) = self.id {
            return Err(AppError::AlreadyPersisted(format!("question {}", id)));
        }
        let conn = get_connection(pool)?;
        conn.execute(
            "INSERT INTO questions (id, author_id, title, body) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.author_id, &self.title, &self.body],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        log::debug!("questions: inserted {}", id);
        Ok(id)
    }

    pub fn update(&self, pool: &DbPool) -> Result<(), AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::NotPersisted(format!("question '{}'", self.title)))?;
        let conn = get_connection(pool)?;
        let changed = conn.execute(
            "UPDATE questions SET author_id = ?1, title = ?2, body = ?3 WHERE id = ?4",
            params![self.author_id, &self.title, &self.body, id],
        )?;
        if changed == 0 {
            log::warn!("questions: update matched no row for {}", id);
            return Err(AppError::NotFound(format!("question {}", id)));
        }
        log::debug!("questions: updated {}", id);
        Ok(())
    }

    pub fn author(&self, pool: &DbPool) -> Result<Option<User>, AppError> {
        User::find_by_id(pool, self.author_id)
    }

    /// Every reply on this question, top-level and nested alike.
    pub fn replies(&self, pool: &DbPool) -> Result<Vec<Reply>, AppError> {
        match self.id {
            Some(id) => Reply::find_by_question_id(pool, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn followers(&self, pool: &DbPool) -> Result<Vec<User>, AppError> {
        match self.id {
            Some(id) => QuestionFollow::followers_for_question_id(pool, id),
            None => Ok(Vec::new()),
        }
    }
}
