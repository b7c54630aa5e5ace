//! Reply records. Replies nest through `reply_id`; a reply without one
//! answers the question directly.

use crate::app::{Question, User};
use crate::error::AppError;
use crate::infra::{get_connection, query_all, query_first, DbPool, FromRow};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default)]
    id: Option<i64>,
    pub body: String,
    pub question_id: i64,
    #[serde(default)]
    pub reply_id: Option<i64>,
    pub user_id: i64,
}

impl FromRow for Reply {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            body: row.get("body")?,
            question_id: row.get("question_id")?,
            reply_id: row.get("reply_id")?,
            user_id: row.get("user_id")?,
        })
    }
}

impl Reply {
    pub fn new(
        body: impl Into<String>,
        question_id: i64,
        reply_id: Option<i64>,
        user_id: i64,
    ) -> Self {
        Self {
            id: None,
            body: body.into(),
            question_id,
            reply_id,
            user_id,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn all(pool: &DbPool) -> Result<Vec<Reply>, AppError> {
        query_all(pool, "SELECT * FROM replies", [])
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Reply>, AppError> {
        query_first(pool, "SELECT * FROM replies WHERE id = ?1", [id])
    }

    pub fn find_by_question_id(pool: &DbPool, question_id: i64) -> Result<Vec<Reply>, AppError> {
        query_all(
            pool,
            "SELECT * FROM replies WHERE question_id = ?1",
            [question_id],
        )
    }

    pub fn find_by_user_id(pool: &DbPool, user_id: i64) -> Result<Vec<Reply>, AppError> {
        query_all(pool, "SELECT * FROM replies WHERE user_id = ?1", [user_id])
    }

    /// Direct children of the reply with id `reply_id`.
    pub fn find_by_reply_id(pool: &DbPool, reply_id: i64) -> Result<Vec<Reply>, AppError> {
        query_all(pool, "SELECT * FROM replies WHERE reply_id = ?1", [reply_id])
    }

    pub fn create(&mut self, pool: &DbPool) -> Result<i64, AppError> {
        if let Some(id) = self.id {
            return Err(AppError::AlreadyPersisted(format!("reply {}", id)));
        }
        let conn = get_connection(pool)?;
        conn.execute(
            "INSERT INTO replies (id, body, question_id, reply_id, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![self.id, &self.body, self.question_id, self.reply_id, self.user_id],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        log::debug!("replies: inserted {} on question {}", id, self.question_id);
        Ok(id)
    }

    pub fn update(&self, pool: &DbPool) -> Result<(), AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::NotPersisted(format!("reply on question {}", self.question_id))
        })?;
        let conn = get_connection(pool)?;
        let changed = conn.execute(
            "UPDATE replies SET body = ?1, question_id = ?2, reply_id = ?3, user_id = ?4 WHERE id = ?5",
            params![&self.body, self.question_id, self.reply_id, self.user_id, id],
        )?;
        if changed == 0 {
            log::warn!("replies: update matched no row for {}", id);
            return Err(AppError::NotFound(format!("reply {}", id)));
        }
        log::debug!("replies: updated {}", id);
        Ok(())
    }

    pub fn author(&self, pool: &DbPool) -> Result<Option<User>, AppError> {
        User::find_by_id(pool, self.user_id)
    }

    pub fn question(&self, pool: &DbPool) -> Result<Option<Question>, AppError> {
        Question::find_by_id(pool, self.question_id)
    }

    /// `None` for a top-level reply.
    pub fn parent_reply(&self, pool: &DbPool) -> Result<Option<Reply>, AppError> {
        match self.reply_id {
            Some(parent_id) => Reply::find_by_id(pool, parent_id),
            None => Ok(None),
        }
    }

    /// One level down only; grandchildren are not included.
    pub fn child_replies(&self, pool: &DbPool) -> Result<Vec<Reply>, AppError> {
        match self.id {
            Some(id) => Reply::find_by_reply_id(pool, id),
            None => Ok(Vec::new()),
        }
    }
}
