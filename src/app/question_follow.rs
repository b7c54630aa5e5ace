//! Question follows: the user/question association.

use crate::app::{Question, User};
use crate::error::AppError;
use crate::infra::{get_connection, query_all, query_first, DbPool, FromRow};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFollow {
    #[serde(default)]
    id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
}

impl FromRow for QuestionFollow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            question_id: row.get("question_id")?,
        })
    }
}

impl QuestionFollow {
    pub fn new(user_id: i64, question_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            question_id,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn all(pool: &DbPool) -> Result<Vec<QuestionFollow>, AppError> {
        query_all(pool, "SELECT * FROM question_follows", [])
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<QuestionFollow>, AppError> {
        query_first(pool, "SELECT * FROM question_follows WHERE id = ?1", [id])
    }

    pub fn followers_for_question_id(pool: &DbPool, question_id: i64) -> Result<Vec<User>, AppError> {
        query_all(
            pool,
            "SELECT users.*
             FROM users
             JOIN question_follows ON users.id = question_follows.user_id
             WHERE question_follows.question_id = ?1",
            [question_id],
        )
    }

    pub fn followed_questions_for_user_id(
        pool: &DbPool,
        user_id: i64,
    ) -> Result<Vec<Question>, AppError> {
        query_all(
            pool,
            "SELECT questions.*
             FROM questions
             JOIN question_follows ON questions.id = question_follows.question_id
             WHERE question_follows.user_id = ?1",
            [user_id],
        )
    }

    /// Up to `n` questions ranked by follower count, highest first. Ties go to
    /// the older question. Questions nobody follows are never ranked.
    pub fn most_followed_questions(pool: &DbPool, n: usize) -> Result<Vec<Question>, AppError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        query_all(
            pool,
            "SELECT questions.*
             FROM questions
             JOIN question_follows ON questions.id = question_follows.question_id
             GROUP BY questions.id
             ORDER BY COUNT(question_follows.id) DESC, questions.id ASC
             LIMIT ?1",
            [limit],
        )
    }

    pub fn create(&mut self, pool: &DbPool) -> Result<i64, AppError> {
        if let Some(id) = self.id {
            return Err(AppError::AlreadyPersisted(format!("question follow {}", id)));
        }
        let conn = get_connection(pool)?;
        conn.execute(
            "INSERT INTO question_follows (id, user_id, question_id) VALUES (?1, ?2, ?3)",
            params![self.id, self.user_id, self.question_id],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        log::debug!(
            "question_follows: inserted {} (user {} -> question {})",
            id,
            self.user_id,
            self.question_id
        );
        Ok(id)
    }

    pub fn update(&self, pool: &DbPool) -> Result<(), AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::NotPersisted(format!(
                "follow of question {} by user {}",
                self.question_id, self.user_id
            ))
        })?;
        let conn = get_connection(pool)?;
        let changed = conn.execute(
            "UPDATE question_follows SET user_id = ?1, question_id = ?2 WHERE id = ?3",
            params![self.user_id, self.question_id, id],
        )?;
        if changed == 0 {
            log::warn!("question_follows: update matched no row for {}", id);
            return Err(AppError::NotFound(format!("question follow {}", id)));
        }
        log::debug!("question_follows: updated {}", id);
        Ok(())
    }
}
