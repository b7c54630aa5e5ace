//! Data access for the AA Questions forum store.
//!
//! Open a [`infra::DbPool`] once and pass it to every call:
//!
//! ```no_run
//! use aa_questions::app::{Question, User};
//! use aa_questions::infra::{open_db, DbConfig};
//!
//! # fn main() -> Result<(), aa_questions::error::AppError> {
//! let pool = open_db(&DbConfig::default())?;
//! let mut author = User::new("Ada", "Lovelace");
//! let author_id = author.create(&pool)?;
//! let mut q = Question::new(author_id, "Engines", "Can they compose music?");
//! q.create(&pool)?;
//! assert_eq!(author.authored_questions(&pool)?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod error;
pub mod infra;
