//! Forum records: row mapping, persistence and relationship lookups.

mod question;
mod question_follow;
mod reply;
mod user;

pub use question::Question;
pub use question_follow::QuestionFollow;
pub use reply::Reply;
pub use user::User;
