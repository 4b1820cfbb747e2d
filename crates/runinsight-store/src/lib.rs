//! RunInsight Store — SQLite persistence of classified questions and user stats.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::{QuestionStore, MAX_PERIOD_DAYS};
pub use types::*;
