//! Database schema SQL.

/// Categories and classified questions.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS chatbot_categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    weight INTEGER NOT NULL CHECK (weight > 0),
    description TEXT
);

CREATE TABLE IF NOT EXISTS chatbot_questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    question TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES chatbot_categories(id),
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_questions_user_id ON chatbot_questions(user_id);
CREATE INDEX IF NOT EXISTS idx_questions_created_at ON chatbot_questions(created_at);
"#;

/// Seeds one category row; ids follow catalog order starting at 1.
pub const SEED_CATEGORY_SQL: &str = r#"
INSERT OR IGNORE INTO chatbot_categories (id, name, display_name, weight, description)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;
