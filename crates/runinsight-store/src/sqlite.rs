//! SQLite store for classified questions and per-user statistics.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::schema::{SCHEMA_SQL, SEED_CATEGORY_SQL};
use crate::types::*;
use runinsight_core::{CategoryKey, Error, Result};

/// Longest window accepted by [`QuestionStore::user_stats_since`].
pub const MAX_PERIOD_DAYS: u32 = 30;

/// SQLite store holding the category table and every classified question.
pub struct QuestionStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl QuestionStore {
    /// Open or create the database file and seed the categories.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self::init(conn, Some(db_path.to_path_buf()))?;
        info!(
            "QuestionStore initialized: {} questions, path={}",
            store.count_questions()?,
            db_path.display()
        );
        Ok(store)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| Error::Database(e.to_string()))?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Self::seed_categories(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    fn seed_categories(conn: &Connection) -> Result<()> {
        let mut stmt = conn
            .prepare(SEED_CATEGORY_SQL)
            .map_err(|e| Error::Database(e.to_string()))?;
        for key in CategoryKey::ALL {
            stmt.execute(params![
                category_id(key),
                key.as_str(),
                key.display_name(),
                key.weight(),
                key.description(),
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        }
        debug!("Seeded {} categories", CategoryKey::ALL.len());
        Ok(())
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    // ---------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------

    /// All category rows in catalog order.
    pub fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, name, display_name, weight, description
                 FROM chatbot_categories ORDER BY id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut categories = Vec::new();
        for row in rows {
            let (id, name, display_name, weight, description) =
                row.map_err(|e| Error::Database(e.to_string()))?;
            match CategoryKey::parse(&name) {
                Some(key) => categories.push(CategoryRecord {
                    id,
                    name: key,
                    display_name,
                    weight,
                    description: description.unwrap_or_default(),
                }),
                None => warn!("Skipping unknown category row: {}", name),
            }
        }
        Ok(categories)
    }

    /// Number of category rows; five once the store is seeded.
    pub fn count_categories(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM chatbot_categories", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Questions
    // ---------------------------------------------------------------

    /// Store a classified question.
    pub fn save_question(
        &self,
        user_id: i64,
        question: &str,
        category: CategoryKey,
    ) -> Result<SavedQuestion> {
        self.save_question_at(user_id, question, category, Utc::now().timestamp_millis())
    }

    /// Store a classified question with an explicit creation time (ms).
    pub fn save_question_at(
        &self,
        user_id: i64,
        question: &str,
        category: CategoryKey,
        created_at: i64,
    ) -> Result<SavedQuestion> {
        let conn = self.conn.lock();

        let category_id: Option<i64> = conn
            .prepare_cached("SELECT id FROM chatbot_categories WHERE name = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![category.as_str()], |row| row.get(0))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        let category_id = category_id
            .ok_or_else(|| Error::NotFound(format!("Categoría no encontrada: {}", category)))?;

        let id = conn
            .prepare_cached(
                "INSERT INTO chatbot_questions (user_id, question, category_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![user_id, question, category_id, created_at])
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Saved question {} for user {} as {}", id, user_id, category);
        Ok(SavedQuestion {
            id,
            user_id,
            question: question.to_string(),
            category,
            created_at,
        })
    }

    pub fn count_questions(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM chatbot_questions", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Statistics
    // ---------------------------------------------------------------

    /// Lifetime question counts of a user. Users without questions get zeros.
    pub fn user_stats(&self, user_id: i64) -> Result<UserStats> {
        let counts = self.category_counts(Some(user_id), None)?;
        Ok(UserStats {
            user_id,
            weighted_score: counts.weighted_score(),
            counts,
            updated_at: Utc::now(),
        })
    }

    /// Question counts of a user over the last `days` days (1..=30).
    pub fn user_stats_since(&self, user_id: i64, days: u32) -> Result<PeriodStats> {
        if days == 0 || days > MAX_PERIOD_DAYS {
            return Err(Error::Validation(format!(
                "El parámetro days debe estar entre 1 y {}",
                MAX_PERIOD_DAYS
            )));
        }
        let end_date = Utc::now();
        let start_date = end_date - Duration::days(i64::from(days));
        let counts = self.category_counts(Some(user_id), Some(start_date.timestamp_millis()))?;

        Ok(PeriodStats {
            user_id,
            period: StatsPeriod {
                days,
                start_date,
                end_date,
            },
            total_questions: counts.total(),
            weighted_score: counts.weighted_score(),
            counts,
        })
    }

    /// Favourite category and distribution of a user.
    pub fn user_preferences(&self, user_id: i64) -> Result<UserPreferences> {
        let counts = self.category_counts(Some(user_id), None)?;
        Ok(UserPreferences {
            primary_interest: counts.primary(),
            total_questions: counts.total(),
            category_distribution: CategoryKey::ALL
                .iter()
                .map(|k| CategoryShare {
                    name: *k,
                    count: counts.get(*k),
                })
                .collect(),
            weighted_score: counts.weighted_score(),
        })
    }

    /// Aggregates over every user.
    pub fn global_stats(&self) -> Result<GlobalStats> {
        let counts = self.category_counts(None, None)?;
        let total_users: i64 = {
            let conn = self.conn.lock();
            conn.query_row(
                "SELECT COUNT(DISTINCT user_id) FROM chatbot_questions",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::Database(e.to_string()))?
        };

        let average_weighted_score = if total_users > 0 {
            let avg = counts.weighted_score() / total_users as f64;
            (avg * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(GlobalStats {
            total_users,
            total_questions: counts.total(),
            category_distribution: counts.to_map(),
            average_weighted_score,
        })
    }

    /// Count questions per category, optionally for one user and from a
    /// start time (ms) onwards.
    fn category_counts(&self, user_id: Option<i64>, since: Option<i64>) -> Result<CategoryCounts> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT c.name, COUNT(q.id)
                 FROM chatbot_questions q
                 JOIN chatbot_categories c ON c.id = q.category_id
                 WHERE (?1 IS NULL OR q.user_id = ?1)
                   AND (?2 IS NULL OR q.created_at >= ?2)
                 GROUP BY c.name",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id, since], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut counts = CategoryCounts::default();
        for row in rows {
            let (name, count) = row.map_err(|e| Error::Database(e.to_string()))?;
            match CategoryKey::parse(&name) {
                Some(key) => counts.add(key, count),
                None => warn!("Ignoring questions of unknown category: {}", name),
            }
        }
        Ok(counts)
    }
}

/// Row id of a category; categories are seeded in catalog order from 1.
fn category_id(key: CategoryKey) -> i64 {
    key.index() as i64 + 1
}
