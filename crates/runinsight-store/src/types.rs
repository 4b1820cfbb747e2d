//! Data types for stored questions and user statistics.
//!
//! Stats payloads keep the field names the RunInsight frontend reads
//! (`preguntas_nutricion`, `score_ponderado`, ...).

use chrono::{DateTime, Utc};
use runinsight_core::CategoryKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A category row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: CategoryKey,
    pub display_name: String,
    pub weight: u32,
    pub description: String,
}

/// A question row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuestion {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub category: CategoryKey,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Number of questions per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(rename = "preguntas_nutricion")]
    pub nutrition: i64,
    #[serde(rename = "preguntas_entrenamiento")]
    pub training: i64,
    #[serde(rename = "preguntas_recuperacion")]
    pub recovery: i64,
    #[serde(rename = "preguntas_prevencion_lesiones")]
    pub prevention: i64,
    #[serde(rename = "preguntas_equipamiento")]
    pub equipment: i64,
}

impl CategoryCounts {
    pub fn get(&self, key: CategoryKey) -> i64 {
        match key {
            CategoryKey::Training => self.training,
            CategoryKey::Nutrition => self.nutrition,
            CategoryKey::Recovery => self.recovery,
            CategoryKey::Prevention => self.prevention,
            CategoryKey::Equipment => self.equipment,
        }
    }

    pub fn add(&mut self, key: CategoryKey, count: i64) {
        let slot = match key {
            CategoryKey::Training => &mut self.training,
            CategoryKey::Nutrition => &mut self.nutrition,
            CategoryKey::Recovery => &mut self.recovery,
            CategoryKey::Prevention => &mut self.prevention,
            CategoryKey::Equipment => &mut self.equipment,
        };
        *slot += count;
    }

    pub fn total(&self) -> i64 {
        CategoryKey::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// `Σ count × weight`, rounded to two decimals.
    pub fn weighted_score(&self) -> f64 {
        let total: f64 = CategoryKey::ALL
            .iter()
            .map(|k| self.get(*k) as f64 * k.weight() as f64)
            .sum();
        (total * 100.0).round() / 100.0
    }

    /// The category with the most questions. Ties keep the earlier category
    /// in catalog order, so an empty history reports training.
    pub fn primary(&self) -> CategoryKey {
        let mut best = CategoryKey::ALL[0];
        for key in CategoryKey::ALL {
            if self.get(key) > self.get(best) {
                best = key;
            }
        }
        best
    }

    pub fn to_map(&self) -> BTreeMap<CategoryKey, i64> {
        CategoryKey::ALL.iter().map(|k| (*k, self.get(*k))).collect()
    }
}

/// Lifetime statistics of one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    #[serde(rename = "score_ponderado")]
    pub weighted_score: f64,
    #[serde(rename = "ultima_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Time window of a [`PeriodStats`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPeriod {
    pub days: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Statistics of one user over the last few days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodStats {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub period: StatsPeriod,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    #[serde(rename = "totalQuestions")]
    pub total_questions: i64,
    #[serde(rename = "score_ponderado")]
    pub weighted_score: f64,
}

/// One entry of a category distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: CategoryKey,
    pub count: i64,
}

/// What a user asks about most.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub primary_interest: CategoryKey,
    pub total_questions: i64,
    pub category_distribution: Vec<CategoryShare>,
    pub weighted_score: f64,
}

/// Aggregates over all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_users: i64,
    pub total_questions: i64,
    pub category_distribution: BTreeMap<CategoryKey, i64>,
    pub average_weighted_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_score() {
        let counts = CategoryCounts {
            nutrition: 5,
            training: 12,
            recovery: 3,
            prevention: 2,
            equipment: 1,
        };
        // 12*3 + 5*2 + 3*2 + 2*2 + 1*1
        assert_eq!(counts.weighted_score(), 57.0);
        assert_eq!(counts.total(), 23);
    }

    #[test]
    fn test_primary_ties_keep_catalog_order() {
        assert_eq!(CategoryCounts::default().primary(), CategoryKey::Training);

        let mut counts = CategoryCounts::default();
        counts.add(CategoryKey::Equipment, 2);
        counts.add(CategoryKey::Recovery, 2);
        assert_eq!(counts.primary(), CategoryKey::Recovery);
    }

    #[test]
    fn test_user_stats_field_names() {
        let stats = UserStats {
            user_id: 123,
            counts: CategoryCounts {
                nutrition: 1,
                ..Default::default()
            },
            weighted_score: 2.0,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["userId"], 123);
        assert_eq!(json["preguntas_nutricion"], 1);
        assert_eq!(json["preguntas_prevencion_lesiones"], 0);
        assert_eq!(json["score_ponderado"], 2.0);
        assert!(json["ultima_actualizacion"].is_string());
    }
}
