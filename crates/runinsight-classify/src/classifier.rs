//! Question classifier: scoring, tie-break, strong-word override,
//! confidence and low-confidence fallback.

use std::collections::BTreeMap;
use std::sync::Arc;

use runinsight_core::{CategoryKey, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::normalize::normalize;
use crate::scorer::{score, CategoryScore};

/// Below this confidence (in percent) the default category is used.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 20.0;

/// Multiplier applied to a category whose strong words appear in the text.
const STRONG_WORD_BOOST: f64 = 2.0;

/// Outcome of classifying one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Display name of the winning category (e.g. `Nutrición`).
    pub category: String,
    pub category_key: CategoryKey,
    /// Percentage in [0, 100], rounded to two decimals.
    pub confidence: f64,
    /// Scores of all five categories, after strong-word boosts.
    pub scores: BTreeMap<CategoryKey, CategoryScore>,
    pub normalized_text: String,
    pub original_text: String,
}

/// Keyword classifier over a shared catalog.
#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: Arc<Catalog>,
}

impl Classifier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Classify a question.
    ///
    /// [`Error::InvalidInput`] from normalization is returned unchanged; any
    /// other failure is reported as [`Error::Classification`].
    pub fn classify(&self, question: &str) -> Result<ClassificationResult> {
        debug!("Classifying question: {:?}", question);

        let normalized_text = normalize(question)?;
        debug!("Normalized text: {:?}", normalized_text);

        let result = self.classify_normalized(question, normalized_text).map_err(|e| match e {
            Error::Classification(_) => e,
            other => Error::Classification(other.to_string()),
        })?;

        info!(
            "Classified as {} (confidence: {:.2}%)",
            result.category, result.confidence
        );
        Ok(result)
    }

    fn classify_normalized(
        &self,
        question: &str,
        normalized_text: String,
    ) -> Result<ClassificationResult> {
        let mut scores: BTreeMap<CategoryKey, CategoryScore> = BTreeMap::new();
        for category in self.catalog.iter() {
            let s = score(&normalized_text, category);
            if !s.score.is_finite() {
                return Err(Error::Classification(format!(
                    "non-finite score for category {}",
                    category.key
                )));
            }
            scores.insert(category.key, s);
        }

        // Initial winner: strictly higher score, or equal score with more
        // matches. Exact ties keep the earlier category.
        let mut max_score = 0.0_f64;
        let mut best_match_count = 0_usize;
        let mut best: Option<CategoryKey> = None;
        for (key, s) in &scores {
            if s.score > max_score || (s.score == max_score && s.match_count > best_match_count) {
                max_score = s.score;
                best_match_count = s.match_count;
                best = Some(*key);
            }
        }

        // Strong-word override. Boosts are written back into `scores`
        // because the confidence total below is computed from them.
        for (key, s) in scores.iter_mut() {
            let category = self.catalog.get(*key);
            if s.match_count > 0 && category.has_strong_word(&normalized_text) {
                s.score *= STRONG_WORD_BOOST;
                debug!("Strong word boost for {}: {:.2}", key, s.score);
                if s.score > max_score {
                    max_score = s.score;
                    best = Some(*key);
                }
            }
        }

        let total_score: f64 = scores.values().map(|s| s.score).sum();
        let raw_confidence = if total_score > 0.0 {
            max_score / total_score * 100.0
        } else {
            0.0
        };

        let category_key = match best {
            Some(key) if raw_confidence >= LOW_CONFIDENCE_THRESHOLD => key,
            _ => {
                warn!(
                    "Low confidence ({:.2}%), using default category",
                    raw_confidence
                );
                CategoryKey::DEFAULT
            }
        };

        Ok(ClassificationResult {
            category: category_key.display_name().to_string(),
            category_key,
            confidence: round2(raw_confidence),
            scores,
            normalized_text,
            original_text: question.to_string(),
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryDefinition;

    fn classify(question: &str) -> ClassificationResult {
        Classifier::default().classify(question).unwrap()
    }

    #[test]
    fn test_nutrition_question() {
        let result = classify("¿Qué debo comer antes de correr?");
        assert_eq!(result.category, "Nutrición");
        assert_eq!(result.category_key, CategoryKey::Nutrition);
        assert_eq!(result.confidence, 72.73);
        assert_eq!(result.original_text, "¿Qué debo comer antes de correr?");
        assert_eq!(result.normalized_text, "qué debo comer ante de correr");
    }

    #[test]
    fn test_training_question() {
        let result = classify("¿Cómo debo entrenar para mejorar mi resistencia?");
        assert_eq!(result.category, "Entrenamiento");
        assert_eq!(result.confidence, 75.0);
        // "resistencia" is also a prevention keyword, without a strong word
        let prevention = result.scores[&CategoryKey::Prevention];
        assert_eq!(prevention.match_count, 1);
        assert!((prevention.score - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_prevention_question_is_boosted() {
        let result = classify("¿Cómo puedo prevenir lesiones al correr?");
        assert_eq!(result.category, "Prevención");
        assert_eq!(result.confidence, 72.73);
        let prevention = result.scores[&CategoryKey::Prevention];
        assert!((prevention.score - 400.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_equipment_overtakes_earlier_winner() {
        // Training leads on raw score; the equipment boost flips the result.
        let result = classify("¿Qué zapatillas son mejores para correr?");
        assert_eq!(result.category, "Equipamiento");
        assert!((result.scores[&CategoryKey::Training].score - 50.0).abs() < 1e-9);
        assert_eq!(result.confidence, 57.14);
    }

    #[test]
    fn test_no_matches_falls_back_to_training() {
        let result = classify("Hola, ¿cómo estás?");
        assert_eq!(result.category, "Entrenamiento");
        assert_eq!(result.confidence, 0.0);
        assert!(result.scores.values().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_punctuation_only_question() {
        let result = classify("¿?");
        assert_eq!(result.normalized_text, "");
        assert_eq!(result.category, "Entrenamiento");
        assert!(result.scores.values().all(|s| s.total_tokens == 0));
    }

    #[test]
    fn test_empty_question_is_invalid_input() {
        let classifier = Classifier::default();
        assert!(matches!(classifier.classify(""), Err(Error::InvalidInput(_))));
        assert!(matches!(classifier.classify("   "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_equal_boosted_scores_keep_catalog_order() {
        // Both nutrition and prevention match once and both get boosted;
        // the later boost only ties, so nutrition keeps the title.
        let result = classify("agua lesión");
        assert_eq!(result.category, "Nutrición");
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn test_tie_breaks_on_match_count() {
        let mut defs = vec![
            CategoryDefinition::new(CategoryKey::Training, &["zzz"], &[], 3),
            CategoryDefinition::new(CategoryKey::Nutrition, &["uno"], &[], 2),
            CategoryDefinition::new(CategoryKey::Recovery, &["zzz"], &[], 2),
            CategoryDefinition::new(CategoryKey::Prevention, &["zzz"], &[], 2),
            CategoryDefinition::new(CategoryKey::Equipment, &["dos", "tres"], &[], 1),
        ];
        let classifier = Classifier::new(Arc::new(Catalog::new(defs.clone()).unwrap()));
        let result = classifier.classify("uno dos tres").unwrap();
        assert_eq!(
            result.scores[&CategoryKey::Nutrition].score,
            result.scores[&CategoryKey::Equipment].score
        );
        assert_eq!(result.category_key, CategoryKey::Equipment);

        // Same score and same match count: the earlier category wins.
        defs[4] = CategoryDefinition::new(CategoryKey::Equipment, &["dos"], &[], 2);
        let classifier = Classifier::new(Arc::new(Catalog::new(defs).unwrap()));
        let result = classifier.classify("uno dos").unwrap();
        assert_eq!(result.category_key, CategoryKey::Nutrition);
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn test_strong_word_needs_a_keyword_match() {
        let defs = vec![
            CategoryDefinition::new(CategoryKey::Training, &["correr"], &[], 3),
            CategoryDefinition::new(CategoryKey::Nutrition, &["zzz"], &["correr"], 2),
            CategoryDefinition::new(CategoryKey::Recovery, &["zzz"], &[], 2),
            CategoryDefinition::new(CategoryKey::Prevention, &["zzz"], &[], 2),
            CategoryDefinition::new(CategoryKey::Equipment, &["zzz"], &[], 1),
        ];
        let classifier = Classifier::new(Arc::new(Catalog::new(defs).unwrap()));
        let result = classifier.classify("correr").unwrap();
        assert_eq!(result.category_key, CategoryKey::Training);
        assert_eq!(result.scores[&CategoryKey::Nutrition].score, 0.0);
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_result_invariants() {
        let questions = [
            "¿Qué debo comer antes de correr?",
            "¿Cuánto tiempo debo descansar entre entrenamientos?",
            "¿Qué zapatillas me recomiendas?",
            "Me duele la rodilla después de 10 km, ¿uso vendaje o hielo?",
            "¿Cuántos kilómetros debo correr en 30 minutos?",
            "¿Qué debo comer antes de correr? 🏃‍♂️",
            "Hola, ¿cómo estás?",
            "yoga pilates estiramientos y un batido de proteínas",
        ];
        let classifier = Classifier::default();
        for q in questions {
            let result = classifier.classify(q).unwrap();
            assert_eq!(result.scores.len(), 5, "{q}");
            let tokens = result.scores[&CategoryKey::Training].total_tokens;
            for s in result.scores.values() {
                assert!(s.match_count <= s.total_tokens);
                assert_eq!(s.total_tokens, tokens);
            }
            assert!((0.0..=100.0).contains(&result.confidence), "{q}");
            if result.confidence < LOW_CONFIDENCE_THRESHOLD {
                assert_eq!(result.category, "Entrenamiento");
            }
            assert_eq!(classifier.classify(q).unwrap(), result, "not deterministic: {q}");
        }
    }

    #[test]
    fn test_long_repeated_question() {
        let question = "¿Qué debo comer antes de correr? ".repeat(50);
        let result = classify(&question);
        assert_eq!(result.category, "Nutrición");
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_result_json_shape() {
        let result = classify("¿Qué debo comer antes de correr?");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "Nutrición");
        assert_eq!(json["categoryKey"], "nutricion");
        assert_eq!(json["normalizedText"], "qué debo comer ante de correr");
        assert!(json["originalText"].is_string());
        let scores = json["scores"].as_object().unwrap();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores["nutricion"]["matchCount"], 2);
        assert_eq!(scores["nutricion"]["totalTokens"], 6);
        assert!(scores["equipamiento"]["matchRatio"].is_number());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(72.727272), 72.73);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(57.142857), 57.14);
    }
}
