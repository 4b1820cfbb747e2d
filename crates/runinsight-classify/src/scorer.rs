//! Per-category keyword scoring.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::normalize::tokenize;

/// Match statistics of one category for one question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// `match_ratio * 100 * weight`, doubled when a strong word applies.
    pub score: f64,
    pub match_count: usize,
    pub total_tokens: usize,
    pub match_ratio: f64,
}

/// Score normalized text against one category.
///
/// A token matches when it is exactly equal to one of the category's
/// keywords.
pub fn score(normalized_text: &str, category: &Category) -> CategoryScore {
    let tokens = tokenize(normalized_text);
    if tokens.is_empty() {
        return CategoryScore::default();
    }

    let match_count = tokens
        .iter()
        .filter(|t| category.keywords.contains(**t))
        .count();
    let total_tokens = tokens.len();
    let match_ratio = match_count as f64 / total_tokens as f64;

    CategoryScore {
        score: match_ratio * 100.0 * category.weight as f64,
        match_count,
        total_tokens,
        match_ratio,
    }
}
