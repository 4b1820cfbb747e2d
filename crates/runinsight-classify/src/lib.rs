//! RunInsight Classify — keyword classification of running and fitness questions.
//!
//! Questions are normalized, scored against a fixed catalog of five
//! categories, and resolved to a single category with a confidence value.

pub mod catalog;
pub mod classifier;
pub mod normalize;
pub mod scorer;

pub use catalog::{Catalog, Category, CategoryDefinition};
pub use classifier::{ClassificationResult, Classifier, LOW_CONFIDENCE_THRESHOLD};
pub use normalize::normalize;
pub use scorer::CategoryScore;

/// Classify a question with the built-in catalog.
pub fn classify(question: &str) -> runinsight_core::Result<ClassificationResult> {
    Classifier::default().classify(question)
}
