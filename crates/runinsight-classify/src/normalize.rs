//! Question normalization and tokenization.
//!
//! Lowercases, drops punctuation while keeping Spanish accented letters,
//! collapses whitespace and reduces plurals. Catalog keywords go through the
//! same pipeline so that token comparison is plain string equality.

pub mod plural;

use runinsight_core::{Error, Result};
use unicode_normalization::UnicodeNormalization;

use plural::singularize;

/// Non-ASCII letters kept by the normalizer.
const SPANISH_LETTERS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ñ', 'ü'];

/// Normalize a raw question.
///
/// Fails with [`Error::InvalidInput`] when the text is empty or only
/// whitespace. Text made only of punctuation is valid and normalizes to an
/// empty string.
pub fn normalize(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput(
            "El texto debe ser una cadena válida".to_string(),
        ));
    }
    Ok(normalize_words(text))
}

/// The normalization pipeline without the input check. Used for catalog
/// keywords, which are known to be non-empty.
pub(crate) fn normalize_words(text: &str) -> String {
    let lowered: String = text.nfc().collect::<String>().to_lowercase();

    let cleaned: String = lowered
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .map(singularize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || SPANISH_LETTERS.contains(&c)
}

/// Split normalized text into tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
