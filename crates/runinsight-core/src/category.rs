//! The five fixed question categories.

use serde::{Deserialize, Serialize};

/// Question category. Declaration order is the catalog order, which decides
/// exact ties during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryKey {
    #[serde(rename = "entrenamiento")]
    Training,
    #[serde(rename = "nutricion")]
    Nutrition,
    #[serde(rename = "recuperacion")]
    Recovery,
    #[serde(rename = "prevencion")]
    Prevention,
    #[serde(rename = "equipamiento")]
    Equipment,
}

impl CategoryKey {
    /// All categories in catalog order.
    pub const ALL: [CategoryKey; 5] = [
        Self::Training,
        Self::Nutrition,
        Self::Recovery,
        Self::Prevention,
        Self::Equipment,
    ];

    /// Category used when a classification is not confident enough.
    pub const DEFAULT: CategoryKey = Self::Training;

    /// Internal key, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "entrenamiento",
            Self::Nutrition => "nutricion",
            Self::Recovery => "recuperacion",
            Self::Prevention => "prevencion",
            Self::Equipment => "equipamiento",
        }
    }

    /// User-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Training => "Entrenamiento",
            Self::Nutrition => "Nutrición",
            Self::Recovery => "Recuperación",
            Self::Prevention => "Prevención",
            Self::Equipment => "Equipamiento",
        }
    }

    /// Weight shared by the classifier and the user stats score.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Training => 3,
            Self::Nutrition | Self::Recovery | Self::Prevention => 2,
            Self::Equipment => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Training => "Preguntas sobre rutinas, ejercicios, técnicas",
            Self::Nutrition => "Preguntas sobre alimentación, suplementos",
            Self::Recovery => "Preguntas sobre descanso, recuperación",
            Self::Prevention => "Preguntas sobre prevención de lesiones",
            Self::Equipment => "Preguntas sobre ropa, calzado, tecnología",
        }
    }

    /// Position in catalog order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse an internal key or a display name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name || k.display_name() == name)
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_index() {
        for (i, key) in CategoryKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
        assert!(CategoryKey::Training < CategoryKey::Equipment);
    }

    #[test]
    fn test_parse_accepts_both_names() {
        assert_eq!(CategoryKey::parse("nutricion"), Some(CategoryKey::Nutrition));
        assert_eq!(CategoryKey::parse("Prevención"), Some(CategoryKey::Prevention));
        assert_eq!(CategoryKey::parse("general"), None);
    }

    #[test]
    fn test_serde_uses_internal_keys() {
        let json = serde_json::to_string(&CategoryKey::Recovery).unwrap();
        assert_eq!(json, "\"recuperacion\"");
        let back: CategoryKey = serde_json::from_str("\"equipamiento\"").unwrap();
        assert_eq!(back, CategoryKey::Equipment);
    }

    #[test]
    fn test_weights() {
        let weights: Vec<u32> = CategoryKey::ALL.iter().map(|k| k.weight()).collect();
        assert_eq!(weights, vec![3, 2, 2, 2, 1]);
    }
}
