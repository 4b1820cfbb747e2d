//! Category catalog: keywords, strong words and weights per category.
//!
//! The catalog is built once and shared read-only. Every keyword and strong
//! word is passed through [`normalize_words`] at build time.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use runinsight_core::{CategoryKey, Error, Result};

use crate::normalize::normalize_words;

/// Raw definition of one category, before normalization.
#[derive(Debug, Clone)]
pub struct CategoryDefinition {
    pub key: CategoryKey,
    pub keywords: Vec<String>,
    /// Words that make the category a clear winner when present.
    pub strong_words: Vec<String>,
    pub weight: u32,
}

impl CategoryDefinition {
    pub fn new(key: CategoryKey, keywords: &[&str], strong_words: &[&str], weight: u32) -> Self {
        Self {
            key,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            strong_words: strong_words.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }
}

/// A normalized category ready for scoring.
#[derive(Debug, Clone)]
pub struct Category {
    pub key: CategoryKey,
    pub keywords: HashSet<String>,
    pub strong_words: Vec<String>,
    pub weight: u32,
}

impl Category {
    fn from_definition(def: CategoryDefinition) -> Self {
        let keywords = def
            .keywords
            .iter()
            .map(|k| normalize_words(k))
            .filter(|k| !k.is_empty())
            .collect();

        let mut strong_words: Vec<String> = Vec::new();
        for word in def.strong_words.iter().map(|w| normalize_words(w)) {
            if !word.is_empty() && !strong_words.contains(&word) {
                strong_words.push(word);
            }
        }

        Self {
            key: def.key,
            keywords,
            strong_words,
            weight: def.weight,
        }
    }

    /// Whether the normalized text contains any of this category's strong
    /// words. Containment is by substring, so multi-word entries work.
    pub fn has_strong_word(&self, normalized_text: &str) -> bool {
        self.strong_words
            .iter()
            .any(|w| normalized_text.contains(w.as_str()))
    }
}

/// The five categories in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from definitions. Requires exactly one definition
    /// per [`CategoryKey`] and a positive weight for each.
    pub fn new(definitions: Vec<CategoryDefinition>) -> Result<Self> {
        for key in CategoryKey::ALL {
            let count = definitions.iter().filter(|d| d.key == key).count();
            if count != 1 {
                return Err(Error::Config(format!(
                    "category {} defined {} times",
                    key, count
                )));
            }
        }
        if definitions.len() != CategoryKey::ALL.len() {
            return Err(Error::Config(format!(
                "expected {} categories, got {}",
                CategoryKey::ALL.len(),
                definitions.len()
            )));
        }
        if let Some(def) = definitions.iter().find(|d| d.weight == 0) {
            return Err(Error::Config(format!("category {} has weight 0", def.key)));
        }
        Ok(Self::build(definitions))
    }

    fn build(mut definitions: Vec<CategoryDefinition>) -> Self {
        definitions.sort_by_key(|d| d.key);
        Self {
            categories: definitions.into_iter().map(Category::from_definition).collect(),
        }
    }

    /// The shared built-in catalog.
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN.clone()
    }

    pub fn get(&self, key: CategoryKey) -> &Category {
        &self.categories[key.index()]
    }

    /// Categories in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::build(builtin_definitions())));

/// Definitions of the built-in Spanish running/fitness catalog.
pub fn builtin_definitions() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(
            CategoryKey::Training,
            TRAINING_KEYWORDS,
            &[],
            CategoryKey::Training.weight(),
        ),
        CategoryDefinition::new(
            CategoryKey::Nutrition,
            NUTRITION_KEYWORDS,
            NUTRITION_STRONG,
            CategoryKey::Nutrition.weight(),
        ),
        CategoryDefinition::new(
            CategoryKey::Recovery,
            RECOVERY_KEYWORDS,
            RECOVERY_STRONG,
            CategoryKey::Recovery.weight(),
        ),
        CategoryDefinition::new(
            CategoryKey::Prevention,
            PREVENTION_KEYWORDS,
            PREVENTION_STRONG,
            CategoryKey::Prevention.weight(),
        ),
        CategoryDefinition::new(
            CategoryKey::Equipment,
            EQUIPMENT_KEYWORDS,
            EQUIPMENT_STRONG,
            CategoryKey::Equipment.weight(),
        ),
    ]
}

const TRAINING_KEYWORDS: &[&str] = &[
    // General
    "entrenar", "ejercicio", "ejercicios", "rutina", "rutinas", "entrenamiento",
    "entrenamientos", "workout", "gimnasio",
    // Series and reps
    "series", "repeticiones", "reps", "sets", "circuitos", "superseries",
    // Intensity and volume
    "intensidad", "frecuencia", "volumen", "progresión", "sobrecarga",
    // Planning
    "plan", "programa", "sesión", "periodización", "ciclos", "fases",
    // Warm up / cool down
    "calentamiento", "enfriamiento",
    // Technique
    "técnica", "forma", "postura", "ejecución", "movimiento", "gesto",
    // Endurance and cardio
    "resistencia", "cardio", "aeróbico", "anaeróbico", "endurance",
    // Running
    "correr", "carrera", "running", "jogging", "trotar", "sprint",
    // Metrics
    "velocidad", "distancia", "kilómetros", "km", "minutos", "tiempo",
    "ritmo", "paso", "cadencia", "fc",
    // Goals
    "objetivo", "meta", "lograr", "alcanzar", "conseguir",
    // Training types
    "intervalos", "fartlek", "fuerza", "hiit", "pesas", "mancuernas",
    // Exercises
    "sentadillas", "dominadas", "flexiones", "plancha", "burpees",
];

const NUTRITION_KEYWORDS: &[&str] = &[
    // Basics
    "comer", "alimentación", "dieta", "nutrición", "comida", "alimento", "alimentos",
    // Macronutrients
    "proteína", "proteínas", "carbohidratos", "grasas", "lípidos", "fibra", "azúcar",
    // Micronutrients
    "vitaminas", "minerales", "calcio", "hierro", "magnesio", "potasio", "sodio",
    // Hydration
    "hidratación", "hidratar", "agua", "bebida", "bebidas", "líquido", "líquidos",
    // Supplements
    "suplementos", "suplemento", "creatina", "bcaa",
    // Meals
    "desayuno", "almuerzo", "cena", "snack", "merienda", "colación",
    // Timing
    "antes", "después", "durante",
    // Drinks
    "batido", "smoothie", "jugo", "té", "café",
    // Concepts
    "calorías", "macronutrientes", "micronutrientes", "metabolismo", "digestión",
    // Foods
    "pollo", "pescado", "huevos", "leche", "yogur", "queso", "frutas", "verduras",
    "arroz", "pasta", "pan", "avena", "nueces", "almendras", "semillas",
];

const NUTRITION_STRONG: &[&str] = &[
    "comer", "alimentación", "dieta", "nutrición", "proteína", "proteínas",
    "calorías", "suplementos", "desayuno", "almuerzo", "cena", "batido",
    "agua", "hidratación", "creatina", "bcaa",
];

const RECOVERY_KEYWORDS: &[&str] = &[
    // Basics
    "recuperación", "recuperar", "descanso", "descansar", "reposo", "pausa",
    // Sleep
    "sueño", "dormir",
    // Fatigue
    "fatiga", "cansancio", "cansado", "agotado", "exhausto", "tired",
    // Relaxation
    "relajar", "relajación", "relajarse", "tranquilidad", "paz",
    // Muscle recovery
    "regeneración", "regenerar", "reparación",
    // Stretching
    "estiramiento", "estirar", "estiramientos", "flexibilidad", "mobilidad",
    "elongación", "elongar", "stretching", "yoga", "pilates",
    // Techniques
    "masaje", "masajear", "automasaje", "rodillo", "pelota",
    "hielo", "calor", "compresión", "elevación", "rice", "crioterapia",
    // Therapies
    "fisioterapia", "osteopatía", "quiropraxia", "acupuntura", "reflexología",
    "periodización",
    // Mental recovery
    "estrés", "ansiedad", "meditación", "mindfulness",
    // Specific techniques
    "contraste", "sauna", "hidroterapia", "electroestimulación", "kinesiotape",
];

const RECOVERY_STRONG: &[&str] = &[
    "estiramiento", "estirar", "estiramientos", "flexibilidad", "yoga", "pilates",
    "foam roller", "rodillo", "masaje", "relajación", "relajar", "dormir", "sueño",
    "descanso", "descansar", "recuperación", "recuperar", "fatiga", "cansancio",
];

const PREVENTION_KEYWORDS: &[&str] = &[
    // Injuries
    "lesión", "lesiones", "lesionado", "lesionarse", "daño", "trauma",
    // Prevention
    "prevención", "prevenir", "evitar", "proteger", "cuidar", "cuidado",
    // Pain
    "dolor", "dolores", "molestia", "molestias", "incomodidad", "malestar",
    // Problems
    "problema", "problemas", "inconveniente", "dificultad", "obstáculo",
    // Safety
    "seguridad", "seguro", "protección", "precaución", "cautela",
    // Risk
    "riesgo", "peligro", "amenaza", "vulnerable", "susceptible",
    // Treatment
    "tratamiento", "tratar", "cura", "sanar", "curar", "reparar",
    "rehabilitación", "rehabilitar", "fisioterapia",
    // Supports
    "vendaje", "venda", "vendajes", "soporte", "férula", "ortesis",
    // Strengthening
    "fortalecimiento", "fortalecer", "fortalecido", "resistencia",
    // Preventive stretching and warm up
    "estiramiento", "estirar", "flexibilidad", "mobilidad",
    "calentar", "calentamiento", "preparación", "preparar",
    "enfriamiento", "enfriar",
    // Motor control
    "propiocepción", "equilibrio", "estabilidad", "coordinación",
];

const PREVENTION_STRONG: &[&str] = &[
    "lesión", "lesiones", "prevención", "prevenir", "dolor", "molestia",
    "vendaje", "fortalecimiento", "estabilidad", "propiocepción",
];

const EQUIPMENT_KEYWORDS: &[&str] = &[
    // Footwear
    "zapatillas", "tenis", "calzado", "zapatos", "botas", "sandalias",
    // Clothing
    "ropa", "camiseta", "pantalón", "short", "calcetas", "calcetines",
    "leggings", "mallas", "top", "chaqueta", "sudaderas", "hoodie", "polo",
    "camisa",
    // Headwear and eyewear
    "gorra", "sombrero", "bandana", "banda", "diadema", "visor", "gafas", "lentes",
    // Technology
    "reloj", "smartwatch", "pulsómetro", "gps", "podómetro",
    "app", "aplicación", "tecnología", "gadget", "dispositivo",
    // Hydration
    "botella", "termo", "cantimplora", "hidratación",
    // Bags
    "mochila", "bolsa", "bolso", "riñonera", "cartera",
    // Belts and supports
    "cinturón", "faja", "rodilleras", "coderas", "muñequeras", "tobilleras",
    // Audio
    "auriculares", "audífonos", "headphones", "bluetooth", "inalámbricos",
    "cableados", "earbuds", "airpods",
    // Training gear
    "pesas", "mancuernas", "barras", "discos", "kettlebells", "pelotas",
    "cuerdas", "mat", "colchoneta", "rodillo",
    // Machines
    "bicicleta", "bici", "spinning", "treadmill", "cinta", "eliptica",
    "stepper", "escaladora", "remadora",
    // Accessories
    "accesorio", "accesorios", "herramienta", "herramientas", "material",
    "materiales", "instrumento", "instrumentos", "aparato", "aparatos",
    // Shopping terms
    "mejores", "usar", "recomiendas", "recomendación", "opción",
    "deportivo", "deportivos", "fitness", "gym", "entrenamiento",
    // Brands
    "nike", "adidas", "puma", "reebok", "lululemon",
    "garmin", "polar", "suunto", "fitbit",
];

const EQUIPMENT_STRONG: &[&str] = &[
    "zapatillas", "tenis", "calzado", "ropa", "camiseta", "pantalón", "short",
    "reloj", "smartwatch", "pulsómetro", "auriculares", "audífonos", "mochila",
    "botella", "cinturón", "bandas elásticas", "pesas", "mancuernas",
    "nike", "adidas", "garmin", "fitbit", "under armour",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(Catalog::new(builtin_definitions()).is_ok());
        let catalog = Catalog::builtin();
        let keys: Vec<CategoryKey> = catalog.iter().map(|c| c.key).collect();
        assert_eq!(keys, CategoryKey::ALL.to_vec());
    }

    #[test]
    fn test_keywords_are_normalized() {
        let catalog = Catalog::builtin();
        let training = catalog.get(CategoryKey::Training);
        assert!(training.keywords.contains("ejercicio"));
        assert!(!training.keywords.contains("ejercicios"));
        assert!(catalog.get(CategoryKey::Nutrition).keywords.contains("nuez"));
        for category in catalog.iter() {
            for kw in &category.keywords {
                assert_eq!(kw, &normalize_words(kw));
                assert!(!kw.contains(' '), "multi-word keyword {kw:?}");
            }
        }
    }

    #[test]
    fn test_training_has_no_strong_words() {
        let catalog = Catalog::builtin();
        assert!(catalog.get(CategoryKey::Training).strong_words.is_empty());
        assert!(!catalog.get(CategoryKey::Prevention).strong_words.is_empty());
    }

    #[test]
    fn test_strong_word_substring() {
        let catalog = Catalog::builtin();
        let recovery = catalog.get(CategoryKey::Recovery);
        assert!(recovery.has_strong_word("uso un foam roller despué de correr"));
        assert!(!recovery.has_strong_word("que zapatilla comprar"));
    }

    #[test]
    fn test_rejects_missing_category() {
        let mut defs = builtin_definitions();
        defs.pop();
        assert!(matches!(Catalog::new(defs), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let mut defs = builtin_definitions();
        defs.push(CategoryDefinition::new(CategoryKey::Nutrition, &["agua"], &[], 2));
        assert!(matches!(Catalog::new(defs), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_weight() {
        let mut defs = builtin_definitions();
        defs[0].weight = 0;
        assert!(matches!(Catalog::new(defs), Err(Error::Config(_))));
    }

    #[test]
    fn test_definitions_sorted_into_catalog_order() {
        let mut defs = builtin_definitions();
        defs.reverse();
        let catalog = Catalog::new(defs).unwrap();
        assert_eq!(catalog.iter().next().unwrap().key, CategoryKey::Training);
    }
}
