//! Request validation and sanitization for the text-mining routes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const QUESTION_MIN_CHARS: usize = 3;
pub const QUESTION_MAX_CHARS: usize = 1000;
/// Largest user id accepted (2^53 - 1), so ids survive JSON clients that
/// store numbers as doubles.
pub const MAX_SAFE_USER_ID: i64 = (1 << 53) - 1;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());
static JS_SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").unwrap());

/// A validated classification request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyInput {
    pub question: String,
    pub user_id: i64,
}

/// Remove script blocks, `javascript:` and inline event handlers, then trim.
pub fn sanitize_text(text: &str) -> String {
    let text = SCRIPT_RE.replace_all(text, "");
    let text = JS_SCHEME_RE.replace_all(&text, "");
    let text = EVENT_HANDLER_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Validate a `{question, userId}` body. All problems are reported at once.
pub fn validate_classify_body(body: &Value) -> Result<ClassifyInput, Vec<String>> {
    let mut errors = Vec::new();

    let question = match body.get("question") {
        None | Some(Value::Null) => {
            errors.push("La pregunta es requerida".to_string());
            None
        }
        Some(Value::String(raw)) => {
            let question = sanitize_text(raw);
            let chars = question.chars().count();
            if chars == 0 {
                errors.push("La pregunta no puede estar vacía".to_string());
            } else if chars < QUESTION_MIN_CHARS {
                errors.push(format!(
                    "La pregunta debe tener al menos {} caracteres",
                    QUESTION_MIN_CHARS
                ));
            } else if chars > QUESTION_MAX_CHARS {
                errors.push(format!(
                    "La pregunta no puede exceder {} caracteres",
                    QUESTION_MAX_CHARS
                ));
            }
            Some(question)
        }
        Some(_) => {
            errors.push("La pregunta debe ser un texto".to_string());
            None
        }
    };

    let user_id = match body.get("userId") {
        None | Some(Value::Null) => {
            errors.push("El ID de usuario es requerido".to_string());
            None
        }
        Some(value) => match parse_user_id(value) {
            Ok(id) => Some(id),
            Err(msg) => {
                errors.push(msg);
                None
            }
        },
    };

    match (question, user_id) {
        (Some(question), Some(user_id)) if errors.is_empty() => {
            Ok(ClassifyInput { question, user_id })
        }
        _ => Err(errors),
    }
}

/// Parse a user id from a JSON value or a path segment.
///
/// Ids must be exact: anything beyond [`MAX_SAFE_USER_ID`] is rejected
/// rather than rounded.
pub fn parse_user_id(value: &Value) -> Result<i64, String> {
    let exact = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => return Err("El ID de usuario debe ser un número".to_string()),
    };

    let id = match exact {
        Some(id) => id,
        None => {
            // Not an exact i64, so tell fractions apart from out-of-range values
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|n| n.is_finite())
            .ok_or_else(|| "El ID de usuario debe ser un número".to_string())?;

            if number.fract() != 0.0 {
                return Err("El ID de usuario debe ser un número entero".to_string());
            }
            if number > MAX_SAFE_USER_ID as f64 {
                return Err("El ID de usuario es demasiado grande".to_string());
            }
            // Whole floats such as `12.0` are exact in this range
            number as i64
        }
    };

    if id <= 0 {
        return Err("El ID de usuario debe ser positivo".to_string());
    }
    if id > MAX_SAFE_USER_ID {
        return Err("El ID de usuario es demasiado grande".to_string());
    }
    Ok(id)
}
