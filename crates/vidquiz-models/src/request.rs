//! Quiz generation request models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Number of questions when none is requested.
pub const DEFAULT_COUNT: u32 = 10;

/// Output language when none is requested.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Grade level when none is requested.
pub const DEFAULT_GRADE: &str = "Any";

/// Body of `POST /api/generate`.
///
/// Every field is optional on the wire so that a missing URL can be reported
/// as a 400 instead of a deserialization failure. An `options` value that is
/// not an object is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizRequest {
    /// YouTube URL pasted by the user
    #[serde(default)]
    pub url: Option<String>,

    /// Generation options
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Option<QuizOptions>,
}

impl QuizRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            options: None,
        }
    }

    /// The URL, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Options with defaults applied.
    pub fn resolved_options(&self) -> ResolvedOptions {
        self.options.clone().unwrap_or_default().resolve()
    }
}

/// Option bag sent by the input form.
///
/// Fields keep whatever JSON value the client sent; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizOptions {
    /// Number of questions
    #[serde(default)]
    pub count: Option<Value>,

    /// Output language, e.g. "English"
    #[serde(default)]
    pub language: Option<Value>,

    /// Target grade level, e.g. "K-12"
    #[serde(default)]
    pub grade: Option<Value>,
}

/// Options after defaults have been applied, rendered for the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub count: String,
    pub language: String,
    pub grade: String,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        QuizOptions::default().resolve()
    }
}

impl QuizOptions {
    pub fn new(count: u32, language: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            count: Some(Value::from(count)),
            language: Some(Value::String(language.into())),
            grade: Some(Value::String(grade.into())),
        }
    }

    /// Apply defaults. Falsy values (`null`, `false`, `0`, `""`) count as absent.
    pub fn resolve(self) -> ResolvedOptions {
        ResolvedOptions {
            count: option_text(self.count).unwrap_or_else(|| DEFAULT_COUNT.to_string()),
            language: option_text(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            grade: option_text(self.grade).unwrap_or_else(|| DEFAULT_GRADE.to_string()),
        }
    }
}

/// Prompt text for an option value, or `None` when the value is falsy.
fn option_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => number_text(&n),
        other => Some(other.to_string()),
    }
}

/// Whole floats print without a fractional part (`10.0` → `10`).
fn number_text(n: &Number) -> Option<String> {
    let f = n.as_f64()?;
    if f == 0.0 {
        return None;
    }
    if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 {
        return Some((f as i64).to_string());
    }
    Some(n.to_string())
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Option<QuizOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(mut map)) => Some(QuizOptions {
            count: map.remove("count"),
            language: map.remove("language"),
            grade: map.remove("grade"),
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(body: Value) -> ResolvedOptions {
        serde_json::from_value::<QuizRequest>(body)
            .unwrap()
            .resolved_options()
    }

    #[test]
    fn test_defaults_when_options_missing() {
        let options = resolve(json!({"url": "https://youtu.be/dQw4w9WgXcQ"}));
        assert_eq!(options.count, "10");
        assert_eq!(options.language, "English");
        assert_eq!(options.grade, "Any");
    }

    #[test]
    fn test_falsy_values_use_defaults() {
        for falsy in [json!(0), json!(0.0), json!(""), json!(false), json!(null)] {
            let options = resolve(json!({
                "url": "x",
                "options": {"count": falsy, "language": falsy, "grade": falsy}
            }));
            assert_eq!(options, ResolvedOptions::default(), "value: {}", falsy);
        }
    }

    #[test]
    fn test_explicit_options_kept() {
        let options = resolve(json!({
            "url": "https://youtu.be/dQw4w9WgXcQ",
            "options": {"count": 15, "language": "Spanish", "grade": "University"}
        }));
        assert_eq!(options.count, "15");
        assert_eq!(options.language, "Spanish");
        assert_eq!(options.grade, "University");
    }

    #[test]
    fn test_mistyped_values_pass_through() {
        let options = resolve(json!({
            "url": "x",
            "options": {"count": 10.0, "language": 5, "grade": true}
        }));
        assert_eq!(options.count, "10");
        assert_eq!(options.language, "5");
        assert_eq!(options.grade, "true");

        assert_eq!(resolve(json!({"url": "x", "options": {"count": -1}})).count, "-1");
        assert_eq!(resolve(json!({"url": "x", "options": {"count": "20"}})).count, "20");
        assert_eq!(resolve(json!({"url": "x", "options": {"count": 7.5}})).count, "7.5");
        assert_eq!(
            resolve(json!({"url": "x", "options": {"language": "  "}})).language,
            "  "
        );
    }

    #[test]
    fn test_non_object_options_ignored() {
        for options in [json!("x"), json!(3), json!([1, 2]), json!(true)] {
            assert_eq!(
                resolve(json!({"url": "x", "options": options})),
                ResolvedOptions::default()
            );
        }
    }

    #[test]
    fn test_empty_url_is_absent() {
        assert_eq!(QuizRequest::new("").url(), None);
        assert_eq!(QuizRequest::default().url(), None);
        assert_eq!(QuizRequest::new("  ").url(), Some("  "));
    }
}
