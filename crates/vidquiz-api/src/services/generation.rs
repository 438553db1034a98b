//! Quiz generation: one completion call, then JSON parsing.

use serde_json::Value;
use tracing::{error, info, warn};
use vidquiz_llm::ChatCompletion;
use vidquiz_models::QuizSet;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::services::prompt::QuizPrompt;

/// Call the model once and parse its output.
///
/// The parsed JSON is returned unchanged; the quiz shape is only inspected
/// for logging.
pub async fn generate_quizzes(generator: &dyn ChatCompletion, prompt: &QuizPrompt) -> ApiResult<Value> {
    let raw = match generator.complete_json(&prompt.system, &prompt.user).await {
        Ok(raw) => raw,
        Err(e) => {
            metrics::record_generation_outcome("error");
            return Err(ApiError::from(e));
        }
    };

    let value = match parse_model_json(&raw) {
        Ok(value) => value,
        Err(e) => {
            error!(error = %e, content = %raw, "Failed to parse JSON");
            metrics::record_generation_outcome("malformed");
            return Err(ApiError::GenerationFailed);
        }
    };

    metrics::record_generation_outcome("ok");
    inspect_quiz_set(generator.model(), &value);
    Ok(value)
}

/// Parse model output as JSON, tolerating a surrounding Markdown code fence.
pub fn parse_model_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}

fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

fn inspect_quiz_set(model: &str, value: &Value) {
    match QuizSet::from_value(value) {
        Some(set) => {
            metrics::record_quizzes_generated(set.len());
            let malformed = set.malformed_count();
            if malformed > 0 {
                warn!(model = %model, malformed, "Some generated quizzes deviate from the requested shape");
            }
            info!(model = %model, quizzes = set.len(), "Generated quiz set");
        }
        None => {
            warn!(model = %model, "Model output does not have the quiz set shape");
        }
    }
}
