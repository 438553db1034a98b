//! Quiz generation handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;
use vidquiz_models::{extract_youtube_id, QuizRequest};

use crate::error::{ApiError, ApiResult};
use crate::services::{generate_quizzes, QuizPrompt};
use crate::state::AppState;

/// Response header naming the transcript origin (`captions` or `fallback`).
pub const TRANSCRIPT_SOURCE_HEADER: &str = "x-transcript-source";

/// POST /api/generate
///
/// Body: `{"url": "...", "options": {"count": 10, "language": "English", "grade": "Any"}}`.
/// The body is read as JSON whatever the Content-Type. On success the model's
/// JSON is returned as-is.
pub async fn generate_quiz(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let request: QuizRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::internal(e.to_string()))?;

    let url = request
        .url()
        .ok_or_else(|| ApiError::bad_request("URL is required"))?;

    let video_id =
        extract_youtube_id(url).map_err(|_| ApiError::bad_request("Invalid YouTube URL"))?;

    let options = request.resolved_options();
    info!(
        video_id = %video_id,
        count = %options.count,
        language = %options.language,
        grade = %options.grade,
        "Generating quiz"
    );

    let transcript = state.transcripts.fetch(&video_id).await?;
    if transcript.is_empty() {
        return Err(ApiError::no_transcript(None));
    }

    let prompt = QuizPrompt::build(&options, &transcript.text);
    let quizzes = generate_quizzes(state.generator.as_ref(), &prompt).await?;

    let mut response = (StatusCode::OK, Json(quizzes)).into_response();
    response.headers_mut().insert(
        TRANSCRIPT_SOURCE_HEADER,
        HeaderValue::from_static(transcript.origin.as_str()),
    );
    Ok(response)
}
