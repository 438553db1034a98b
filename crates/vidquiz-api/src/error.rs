//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::TranscriptError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Body `error` value for a missing transcript.
pub const NO_TRANSCRIPT: &str = "NO_TRANSCRIPT";

/// Body `error` value for unparsable model output.
pub const AI_GENERATION_FAILED: &str = "AI_GENERATION_FAILED";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        details: Option<String>,
    },

    #[error("Generation failed: model output is not valid JSON")]
    GenerationFailed,

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Generation error: {0}")]
    Llm(#[from] vidquiz_llm::LlmError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// No transcript could be obtained for the video.
    pub fn no_transcript(details: Option<String>) -> Self {
        Self::NotFound {
            message: NO_TRANSCRIPT.to_string(),
            details,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::GenerationFailed | ApiError::Internal(_) | ApiError::Llm(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The `error` field of the response body.
    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg.clone(),
            ApiError::NotFound { message, .. } => message.clone(),
            ApiError::GenerationFailed => AI_GENERATION_FAILED.to_string(),
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            ApiError::Llm(e) => e.to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::NotFound { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl From<TranscriptError> for ApiError {
    fn from(e: TranscriptError) -> Self {
        ApiError::no_transcript(Some(e.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        } else {
            warn!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.public_message(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}
