//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use vidquiz_api::services::{
    CaptionFragment, TranscriptError, TranscriptLocale, TranscriptResult, TranscriptSource,
};
use vidquiz_api::{create_router, ApiConfig, AppState};
use vidquiz_llm::{ChatCompletion, LlmError, LlmResult};

pub const VALID_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Transcript source returning fixed captions, or failing every call.
pub struct FakeTranscripts {
    captions: Option<Vec<String>>,
    pub calls: Mutex<Vec<(String, bool)>>,
}

impl FakeTranscripts {
    pub fn with_captions(lines: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            captions: Some(lines.iter().map(|s| s.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            captions: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch(
        &self,
        video_id: &str,
        locale: Option<&TranscriptLocale>,
    ) -> TranscriptResult<Vec<CaptionFragment>> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), locale.is_some()));

        match &self.captions {
            Some(lines) => Ok(lines.iter().cloned().map(CaptionFragment::new).collect()),
            None => Err(TranscriptError::Unavailable(
                "Subtitles are disabled for this video".to_string(),
            )),
        }
    }
}

/// Generator returning a canned reply and recording the prompts it saw.
pub struct FakeGenerator {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl FakeGenerator {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(String::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletion for FakeGenerator {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        self.reply.clone().map_err(|_| LlmError::EmptyContent)
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

pub fn quiz_reply() -> String {
    serde_json::json!({
        "quizzes": [
            {"q": "What is at the center of the Solar System?", "o": ["Earth", "The Sun", "Mars", "The Moon"], "a": 1, "t": 20},
            {"q": "Which planet is the largest?", "o": ["Jupiter", "Saturn", "Venus", "Mercury"], "a": 0, "t": 20}
        ]
    })
    .to_string()
}

pub fn router_with(
    config: ApiConfig,
    transcripts: Arc<FakeTranscripts>,
    generator: Arc<FakeGenerator>,
) -> Router {
    let state = AppState::with_collaborators(config, transcripts, generator);
    create_router(state, None)
}

pub fn generate_request(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
