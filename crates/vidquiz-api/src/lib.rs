//! Axum API server for VidQuiz.
//!
//! This crate provides:
//! - `POST /api/generate`: YouTube URL in, multiple-choice quiz JSON out
//! - A browser form at `/`
//! - Health and Prometheus endpoints
//! - Per-IP rate limiting, request ids, security headers

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
