//! Client for OpenAI-compatible chat completion services.
//!
//! The base URL is configurable so any provider exposing
//! `POST {base}/chat/completions` can be substituted.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatClient, ChatClientConfig, ChatCompletion};
pub use error::{LlmError, LlmResult};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, Role};
