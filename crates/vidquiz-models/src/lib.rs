//! Shared data models for the VidQuiz backend.
//!
//! This crate provides Serde-serializable types for:
//! - Quiz generation requests and their option bag
//! - Generated quizzes as returned by the language model
//! - YouTube video ID extraction

pub mod quiz;
pub mod request;
pub mod utils;

// Re-export common types
pub use quiz::{Quiz, QuizSet, DEFAULT_TIMER_SECONDS, MAX_QUESTION_LENGTH, OPTIONS_PER_QUIZ};
pub use request::{QuizOptions, QuizRequest, ResolvedOptions, DEFAULT_COUNT, DEFAULT_GRADE, DEFAULT_LANGUAGE};
pub use utils::{extract_youtube_id, YoutubeIdError, YoutubeIdResult, YOUTUBE_ID_LENGTH};
