//! Collaborators behind the generation endpoint.

pub mod generation;
pub mod prompt;
pub mod transcript;

pub use generation::{generate_quizzes, parse_model_json};
pub use prompt::{truncate_chars, QuizPrompt, MAX_TRANSCRIPT_CHARS};
pub use transcript::{
    join_fragments, CaptionFragment, Transcript, TranscriptError, TranscriptLocale,
    TranscriptOrigin, TranscriptResult, TranscriptService, TranscriptSource,
    YoutubeTranscriptSource, FALLBACK_TRANSCRIPT,
};
