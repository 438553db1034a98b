//! HTTP handlers.

pub mod form;
pub mod generate;
pub mod health;

pub use form::index;
pub use generate::{generate_quiz, TRANSCRIPT_SOURCE_HEADER};
pub use health::health;
