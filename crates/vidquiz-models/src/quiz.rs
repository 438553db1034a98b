//! Quiz models.
//!
//! These mirror the JSON object the language model is asked to produce. The
//! field names are deliberately terse (`q`, `o`, `a`, `t`) because they are
//! part of the prompt contract and of the response body.

use serde::{Deserialize, Serialize};

/// Upper bound on question length requested from the model.
pub const MAX_QUESTION_LENGTH: usize = 95;

/// Number of answer options per question.
pub const OPTIONS_PER_QUIZ: usize = 4;

/// Default countdown per question (seconds).
pub const DEFAULT_TIMER_SECONDS: u32 = 20;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Question text
    pub q: String,

    /// Answer options, in display order
    pub o: Vec<String>,

    /// Index of the correct option (0-3)
    pub a: u8,

    /// Countdown timer in seconds
    #[serde(default = "default_timer")]
    pub t: u32,
}

fn default_timer() -> u32 {
    DEFAULT_TIMER_SECONDS
}

impl Quiz {
    /// Create a new quiz with the default timer.
    pub fn new(question: impl Into<String>, options: Vec<String>, answer: u8) -> Self {
        Self {
            q: question.into(),
            o: options,
            a: answer,
            t: DEFAULT_TIMER_SECONDS,
        }
    }

    /// Whether the quiz matches the shape the prompt asks for.
    ///
    /// This is informational only; responses are never rejected on it.
    pub fn is_well_formed(&self) -> bool {
        self.q.chars().count() <= MAX_QUESTION_LENGTH
            && self.o.len() == OPTIONS_PER_QUIZ
            && usize::from(self.a) < OPTIONS_PER_QUIZ
    }
}

/// The full response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    pub quizzes: Vec<Quiz>,
}

impl QuizSet {
    /// Interpret an arbitrary JSON value as a quiz set, if it has that shape.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Count of quizzes that deviate from the requested shape.
    pub fn malformed_count(&self) -> usize {
        self.quizzes.iter().filter(|q| !q.is_well_formed()).count()
    }
}
