//! Prompt construction for quiz generation.

use vidquiz_models::{ResolvedOptions, DEFAULT_TIMER_SECONDS, MAX_QUESTION_LENGTH, OPTIONS_PER_QUIZ};

/// Maximum transcript characters sent to the model.
pub const MAX_TRANSCRIPT_CHARS: usize = 15_000;

/// System/user prompt pair for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPrompt {
    pub system: String,
    pub user: String,
}

impl QuizPrompt {
    /// Build the prompt pair. Deterministic for a given input.
    pub fn build(options: &ResolvedOptions, transcript: &str) -> Self {
        Self {
            system: build_system_prompt(options),
            user: build_user_prompt(transcript),
        }
    }
}

fn build_system_prompt(options: &ResolvedOptions) -> String {
    format!(
        r#"You are a senior K-12 education expert who turns video content into engaging classroom multiple-choice questions.
Based on the video transcript provided, generate {count} multiple-choice questions.
Language: {language}.
Grade level: {grade}.

Output rules: return strict JSON containing an array named "quizzes".
Each question contains:
- q: the question (max {max_len} characters)
- o: an array of {options} answer options (strings)
- a: the index of the correct option (an integer from 0 to {last_index})
- t: the countdown in seconds (default {timer})

Quality control: every question must be grounded in the video content, and the wrong options should be plausible distractors."#,
        count = options.count,
        language = options.language,
        grade = options.grade,
        max_len = MAX_QUESTION_LENGTH,
        options = OPTIONS_PER_QUIZ,
        last_index = OPTIONS_PER_QUIZ - 1,
        timer = DEFAULT_TIMER_SECONDS,
    )
}

fn build_user_prompt(transcript: &str) -> String {
    format!(
        "The video transcript is as follows:\n\n{}",
        truncate_chars(transcript, MAX_TRANSCRIPT_CHARS)
    )
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
