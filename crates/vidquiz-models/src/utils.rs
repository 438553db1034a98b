//! Utility functions for URL parsing and validation.

use std::sync::LazyLock;

use regex::Regex;

/// Length of every YouTube video ID.
pub const YOUTUBE_ID_LENGTH: usize = 11;

/// Matches the common YouTube URL shapes. The leading `.*` is greedy, so the
/// last marker in the URL wins.
static YOUTUBE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("valid YouTube ID pattern")
});

/// Errors that can occur during YouTube ID extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YoutubeIdError {
    /// No recognised YouTube URL marker
    NoMatch,
    /// Segment after the marker is not 11 characters long
    InvalidLength(usize),
}

impl std::fmt::Display for YoutubeIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YoutubeIdError::NoMatch => write!(f, "URL does not match a YouTube URL pattern"),
            YoutubeIdError::InvalidLength(len) => write!(
                f,
                "Video ID must be {} characters, got {}",
                YOUTUBE_ID_LENGTH, len
            ),
        }
    }
}

impl std::error::Error for YoutubeIdError {}

/// Result type for YouTube ID extraction.
pub type YoutubeIdResult<T> = Result<T, YoutubeIdError>;

/// Extract the 11-character video ID from a YouTube URL.
///
/// Recognised shapes:
/// - https://youtu.be/VIDEO_ID
/// - https://youtube.com/v/VIDEO_ID
/// - https://youtube.com/u/X/VIDEO_ID
/// - https://youtube.com/embed/VIDEO_ID
/// - https://youtube.com/watch?v=VIDEO_ID
/// - any URL carrying `&v=VIDEO_ID`
///
/// The ID ends at the first `#`, `&` or `?`.
pub fn extract_youtube_id(url: &str) -> YoutubeIdResult<String> {
    let caps = YOUTUBE_ID_PATTERN
        .captures(url)
        .ok_or(YoutubeIdError::NoMatch)?;

    let id = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let len = id.chars().count();
    if len != YOUTUBE_ID_LENGTH {
        return Err(YoutubeIdError::InvalidLength(len));
    }

    Ok(id.to_string())
}
