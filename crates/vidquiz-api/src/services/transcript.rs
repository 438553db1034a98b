//! Transcript retrieval.
//!
//! Captions are requested in the English/US locale first, then once more
//! without a locale hint so the source can pick the video's default track.
//! When both attempts fail a fixed demonstration transcript is substituted,
//! unless the fallback has been disabled.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::metrics;

/// Demonstration transcript used when captions cannot be fetched.
pub const FALLBACK_TRANSCRIPT: &str = "
Welcome to this educational video about the Solar System.
The Solar System consists of the Sun and the objects that orbit it.
There are eight planets in our solar system. Starting from the closest to the Sun, they are Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, and Neptune.
The Sun contains 99.86% of the system's known mass and dominates it gravitationally.
Jupiter and Saturn are gas giants, while Uranus and Neptune are ice giants.
Earth is the only planet known to harbor life. Mars is often called the Red Planet because of its reddish appearance.
";

pub type TranscriptResult<T> = Result<T, TranscriptError>;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcript unavailable: {0}")]
    Unavailable(String),

    #[error("Transcript client error: {0}")]
    Client(String),
}

/// Locale hint for caption selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLocale {
    /// ISO 639-1 language code
    pub language: String,
    /// ISO 3166-1 country code
    pub country: String,
}

impl TranscriptLocale {
    /// The locale tried first for every video.
    pub fn english_us() -> Self {
        Self {
            language: "en".to_string(),
            country: "US".to_string(),
        }
    }

    /// Caption language codes in preference order, e.g. `["en-US", "en"]`.
    pub fn language_codes(&self) -> Vec<String> {
        vec![
            format!("{}-{}", self.language, self.country),
            self.language.clone(),
        ]
    }
}

/// One caption line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionFragment {
    pub text: String,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Source of caption fragments for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered caption fragments for `video_id`.
    async fn fetch(
        &self,
        video_id: &str,
        locale: Option<&TranscriptLocale>,
    ) -> TranscriptResult<Vec<CaptionFragment>>;
}

/// Where the returned transcript text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    /// Real captions of the requested video
    Captions,
    /// The demonstration transcript
    Fallback,
}

impl TranscriptOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptOrigin::Captions => "captions",
            TranscriptOrigin::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for TranscriptOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transcript text plus its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub origin: TranscriptOrigin,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Retry-then-fallback wrapper around a [`TranscriptSource`].
#[derive(Clone)]
pub struct TranscriptService {
    source: Arc<dyn TranscriptSource>,
    fallback_enabled: bool,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn TranscriptSource>, fallback_enabled: bool) -> Self {
        Self {
            source,
            fallback_enabled,
        }
    }

    /// Fetch the transcript for a video.
    ///
    /// Makes at most two calls to the source. Errors only when both fail and
    /// the fallback is disabled.
    pub async fn fetch(&self, video_id: &str) -> TranscriptResult<Transcript> {
        match self.fetch_with_retry(video_id).await {
            Ok(text) => {
                metrics::record_transcript_outcome(TranscriptOrigin::Captions.as_str());
                Ok(Transcript {
                    text,
                    origin: TranscriptOrigin::Captions,
                })
            }
            Err(e) if self.fallback_enabled => {
                warn!(
                    video_id = %video_id,
                    error = %e,
                    "Transcript fetch failed, using demonstration transcript"
                );
                metrics::record_transcript_outcome(TranscriptOrigin::Fallback.as_str());
                Ok(Transcript {
                    text: FALLBACK_TRANSCRIPT.to_string(),
                    origin: TranscriptOrigin::Fallback,
                })
            }
            Err(e) => {
                metrics::record_transcript_outcome("missing");
                Err(e)
            }
        }
    }

    async fn fetch_with_retry(&self, video_id: &str) -> TranscriptResult<String> {
        let locale = TranscriptLocale::english_us();

        match self.source.fetch(video_id, Some(&locale)).await {
            Ok(fragments) => return Ok(join_fragments(&fragments)),
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Error fetching transcript");
            }
        }

        info!(video_id = %video_id, "Retrying transcript fetch without locale hint");
        match self.source.fetch(video_id, None).await {
            Ok(fragments) => Ok(join_fragments(&fragments)),
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Transcript retry failed");
                Err(e)
            }
        }
    }
}

/// Join caption fragments with single spaces.
pub fn join_fragments(fragments: &[CaptionFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`TranscriptSource`] backed by YouTube's caption tracks.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptSource {
    pub fn new() -> TranscriptResult<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Client(e.to_string()))?;
        Ok(Self { api })
    }

    /// Language code of the first caption track listed for the video.
    async fn default_language(&self, video_id: &str) -> TranscriptResult<String> {
        let list = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| TranscriptError::Unavailable(e.to_string()))?;

        let code = list.transcripts().next().map(|t| t.language_code().to_string());
        code.ok_or_else(|| TranscriptError::Unavailable("No caption tracks available".to_string()))
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    async fn fetch(
        &self,
        video_id: &str,
        locale: Option<&TranscriptLocale>,
    ) -> TranscriptResult<Vec<CaptionFragment>> {
        let languages = match locale {
            Some(locale) => locale.language_codes(),
            None => vec![self.default_language(video_id).await?],
        };
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| TranscriptError::Unavailable(e.to_string()))?;

        info!(
            video_id = %video_id,
            language = %transcript.language_code,
            snippets = transcript.snippets.len(),
            "Fetched transcript"
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| CaptionFragment::new(s.text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Source that replays scripted results and records locale hints.
    struct ScriptedSource {
        results: Mutex<Vec<TranscriptResult<Vec<CaptionFragment>>>>,
        calls: Mutex<Vec<Option<TranscriptLocale>>>,
    }

    impl ScriptedSource {
        fn new(results: Vec<TranscriptResult<Vec<CaptionFragment>>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Option<TranscriptLocale>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranscriptSource for ScriptedSource {
        async fn fetch(
            &self,
            _video_id: &str,
            locale: Option<&TranscriptLocale>,
        ) -> TranscriptResult<Vec<CaptionFragment>> {
            self.calls.lock().unwrap().push(locale.cloned());
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                return Err(TranscriptError::Unavailable("script exhausted".into()));
            }
            results.remove(0)
        }
    }

    fn unavailable() -> TranscriptResult<Vec<CaptionFragment>> {
        Err(TranscriptError::Unavailable("no captions".into()))
    }

    fn fragments(texts: &[&str]) -> TranscriptResult<Vec<CaptionFragment>> {
        Ok(texts.iter().map(|t| CaptionFragment::new(*t)).collect())
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let source = ScriptedSource::new(vec![fragments(&["hello", "world"])]);
        let service = TranscriptService::new(source.clone(), true);

        let transcript = service.fetch("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(transcript.text, "hello world");
        assert_eq!(transcript.origin, TranscriptOrigin::Captions);
        assert_eq!(source.calls(), vec![Some(TranscriptLocale::english_us())]);
    }

    #[tokio::test]
    async fn test_retry_without_locale() {
        let source = ScriptedSource::new(vec![unavailable(), fragments(&["second", "try"])]);
        let service = TranscriptService::new(source.clone(), true);

        let transcript = service.fetch("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(transcript.text, "second try");
        assert_eq!(transcript.origin, TranscriptOrigin::Captions);
        assert_eq!(
            source.calls(),
            vec![Some(TranscriptLocale::english_us()), None]
        );
    }

    #[tokio::test]
    async fn test_fallback_after_two_failures() {
        let source = ScriptedSource::new(vec![unavailable(), unavailable(), fragments(&["never"])]);
        let service = TranscriptService::new(source.clone(), true);

        let transcript = service.fetch("xxxxxxxxxxx").await.unwrap();

        assert_eq!(transcript.origin, TranscriptOrigin::Fallback);
        assert_eq!(transcript.text, FALLBACK_TRANSCRIPT);
        assert!(transcript.text.contains("Solar System"));
        // Exactly one retry, never a third attempt.
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_error_when_fallback_disabled() {
        let source = ScriptedSource::new(vec![unavailable(), unavailable()]);
        let service = TranscriptService::new(source.clone(), false);

        let err = service.fetch("xxxxxxxxxxx").await.unwrap_err();

        assert!(matches!(err, TranscriptError::Unavailable(_)));
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_captions_are_not_retried() {
        let source = ScriptedSource::new(vec![fragments(&[])]);
        let service = TranscriptService::new(source.clone(), true);

        let transcript = service.fetch("dQw4w9WgXcQ").await.unwrap();

        assert!(transcript.is_empty());
        assert_eq!(transcript.origin, TranscriptOrigin::Captions);
        assert_eq!(source.calls().len(), 1);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(
            TranscriptLocale::english_us().language_codes(),
            vec!["en-US".to_string(), "en".to_string()]
        );
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(TranscriptOrigin::Captions.to_string(), "captions");
        assert_eq!(TranscriptOrigin::Fallback.to_string(), "fallback");
    }
}
