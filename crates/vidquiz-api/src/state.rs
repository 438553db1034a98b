//! Application state.

use std::sync::Arc;

use vidquiz_llm::{ChatClient, ChatCompletion};

use crate::config::ApiConfig;
use crate::services::{TranscriptService, TranscriptSource, YoutubeTranscriptSource};

/// Shared application state.
///
/// Configuration is read once at startup; collaborators are trait objects so
/// tests can substitute them.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub transcripts: TranscriptService,
    pub generator: Arc<dyn ChatCompletion>,
}

impl AppState {
    /// Create the production state: YouTube captions and the configured chat API.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let source = Arc::new(YoutubeTranscriptSource::new()?);
        let client = ChatClient::from_env()?;

        tracing::info!(
            model = %client.config().model,
            base_url = %client.config().base_url,
            transcript_fallback = config.transcript_fallback_enabled,
            "Initialized collaborators"
        );

        Ok(Self::with_collaborators(config, source, Arc::new(client)))
    }

    /// Create state from explicit collaborators.
    pub fn with_collaborators(
        config: ApiConfig,
        source: Arc<dyn TranscriptSource>,
        generator: Arc<dyn ChatCompletion>,
    ) -> Self {
        let transcripts = TranscriptService::new(source, config.transcript_fallback_enabled);
        Self {
            config,
            transcripts,
            generator,
        }
    }
}
