//! OpenAI speech client.
//!
//! Calls `POST {base_url}audio/speech` and reads the encoded audio body as a
//! byte stream into one owned buffer.

use crate::error::{TTSError, TTSResult};
use crate::provider::TTSSpeechProvider;
use crate::types::{SpeechRequest, SpeechResponse};
use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Builder for [`OpenAISpeech`]
#[derive(Default, Clone)]
pub struct OpenAISpeechBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

impl OpenAISpeechBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API root, e.g. for a proxy or a mock server
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Build the client. A zero timeout is rejected since it fails every request.
    pub fn build(self) -> TTSResult<OpenAISpeech> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TTSError::InvalidConfiguration("No API key provided".to_string()))?;

        let mut base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).map_err(|e| {
            TTSError::InvalidConfiguration(format!("Invalid base URL '{base_url}': {e}"))
        })?;

        if self.timeout_seconds == Some(0) {
            return Err(TTSError::InvalidConfiguration(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let mut client = reqwest::Client::builder();
        if let Some(secs) = self.timeout_seconds {
            client = client.timeout(Duration::from_secs(secs));
        }
        let client = client.build()?;

        Ok(OpenAISpeech {
            client,
            api_key,
            base_url,
            timeout_seconds: self.timeout_seconds,
        })
    }
}

/// Client for the OpenAI text-to-speech endpoint
///
/// Constructed once and passed to every call; holds the connection pool.
#[derive(Clone)]
pub struct OpenAISpeech {
    client: reqwest::Client,
    api_key: String,
    pub base_url: Url,
    pub timeout_seconds: Option<u64>,
}

const REDACTED: &str = "<redacted>";

impl std::fmt::Debug for OpenAISpeechBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAISpeechBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl std::fmt::Debug for OpenAISpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAISpeech")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url.as_str())
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl OpenAISpeech {
    pub fn builder() -> OpenAISpeechBuilder {
        OpenAISpeechBuilder::new()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn endpoint(&self) -> TTSResult<Url> {
        self.base_url
            .join("audio/speech")
            .map_err(|e| TTSError::InvalidConfiguration(e.to_string()))
    }
}

#[async_trait]
impl TTSSpeechProvider for OpenAISpeech {
    async fn generate_speech(&self, request: &SpeechRequest) -> TTSResult<SpeechResponse> {
        let url = self.endpoint()?;
        log::debug!(
            "POST {} model={} voice={} format={}",
            url,
            request.model,
            request.voice,
            request.format
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(TTSError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            log::debug!("received chunk of {} bytes", chunk.len());
            buffer.extend_from_slice(&chunk);
        }

        let response = SpeechResponse {
            audio: buffer.freeze(),
            format: request.format,
            content_type,
        };
        log::info!(
            "Spoken response: {} bytes ({})",
            response.audio.len(),
            response.content_type.as_deref().unwrap_or("unknown content type")
        );

        Ok(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
