use crate::{AudioFormat, SpeechRequest, SpeechResponse, TTSResult};
use async_trait::async_trait;
use strum::IntoEnumIterator;

/// Trait for TTS speech generation capabilities
#[async_trait]
pub trait TTSSpeechProvider: Send + Sync {
    /// Generate speech from text
    ///
    /// # Arguments
    /// * `request` - Speech generation request with text, model, voice, and format
    ///
    /// # Returns
    /// The complete encoded audio for the request
    async fn generate_speech(&self, request: &SpeechRequest) -> TTSResult<SpeechResponse>;

    /// Get supported audio formats (default: all of them)
    fn supported_formats(&self) -> Vec<AudioFormat> {
        AudioFormat::iter().collect()
    }

    /// Provider name used in log output
    fn name(&self) -> &str;
}
