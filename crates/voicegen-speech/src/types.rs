use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encoded audio format requested from the speech endpoint
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    /// Headerless signed 16-bit little-endian, 24kHz mono
    Pcm,
}

impl AudioFormat {
    /// Sample rate of the headerless `pcm` response format
    pub const PCM_SAMPLE_RATE: u32 = 24_000;

    /// Value sent as `response_format`
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
            AudioFormat::Pcm => "pcm",
        }
    }

    /// File extension used for written results
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Format implied by a file's extension, e.g. `alloy9.mp3`
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Voice identifier for TTS generation (predefined voices only)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VoiceIdentifier {
    /// Predefined voice name (e.g., "alloy", "nova")
    pub name: String,
}

impl VoiceIdentifier {
    /// Create a voice identifier from a predefined voice name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the voice name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for VoiceIdentifier {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for VoiceIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for VoiceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Speech generation request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub model: String,
    #[serde(rename = "input")]
    pub text: String,
    pub voice: VoiceIdentifier,
    #[serde(rename = "response_format")]
    pub format: AudioFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

/// Speech generation response
///
/// `audio` is the complete encoded body, owned so it can be written and
/// decoded without touching the network again.
#[derive(Clone, Debug)]
pub struct SpeechResponse {
    pub audio: Bytes,
    pub format: AudioFormat,
    pub content_type: Option<String>,
}

/// Decoded interleaved PCM
#[derive(Clone, Debug, PartialEq)]
pub struct AudioData {
    /// Interleaved signed 16-bit samples
    pub samples: Vec<i16>,
    /// Number of audio channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Samples scaled to `[-1.0, 1.0]` for output devices that take floats
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| s as f32 / (i16::MAX as f32 + 1.0))
            .collect()
    }
}
