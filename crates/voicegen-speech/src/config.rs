//! Configuration for a sample generation run

use crate::error::{TTSError, TTSResult};
use crate::types::{AudioFormat, SpeechRequest, VoiceIdentifier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TEXT: &str = "Using the right rudder in climb may be easy to forget when you're overloaded with other tasks. You need to 'step on the ball'";
pub const DEFAULT_MODEL: &str = "tts-1-hd";
pub const DEFAULT_VOICE: &str = "alloy";
pub const DEFAULT_COUNT: usize = 9;
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Inputs for one run: what to synthesize, how often, and where to put it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Text sent on every request
    #[serde(default = "default_text")]
    pub text: String,

    /// Model identifier (default: tts-1-hd)
    #[serde(default = "default_model")]
    pub model: String,

    /// Voice persona (default: alloy)
    #[serde(default = "default_voice")]
    pub voice: VoiceIdentifier,

    /// Encoded output format (default: mp3)
    #[serde(default)]
    pub format: AudioFormat,

    /// Optional playback speed, 0.25 - 4.0
    #[serde(default)]
    pub speed: Option<f32>,

    /// Number of requests and files (default: 9)
    #[serde(default = "default_count")]
    pub count: usize,

    /// Directory the numbered files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name prefix; falls back to the voice name
    #[serde(default)]
    pub voice_label: Option<String>,

    /// Write chunk size in bytes (default: 4096)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Play the last result after writing
    #[serde(default = "default_play")]
    pub play: bool,
}

// Default value functions
fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_voice() -> VoiceIdentifier {
    VoiceIdentifier::new(DEFAULT_VOICE)
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_play() -> bool {
    true
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            model: default_model(),
            voice: default_voice(),
            format: AudioFormat::default(),
            speed: None,
            count: default_count(),
            output_dir: default_output_dir(),
            voice_label: None,
            chunk_size: default_chunk_size(),
            play: default_play(),
        }
    }
}

impl SynthesisConfig {
    pub fn validate(&self) -> TTSResult<()> {
        if self.count == 0 {
            return Err(TTSError::InvalidConfiguration(
                "count must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(TTSError::InvalidConfiguration(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.text.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "text must not be empty".to_string(),
            ));
        }
        if let Some(speed) = self.speed
            && !(0.25..=4.0).contains(&speed)
        {
            return Err(TTSError::InvalidConfiguration(format!(
                "speed {speed} is outside 0.25..=4.0"
            )));
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        self.voice_label
            .as_deref()
            .unwrap_or_else(|| self.voice.name())
    }

    /// Path of the `index`-th result (1-based): `{output_dir}/{label}{index}.{ext}`
    pub fn output_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.{}", self.label(), index, self.format.extension()))
    }

    /// The request sent on every iteration
    pub fn speech_request(&self) -> SpeechRequest {
        SpeechRequest {
            model: self.model.clone(),
            text: self.text.clone(),
            voice: self.voice.clone(),
            format: self.format,
            speed: self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthesisConfig::default();
        assert_eq!(config.model, "tts-1-hd");
        assert_eq!(config.voice.name(), "alloy");
        assert_eq!(config.format, AudioFormat::Mp3);
        assert_eq!(config.count, 9);
        assert_eq!(config.chunk_size, 4096);
        assert!(config.play);
        assert!(config.text.starts_with("Using the right rudder"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_paths() {
        let config = SynthesisConfig::default();
        assert_eq!(config.output_path(1), PathBuf::from("./alloy1.mp3"));
        assert_eq!(config.output_path(9), PathBuf::from("./alloy9.mp3"));

        let config = SynthesisConfig {
            voice_label: Some("take".to_string()),
            format: AudioFormat::Wav,
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(config.output_path(3), PathBuf::from("out/take3.wav"));
    }

    #[test]
    fn test_speech_request_is_identical_each_time() {
        let config = SynthesisConfig::default();
        assert_eq!(config.speech_request(), config.speech_request());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_count = SynthesisConfig {
            count: 0,
            ..Default::default()
        };
        assert!(zero_count.validate().is_err());

        let zero_chunk = SynthesisConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(zero_chunk.validate().is_err());

        let blank = SynthesisConfig {
            text: " ".to_string(),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let fast = SynthesisConfig {
            speed: Some(5.0),
            ..Default::default()
        };
        assert!(fast.validate().is_err());
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let config: SynthesisConfig =
            serde_json::from_str(r#"{"voice": "nova", "count": 2}"#).unwrap();
        assert_eq!(config.voice.name(), "nova");
        assert_eq!(config.count, 2);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.output_path(2), PathBuf::from("./nova2.mp3"));
    }
}
