use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "playback")]
use crate::playback::AudioPlayerError;

/// TTS-related errors
#[derive(Error, Debug)]
pub enum TTSError {
    /// Required credential is absent from the environment
    #[error(
        "Missing credential: environment variable '{0}' is not set\nSuggestion: export it or add it to a .env file"
    )]
    MissingCredential(String),

    /// Configuration rejected before any request was made
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Environment file could not be loaded
    #[error("Failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Transport level failure talking to the speech endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Speech endpoint answered with a non-success status
    #[error("TTS provider returned {status}: {body}")]
    Api { status: u16, body: String },

    /// IO error
    #[error("IO error during TTS operation on {path}: {source}\nSuggestion: Check file permissions and disk space")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoded audio could not be decoded into PCM
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// Audio output device failure
    #[cfg(feature = "playback")]
    #[error("Playback failed: {0}")]
    Playback(#[from] AudioPlayerError),
}

impl TTSError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TTSError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;
