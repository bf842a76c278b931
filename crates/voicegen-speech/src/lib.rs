//! # voicegen speech
//!
//! Generates numbered speech samples through a hosted text-to-speech API and
//! plays the last one back.
//!
//! ## Architecture
//!
//! - [`TTSSpeechProvider`]: speech generation seam; [`providers::openai::OpenAISpeech`] is the HTTP implementation
//! - [`credentials`]: `.env` loading and API key lookup
//! - [`SynthesisConfig`]: text, model, voice, format, count and file naming
//! - [`writer`]: chunked file output
//! - [`decode`]: encoded audio to 16-bit PCM (symphonia)
//! - [`playback`]: [`AudioOutput`] trait and the rodio-backed [`playback::AudioPlayer`] (feature `playback`)
//! - [`pipeline::run`]: the linear procedure tying them together; [`pipeline::run_from_env`] adds credential lookup, [`pipeline::play_file`] plays a file from disk
//!
//! ## Example
//!
//! ```rust,no_run
//! use voicegen_speech::{pipeline::{self, ClientSettings}, SynthesisConfig};
//!
//! async fn generate() -> voicegen_speech::TTSResult<()> {
//!     let settings = ClientSettings::default();
//!     let config = SynthesisConfig { play: false, ..Default::default() };
//!     let report =
//!         pipeline::run_from_env(&settings, |var| std::env::var(var).ok(), &config, None).await?;
//!     println!("wrote {} files", report.files.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod credentials;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod playback;
mod provider;
pub mod providers;
pub mod types;
pub mod writer;

pub use config::SynthesisConfig;
pub use error::{TTSError, TTSResult};
pub use pipeline::{PlaybackSummary, RunReport};
pub use playback::AudioOutput;
#[cfg(feature = "playback")]
pub use playback::AudioPlayerError;
pub use provider::TTSSpeechProvider;
pub use types::{AudioData, AudioFormat, SpeechRequest, SpeechResponse, VoiceIdentifier};
