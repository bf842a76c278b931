//! The sample run: synthesize `count` times, write each result, play the last.

use crate::config::SynthesisConfig;
use crate::credentials::{load_env_file, resolve_api_key};
use crate::decode::decode_audio;
use crate::error::{TTSError, TTSResult};
use crate::playback::AudioOutput;
use crate::provider::TTSSpeechProvider;
use crate::providers::openai::{DEFAULT_API_KEY_ENV, OpenAISpeech};
use crate::types::{AudioData, AudioFormat, SpeechResponse};
use crate::writer::write_chunked;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Where the client's credentials and endpoint come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Explicit environment file; `None` searches for `.env`
    pub env_file: Option<PathBuf>,
    /// Variable holding the API key
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            env_file: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: None,
            timeout_seconds: None,
        }
    }
}

/// Load the environment file, resolve the key through `lookup` and build
/// the client. Nothing touches the network here.
pub fn connect<F>(settings: &ClientSettings, lookup: F) -> TTSResult<OpenAISpeech>
where
    F: Fn(&str) -> Option<String>,
{
    load_env_file(settings.env_file.as_deref())?;
    let api_key = resolve_api_key(&settings.api_key_env, lookup)?;

    let mut builder = OpenAISpeech::builder().api_key(api_key);
    if let Some(base_url) = &settings.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(secs) = settings.timeout_seconds {
        builder = builder.timeout_seconds(secs);
    }
    builder.build()
}

/// [`connect`] followed by [`run`]. A missing key fails before any request.
pub async fn run_from_env<F>(
    settings: &ClientSettings,
    lookup: F,
    config: &SynthesisConfig,
    output: Option<&mut dyn AudioOutput>,
) -> TTSResult<RunReport>
where
    F: Fn(&str) -> Option<String>,
{
    let client = connect(settings, lookup)?;
    run(config, &client, output).await
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Written files, in request order
    pub files: Vec<PathBuf>,
    pub bytes_written: u64,
    /// Present when the last result was decoded and played
    pub playback: Option<PlaybackSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: usize,
}

impl From<&AudioData> for PlaybackSummary {
    fn from(audio: &AudioData) -> Self {
        Self {
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            frames: audio.frames(),
        }
    }
}

/// Run the whole procedure. Any error aborts immediately; files already
/// written stay on disk.
///
/// Playback happens only when `config.play` is set and `output` is given.
pub async fn run(
    config: &SynthesisConfig,
    provider: &dyn TTSSpeechProvider,
    output: Option<&mut dyn AudioOutput>,
) -> TTSResult<RunReport> {
    config.validate()?;
    if !provider.supported_formats().contains(&config.format) {
        return Err(TTSError::InvalidConfiguration(format!(
            "{} does not support the {} format",
            provider.name(),
            config.format
        )));
    }

    let mut files = Vec::with_capacity(config.count);
    let mut bytes_written = 0u64;
    let mut last: Option<SpeechResponse> = None;

    for index in 1..=config.count {
        let request = config.speech_request();
        log::info!(
            "[{}/{}] requesting speech from {} (model={}, voice={})",
            index,
            config.count,
            provider.name(),
            request.model,
            request.voice
        );
        let response = provider.generate_speech(&request).await?;

        let path = config.output_path(index);
        let written = write_chunked(&path, &response.audio, config.chunk_size)?;
        log::info!("Wrote {} bytes to {}", written, path.display());

        bytes_written += written;
        files.push(path);
        last = Some(response);
    }

    let playback = match (config.play, output, last) {
        (true, Some(output), Some(last)) => {
            let audio = decode_audio(&last.audio, last.format)?;
            log::info!(
                "Sample rate: {} Frames: {} Channels: {}",
                audio.sample_rate,
                audio.frames(),
                audio.channels
            );
            output.play_blocking(&audio)?;
            Some(PlaybackSummary::from(&audio))
        }
        _ => None,
    };

    Ok(RunReport {
        files,
        bytes_written,
        playback,
    })
}

/// Decode an existing audio file and play it, blocking until done.
///
/// The format comes from the file extension.
pub fn play_file(path: &Path, output: &mut dyn AudioOutput) -> TTSResult<PlaybackSummary> {
    let format = AudioFormat::from_path(path).ok_or_else(|| {
        TTSError::InvalidConfiguration(format!(
            "cannot infer audio format from {}",
            path.display()
        ))
    })?;
    let encoded = std::fs::read(path).map_err(|e| TTSError::io(path, e))?;

    let audio = decode_audio(&Bytes::from(encoded), format)?;
    log::info!(
        "Playing {}: sample rate {} frames {} channels {}",
        path.display(),
        audio.sample_rate,
        audio.frames(),
        audio.channels
    );
    output.play_blocking(&audio)?;
    Ok(PlaybackSummary::from(&audio))
}
