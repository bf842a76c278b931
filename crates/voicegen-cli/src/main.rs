use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use voicegen_speech::{
    AudioFormat, PlaybackSummary, RunReport, SynthesisConfig, VoiceIdentifier, config,
    pipeline::{self, ClientSettings},
    playback::DefaultOutput,
    providers::openai::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL},
};

#[derive(Parser, Debug)]
#[command(name = "voicegen")]
#[command(about = "Generate numbered text-to-speech samples and play the last one", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an existing audio file; the format comes from its extension
    Play {
        /// Path to the audio file, e.g. alloy9.mp3
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Text to synthesize
    #[arg(short, long, default_value = config::DEFAULT_TEXT)]
    text: String,

    /// Speech model
    #[arg(short, long, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Voice persona
    #[arg(short, long, default_value = config::DEFAULT_VOICE)]
    voice: String,

    /// Encoded output format (mp3, opus, aac, flac, wav, pcm)
    #[arg(short, long, default_value_t = AudioFormat::Mp3)]
    format: AudioFormat,

    /// Playback speed sent to the API (0.25 - 4.0)
    #[arg(long)]
    speed: Option<f32>,

    /// Number of samples to generate
    #[arg(short = 'n', long, default_value_t = config::DEFAULT_COUNT)]
    count: usize,

    /// Directory for the numbered files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix (defaults to the voice name)
    #[arg(long)]
    voice_label: Option<String>,

    /// Bytes per write
    #[arg(long, default_value_t = config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Environment file to load before reading the API key (default: .env if present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Environment variable holding the API key
    #[arg(long, default_value = DEFAULT_API_KEY_ENV)]
    api_key_env: String,

    /// API root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (none by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Skip playback of the last sample
    #[arg(long)]
    no_play: bool,
}

impl GenerateArgs {
    fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            env_file: self.env_file.clone(),
            api_key_env: self.api_key_env.clone(),
            base_url: Some(self.base_url.clone()),
            timeout_seconds: self.timeout,
        }
    }

    fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            text: self.text.clone(),
            model: self.model.clone(),
            voice: VoiceIdentifier::new(self.voice.clone()),
            format: self.format,
            speed: self.speed,
            count: self.count,
            output_dir: self.output_dir.clone(),
            voice_label: self.voice_label.clone(),
            chunk_size: self.chunk_size,
            play: !self.no_play && is_playback_enabled(),
        }
    }
}

/// Playback can also be disabled with NO_PLAY=1
fn is_playback_enabled() -> bool {
    std::env::var("NO_PLAY")
        .map(|v| v != "1" && v.to_lowercase() != "true")
        .unwrap_or(true)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { path }) => {
            let summary = pipeline::play_file(&path, &mut DefaultOutput)
                .with_context(|| format!("Failed to play {}", path.display()))?;
            print_playback(&summary);
        }
        None => {
            let args = cli.generate;
            let config = args.synthesis_config();
            let mut output = DefaultOutput;
            let report = pipeline::run_from_env(
                &args.client_settings(),
                |var| std::env::var(var).ok(),
                &config,
                Some(&mut output),
            )
            .await
            .context("Sample generation failed")?;

            print_report(&report);
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!("\n========== Generated Samples ==========");
    for path in &report.files {
        println!("{}", path.display());
    }
    println!("Total bytes written: {}", report.bytes_written);
    if let Some(playback) = &report.playback {
        print_playback(playback);
    }
    println!("=======================================\n");
}

fn print_playback(playback: &PlaybackSummary) {
    println!(
        "Played: {} Hz, {} channel(s), {} frames",
        playback.sample_rate, playback.channels, playback.frames
    );
}
