use crate::error::TTSResult;
use crate::types::AudioData;

/// Output device for decoded speech.
///
/// `play_blocking` must not return until every sample has been rendered.
pub trait AudioOutput {
    fn play_blocking(&mut self, audio: &AudioData) -> TTSResult<()>;
}

#[cfg(feature = "playback")]
pub use device::{AudioPlayer, AudioPlayerError, DefaultOutput};

#[cfg(feature = "playback")]
mod device {
    use super::AudioOutput;
    use crate::error::TTSResult;
    use crate::types::AudioData;
    use rodio::{OutputStream, OutputStreamBuilder, Sink};

    #[derive(Debug, thiserror::Error)]
    pub enum AudioPlayerError {
        #[error("Failed to initialize audio output stream: {0}")]
        InitFailed(String),
        #[error("Invalid audio buffer: sample_rate={sample_rate}, channels={channels}")]
        InvalidBuffer { sample_rate: u32, channels: u16 },
    }

    /// Audio player on the system's default output device
    pub struct AudioPlayer {
        _stream: OutputStream,
        sink: Sink,
    }

    impl AudioPlayer {
        /// Open the default output device
        pub fn try_new() -> Result<Self, AudioPlayerError> {
            let stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| AudioPlayerError::InitFailed(e.to_string()))?;

            let sink = Sink::connect_new(stream.mixer());

            Ok(AudioPlayer {
                _stream: stream,
                sink,
            })
        }

        /// Queue interleaved samples
        pub fn play_samples(&self, audio: &AudioData) -> Result<(), AudioPlayerError> {
            if audio.channels == 0 || audio.sample_rate == 0 {
                return Err(AudioPlayerError::InvalidBuffer {
                    sample_rate: audio.sample_rate,
                    channels: audio.channels,
                });
            }
            let source = rodio::buffer::SamplesBuffer::new(
                audio.channels,
                audio.sample_rate,
                audio.to_f32(),
            );
            self.sink.append(source);
            Ok(())
        }

        /// Wait until all audio has finished playing
        pub fn wait_until_end(&self) {
            self.sink.sleep_until_end();
        }
    }

    impl AudioOutput for AudioPlayer {
        fn play_blocking(&mut self, audio: &AudioData) -> TTSResult<()> {
            self.play_samples(audio)?;
            self.wait_until_end();
            Ok(())
        }
    }

    /// Opens the default device only when there is something to play, so a
    /// missing device fails after the files are written
    #[derive(Debug, Default)]
    pub struct DefaultOutput;

    impl AudioOutput for DefaultOutput {
        fn play_blocking(&mut self, audio: &AudioData) -> TTSResult<()> {
            let mut player = AudioPlayer::try_new()?;
            player.play_blocking(audio)
        }
    }
}
