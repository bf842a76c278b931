//! Decode encoded speech into interleaved 16-bit PCM.

use crate::error::{TTSError, TTSResult};
use crate::types::{AudioData, AudioFormat};
use bytes::Bytes;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode `bytes` in `format` into signed 16-bit samples.
///
/// Sample rate and channel count are the ones the container declares, or
/// the first decoded packet's when the container leaves them unset.
pub fn decode_audio(bytes: &Bytes, format: AudioFormat) -> TTSResult<AudioData> {
    match format {
        AudioFormat::Pcm => decode_raw_pcm(bytes),
        AudioFormat::Opus => Err(TTSError::Decode(
            "no decoder available for opus".to_string(),
        )),
        _ => decode_container(bytes, format),
    }
}

/// Dispatch to the symphonia probe using the format's extension as a hint.
fn decode_container(bytes: &Bytes, format: AudioFormat) -> TTSResult<AudioData> {
    if bytes.is_empty() {
        return Err(TTSError::Decode("empty audio payload".to_string()));
    }

    let src = Cursor::new(bytes.clone());
    let mss = MediaSourceStream::new(Box::new(src), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    hint.with_extension(format.extension());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TTSError::Decode(e.to_string()))?;

    let mut reader = probed.format;
    let track = reader
        .default_track()
        .ok_or_else(|| TTSError::Decode("no audio track found".into()))?;

    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count() as u16);
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| TTSError::Decode(e.to_string()))?;

    let mut sample_buf: Option<SampleBuffer<i16>> = None;
    let mut samples: Vec<i16> = Vec::new();

    loop {
        let packet = match reader.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(TTSError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count() as u16);

                let sb = sample_buf
                    .get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
                sb.copy_interleaved_ref(decoded);
                samples.extend_from_slice(sb.samples());
            }
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(TTSError::Decode(e.to_string())),
        }
    }

    let sample_rate =
        sample_rate.ok_or_else(|| TTSError::Decode("unknown sample rate".into()))?;
    let channels = channels.unwrap_or(1);

    Ok(AudioData {
        samples,
        channels,
        sample_rate,
    })
}

fn decode_raw_pcm(bytes: &[u8]) -> TTSResult<AudioData> {
    if bytes.len() % 2 != 0 {
        return Err(TTSError::Decode(format!(
            "pcm payload has odd length {}",
            bytes.len()
        )));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(AudioData {
        samples,
        channels: 1,
        sample_rate: AudioFormat::PCM_SAMPLE_RATE,
    })
}
