//! Local playback of WAV audio through the default output device.
//!
//! Covers both playable artifacts: the freshly encoded recording and the
//! translated audio returned by the service (when the latter is WAV).

use crate::error::{Result, VaaniError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Parse WAV bytes and play them to completion on the default output device.
///
/// Blocks the calling thread until the clip finishes. Run it through
/// `tokio::task::spawn_blocking` from async contexts.
///
/// # Errors
/// Returns `VaaniError::Playback` if the bytes are not parseable WAV, no
/// output device exists, or the output stream cannot be built.
pub fn play_wav(bytes: &[u8]) -> Result<()> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|e| VaaniError::Playback {
        message: format!("Failed to parse WAV data: {}", e),
    })?;
    let spec = reader.spec();

    let samples = decode_samples(reader)?;
    play_samples(samples, spec.channels, spec.sample_rate)
}

/// Read all samples and normalize them to f32 in [-1.0, 1.0].
fn decode_samples(reader: hound::WavReader<Cursor<&[u8]>>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| f32::from(v) / 32768.0))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VaaniError::Playback {
                message: format!("Failed to read WAV samples: {}", e),
            }),
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VaaniError::Playback {
                message: format!("Failed to read WAV samples: {}", e),
            }),
        (format, bits) => Err(VaaniError::Playback {
            message: format!("Unsupported WAV sample format: {:?}/{} bit", format, bits),
        }),
    }
}

/// Stream interleaved f32 samples to the default output device and block
/// until the clip has drained.
fn play_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<()> {
    if channels == 0 || sample_rate == 0 {
        return Err(VaaniError::Playback {
            message: "degenerate WAV format (zero channels or sample rate)".to_string(),
        });
    }
    if samples.is_empty() {
        return Ok(());
    }

    let device = cpal::default_host().default_output_device().ok_or_else(|| {
        VaaniError::Playback {
            message: "no output device available".to_string(),
        }
    })?;

    let config = cpal::StreamConfig {
        channels,
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let clip: Arc<Vec<f32>> = Arc::new(samples);
    let cursor = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicBool::new(false));

    let cb_clip = Arc::clone(&clip);
    let cb_cursor = Arc::clone(&cursor);
    let cb_finished = Arc::clone(&finished);

    let stream = device
        .build_output_stream(
            &config,
            move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let start = cb_cursor.fetch_add(out.len(), Ordering::SeqCst);
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = cb_clip.get(start + i).copied().unwrap_or(0.0);
                }
                if start + out.len() >= cb_clip.len() {
                    cb_finished.store(true, Ordering::SeqCst);
                }
            },
            |err| {
                eprintln!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| VaaniError::Playback {
            message: format!("Failed to build output stream: {}", e),
        })?;

    stream.play().map_err(|e| VaaniError::Playback {
        message: format!("Failed to start playback: {}", e),
    })?;

    // Poll until the callback reports the clip drained, with a hard cap in
    // case the device stalls.
    let clip_ms = clip.len() as u64 * 1000 / (u64::from(channels) * u64::from(sample_rate));
    let deadline = std::time::Instant::now() + Duration::from_millis(clip_ms + 2000);
    while !finished.load(Ordering::SeqCst) && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(25));
    }
    // Small tail so the device flushes the last buffer
    std::thread::sleep(Duration::from_millis(100));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::SampleBuffer;
    use crate::audio::encoder::encode_wav;

    #[test]
    fn rejects_non_wav_bytes() {
        let result = play_wav(&[0u8, 1, 2, 3, 4, 5]);

        assert!(matches!(result, Err(VaaniError::Playback { .. })));
    }

    #[test]
    fn rejects_empty_bytes() {
        assert!(play_wav(&[]).is_err());
    }

    #[test]
    fn empty_clip_is_a_noop() {
        // A 44-byte header with no frames never touches the output device.
        let buffer = SampleBuffer::new(vec![vec![]], 16000).unwrap();
        let wav = encode_wav(&buffer).unwrap();

        assert!(play_wav(&wav).is_ok());
    }

    #[test]
    #[ignore] // Requires audio hardware
    fn plays_short_encoded_clip() {
        // 100ms of a quiet 440Hz tone
        let tone: Vec<f32> = (0..1600)
            .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / 16000.0).sin() * 0.1)
            .collect();
        let buffer = SampleBuffer::new(vec![tone], 16000).unwrap();
        let wav = encode_wav(&buffer).unwrap();

        play_wav(&wav).expect("playback failed");
    }
}
