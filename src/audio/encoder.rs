//! Canonical 16-bit PCM WAV encoding.
//!
//! Converts a decoded [`SampleBuffer`] into a self-contained RIFF/WAVE blob:
//! a fixed 44-byte header followed by interleaved little-endian i16 samples,
//! frame-major and channel-minor. The conversion is pure and deterministic;
//! encoding the same buffer twice yields byte-identical output.
//!
//! The encoder is hand-rolled rather than delegated to a WAV library because
//! the output must be bit-exact: the header layout and the asymmetric sample
//! scaling below are the contract with the translation service.

use crate::audio::buffer::SampleBuffer;
use crate::defaults::{BITS_PER_SAMPLE, PCM_FORMAT_TAG, WAV_HEADER_LEN};
use crate::error::{Result, VaaniError};

/// Encode a sample buffer as an uncompressed PCM WAV file.
///
/// The output is exactly `44 + frames * channels * 2` bytes. Header layout
/// (all multi-byte integers little-endian):
///
/// | Offset | Size | Field           | Value                  |
/// |--------|------|-----------------|------------------------|
/// | 0      | 4    | chunk ID        | "RIFF"                 |
/// | 4      | 4    | chunk size      | 36 + data size         |
/// | 8      | 4    | format          | "WAVE"                 |
/// | 12     | 4    | subchunk1 ID    | "fmt "                 |
/// | 16     | 4    | subchunk1 size  | 16                     |
/// | 20     | 2    | audio format    | 1 (PCM)                |
/// | 22     | 2    | channel count   | C                      |
/// | 24     | 4    | sample rate     | R                      |
/// | 28     | 4    | byte rate       | R * C * 2              |
/// | 32     | 2    | block align     | C * 2                  |
/// | 34     | 2    | bits per sample | 16                     |
/// | 36     | 4    | subchunk2 ID    | "data"                 |
/// | 40     | 4    | subchunk2 size  | N * C * 2              |
///
/// # Errors
/// Returns `VaaniError::EncodeInput` if the buffer has zero channels or a
/// zero sample rate; the header would be meaningless. An empty recording
/// (zero frames) is valid and produces a 44-byte file.
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>> {
    let channels = buffer.channel_count();
    let sample_rate = buffer.sample_rate();

    if channels == 0 {
        return Err(VaaniError::EncodeInput {
            message: "channel count is zero".to_string(),
        });
    }
    if sample_rate == 0 {
        return Err(VaaniError::EncodeInput {
            message: "sample rate is zero".to_string(),
        });
    }

    let frames = buffer.frame_count();
    let bytes_per_sample = u32::from(BITS_PER_SAMPLE / 8);
    let block_align = u32::from(channels) * bytes_per_sample;
    let byte_rate = sample_rate * block_align;
    let data_size = frames as u32 * block_align;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&(block_align as u16).to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    for frame in 0..frames {
        for channel in buffer.channels() {
            out.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    Ok(out)
}

/// Convert one normalized sample to 16-bit PCM.
///
/// Clamps to [-1.0, 1.0], then scales asymmetrically: negative values use
/// the full -32768 range, non-negative values top out at 32767. Fractional
/// results truncate toward zero, so the quantization error stays below
/// 1/32768 of the clamped value.
fn quantize(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    let scaled = if clamped < 0.0 {
        clamped * 32768.0
    } else {
        clamped * 32767.0
    };
    scaled as i16
}
