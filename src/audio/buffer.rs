//! Decoded audio sample buffer.
//!
//! The in-memory representation between capture and encoding: planar
//! channels of f32 samples normalized to [-1.0, 1.0].

use crate::error::{Result, VaaniError};

/// A decoded recording: one `Vec<f32>` per channel, all equal length.
///
/// Produced once by decoding captured chunks, consumed once by the waveform
/// encoder. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from planar channel data.
    ///
    /// Degenerate buffers (zero channels, zero sample rate) are representable;
    /// the waveform encoder rejects them at its own boundary.
    ///
    /// # Errors
    /// Returns `VaaniError::Decode` if the channels have unequal lengths.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        let frame_count = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != frame_count) {
            return Err(VaaniError::Decode {
                message: "channels have unequal lengths".to_string(),
            });
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Decode interleaved samples (frame-major, channel-minor) into planar
    /// channels. This is the decode boundary between raw captured bytes and
    /// the encoder's input.
    ///
    /// # Errors
    /// Returns `VaaniError::Decode` if the channel count is zero or the
    /// sample count is not divisible by the channel count.
    pub fn from_interleaved(samples: &[f32], channel_count: u16, sample_rate: u32) -> Result<Self> {
        if channel_count == 0 {
            return Err(VaaniError::Decode {
                message: "channel count is zero".to_string(),
            });
        }
        let channel_count = channel_count as usize;
        if samples.len() % channel_count != 0 {
            return Err(VaaniError::Decode {
                message: format!(
                    "{} samples do not divide into {} channels",
                    samples.len(),
                    channel_count
                ),
            });
        }

        let frame_count = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frame_count); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Self::new(channels, sample_rate)
    }

    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples per channel.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_interleaved_mono_passes_through() {
        let buffer = SampleBuffer::from_interleaved(&[0.1, 0.2, 0.3], 1, 16000).unwrap();

        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.frame_count(), 3);
        assert_eq!(buffer.channels()[0], vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn from_interleaved_stereo_deinterleaves() {
        // Frames: (0.1, -0.1), (0.2, -0.2)
        let buffer =
            SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2], 2, 44100).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channels()[0], vec![0.1, 0.2]);
        assert_eq!(buffer.channels()[1], vec![-0.1, -0.2]);
    }

    #[test]
    fn from_interleaved_rejects_zero_channels() {
        let result = SampleBuffer::from_interleaved(&[0.0], 0, 16000);

        assert!(matches!(result, Err(VaaniError::Decode { .. })));
    }

    #[test]
    fn from_interleaved_rejects_ragged_sample_count() {
        // 3 samples cannot form whole stereo frames
        let result = SampleBuffer::from_interleaved(&[0.0, 0.0, 0.0], 2, 16000);

        assert!(matches!(result, Err(VaaniError::Decode { .. })));
    }

    #[test]
    fn from_interleaved_accepts_empty_recording() {
        let buffer = SampleBuffer::from_interleaved(&[], 2, 48000).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.duration_secs(), 0.0);
    }

    #[test]
    fn new_rejects_unequal_channel_lengths() {
        let result = SampleBuffer::new(vec![vec![0.0, 0.0], vec![0.0]], 16000);

        assert!(matches!(result, Err(VaaniError::Decode { .. })));
    }

    #[test]
    fn duration_reflects_rate_and_frames() {
        let buffer = SampleBuffer::from_interleaved(&vec![0.0; 32000], 2, 16000).unwrap();

        assert_eq!(buffer.frame_count(), 16000);
        assert!((buffer.duration_secs() - 1.0).abs() < f64::EPSILON);
    }
}
