//! Trait for raw audio chunk sources.

use crate::defaults;
use crate::error::{Result, VaaniError};

/// A device that accumulates raw audio chunks while a recording is live.
///
/// Chunks are interleaved f32 samples in the source's native channel layout
/// and sample rate. The trait allows swapping implementations (real capture
/// device vs mock).
pub trait ChunkSource: Send {
    /// Start accumulating chunks from the device.
    fn start(&mut self) -> Result<()>;

    /// Stop accumulating chunks. Chunks gathered so far stay buffered.
    fn stop(&mut self) -> Result<()>;

    /// Drain every chunk accumulated since the last call.
    fn take_chunks(&mut self) -> Result<Vec<Vec<f32>>>;

    /// Channel count of the interleaved chunk data.
    fn channels(&self) -> u16;

    /// Sample rate of the chunk data in Hz.
    fn sample_rate(&self) -> u32;
}

/// Mock chunk source for testing.
///
/// The chunks configured with `with_chunks` are "captured" anew on every
/// `start()`, simulating a device that records the same audio each session.
/// `with_buffered` pre-loads stale chunks, as if left over from an earlier
/// session that was never drained.
#[derive(Debug, Clone)]
pub struct MockChunkSource {
    session_chunks: Vec<Vec<f32>>,
    buffered: Vec<Vec<f32>>,
    channels: u16,
    sample_rate: u32,
    is_started: bool,
    should_fail_start: bool,
    should_fail_stop: bool,
    error_message: String,
}

impl MockChunkSource {
    /// Create a mock source that captures nothing, mono at the default rate.
    pub fn new() -> Self {
        Self {
            session_chunks: Vec::new(),
            buffered: Vec::new(),
            channels: 1,
            sample_rate: defaults::SAMPLE_RATE,
            is_started: false,
            should_fail_start: false,
            should_fail_stop: false,
            error_message: "mock capture error".to_string(),
        }
    }

    /// Configure the chunks captured during each session.
    pub fn with_chunks(mut self, chunks: Vec<Vec<f32>>) -> Self {
        self.session_chunks = chunks;
        self
    }

    /// Pre-load stale chunks, as if left over from a prior session.
    pub fn with_buffered(mut self, chunks: Vec<Vec<f32>>) -> Self {
        self.buffered = chunks;
        self
    }

    /// Configure the reported channel count.
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Configure the reported sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Configure the mock to fail on start.
    pub fn with_start_failure(mut self) -> Self {
        self.should_fail_start = true;
        self
    }

    /// Configure the mock to fail on stop.
    pub fn with_stop_failure(mut self) -> Self {
        self.should_fail_stop = true;
        self
    }

    /// Configure the error message for injected failures.
    pub fn with_error_message(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }

    /// Check if the source is started.
    pub fn is_started(&self) -> bool {
        self.is_started
    }
}

impl Default for MockChunkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkSource for MockChunkSource {
    fn start(&mut self) -> Result<()> {
        if self.should_fail_start {
            Err(VaaniError::DeviceAccess {
                message: self.error_message.clone(),
            })
        } else {
            self.is_started = true;
            self.buffered.extend(self.session_chunks.iter().cloned());
            Ok(())
        }
    }

    fn stop(&mut self) -> Result<()> {
        if self.should_fail_stop {
            Err(VaaniError::DeviceAccess {
                message: self.error_message.clone(),
            })
        } else {
            self.is_started = false;
            Ok(())
        }
    }

    fn take_chunks(&mut self) -> Result<Vec<Vec<f32>>> {
        Ok(std::mem::take(&mut self.buffered))
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
