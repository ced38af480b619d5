//! Recording session lifecycle.
//!
//! Owns the capture source and the phase machine `Idle → Recording →
//! Processing → Ready`. Starting is rejected structurally while a recording
//! is live, so a single active session is guaranteed by the controller
//! itself rather than by whoever drives it.

use crate::audio::buffer::SampleBuffer;
use crate::audio::encoder::encode_wav;
use crate::audio::source::ChunkSource;
use crate::error::{Result, VaaniError};
use std::time::{Duration, Instant};

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No recording yet, or the last one failed.
    Idle,
    /// Chunks are accumulating from the capture source.
    Recording,
    /// Stopped; chunks are being decoded and encoded.
    Processing,
    /// A finished waveform file is available.
    Ready,
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Recording => "recording",
            Phase::Processing => "processing",
            Phase::Ready => "ready",
        }
    }
}

/// A finished recording: the encoded WAV bytes plus the format they declare.
#[derive(Debug, Clone)]
pub struct WaveformFile {
    /// Complete WAV file contents (44-byte header + PCM data).
    pub data: Vec<u8>,
    pub channels: u16,
    pub sample_rate: u32,
    /// Samples per channel.
    pub frames: usize,
}

impl WaveformFile {
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / f64::from(self.sample_rate)
    }
}

/// Drives one recording at a time over a [`ChunkSource`].
///
/// `start()` discards anything left from a previous session; `stop()` drains
/// the accumulated chunks, decodes them into a [`SampleBuffer`], and encodes
/// the waveform file. Errors return the controller to `Idle` so the caller
/// can retry manually.
pub struct SessionController<S: ChunkSource> {
    source: S,
    phase: Phase,
    started_at: Option<Instant>,
    last_recording: Option<WaveformFile>,
}

impl<S: ChunkSource> SessionController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: Phase::Idle,
            started_at: None,
            last_recording: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Elapsed time since the current recording started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// The most recent finished recording, superseded on each completed stop.
    pub fn last_recording(&self) -> Option<&WaveformFile> {
        self.last_recording.as_ref()
    }

    /// Begin a new recording session.
    ///
    /// Any chunks still buffered from a previous session are discarded.
    ///
    /// # Errors
    /// `VaaniError::SessionState` if a recording is already live, or
    /// `VaaniError::DeviceAccess` if the capture source fails to start (the
    /// controller stays `Idle` and `start()` can be retried).
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            Phase::Idle | Phase::Ready => {}
            other => {
                return Err(VaaniError::SessionState {
                    message: format!("cannot start while {}", other.describe()),
                });
            }
        }

        // Invalidate leftovers from the prior session
        self.source.take_chunks()?;

        self.source.start()?;
        self.started_at = Some(Instant::now());
        self.phase = Phase::Recording;
        Ok(())
    }

    /// Finish the current recording: stop capture, decode the accumulated
    /// chunks, and encode them as a waveform file.
    ///
    /// # Errors
    /// `VaaniError::SessionState` if nothing is recording; capture, decode,
    /// and encode failures propagate and reset the controller to `Idle`.
    pub fn stop(&mut self) -> Result<&WaveformFile> {
        if self.phase != Phase::Recording {
            return Err(VaaniError::SessionState {
                message: format!("cannot stop while {}", self.phase.describe()),
            });
        }

        self.phase = Phase::Processing;
        self.started_at = None;

        let file = match self.finish_recording() {
            Ok(file) => file,
            Err(e) => {
                self.phase = Phase::Idle;
                return Err(e);
            }
        };

        self.phase = Phase::Ready;
        Ok(&*self.last_recording.insert(file))
    }

    fn finish_recording(&mut self) -> Result<WaveformFile> {
        self.source.stop()?;

        let chunks = self.source.take_chunks()?;
        let interleaved: Vec<f32> = chunks.concat();

        let buffer = SampleBuffer::from_interleaved(
            &interleaved,
            self.source.channels(),
            self.source.sample_rate(),
        )?;
        let data = encode_wav(&buffer)?;

        Ok(WaveformFile {
            data,
            channels: buffer.channel_count(),
            sample_rate: buffer.sample_rate(),
            frames: buffer.frame_count(),
        })
    }
}
