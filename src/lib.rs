//! vaani - record speech, translate it, play the result.
//!
//! Terminal recorder that captures microphone audio, encodes it as a
//! canonical 16-bit PCM WAV file, uploads it to a remote speech-translation
//! service, and plays back the translated audio.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod audio;
pub mod cli;
pub mod defaults;
pub mod error;
pub mod session;
pub mod transfer;

// Core types (capture → decode → encode → transfer)
pub use audio::buffer::SampleBuffer;
pub use audio::encoder::encode_wav;
pub use audio::source::{ChunkSource, MockChunkSource};
pub use session::{Phase, SessionController, WaveformFile};
pub use transfer::{TranslationClient, TranslationResult};

// Error handling
pub use error::{Result, VaaniError};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.2+abc1234"` when git hash is available, `"0.1.2"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
