//! Default constants for vaani.
//!
//! Shared across capture, encoding, and transfer so the WAV header, the
//! upload form, and the session display never disagree with each other.

/// Remote speech-translation endpoint.
///
/// The service accepts an HTTP POST with a multipart form containing a single
/// `file` field (the recorded WAV) and answers with translated audio bytes.
pub const TRANSLATE_ENDPOINT: &str = "https://e541-34-125-29-189.ngrok-free.app/translate";

/// Multipart field name the translation service expects.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Filename reported for the uploaded recording.
pub const UPLOAD_FILE_NAME: &str = "audio.wav";

/// MIME type of the uploaded recording.
pub const UPLOAD_MIME_TYPE: &str = "audio/wav";

/// Fixed WAV header length in bytes (RIFF + fmt + data chunk headers).
pub const WAV_HEADER_LEN: usize = 44;

/// Bit depth of encoded samples. The encoder only emits 16-bit PCM.
pub const BITS_PER_SAMPLE: u16 = 16;

/// WAV format tag for uncompressed PCM.
pub const PCM_FORMAT_TAG: u16 = 1;

/// Default audio sample rate in Hz, used when a source does not dictate one
/// (test doubles, degenerate capture configs).
///
/// 16kHz is the standard for speech processing and keeps uploads small.
pub const SAMPLE_RATE: u32 = 16000;

/// Elapsed-time display refresh interval in milliseconds.
pub const TIMER_TICK_MS: u64 = 100;

/// Output file name for the finished recording.
pub const RECORDED_FILE_NAME: &str = "recording.wav";

/// Output file stem for the translated audio; the extension is chosen from
/// the response content type.
pub const TRANSLATED_FILE_STEM: &str = "translation";
