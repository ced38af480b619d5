//! Audio capture, decoding, encoding, and playback.

pub mod buffer;
pub mod capture;
pub mod encoder;
pub mod playback;
pub mod source;
