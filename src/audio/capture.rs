//! Microphone capture using CPAL (Cross-Platform Audio Library).
//!
//! Captures at the device's native configuration and buffers each callback
//! delivery as one raw chunk of interleaved f32 samples. Decoding the chunks
//! into a planar sample buffer happens later, when the session stops.

use crate::audio::source::ChunkSource;
use crate::error::{Result, VaaniError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

/// Run a closure with stderr temporarily redirected to /dev/null.
///
/// Suppresses noisy ALSA/JACK/PipeWire messages that CPAL triggers while
/// probing audio backends. The messages are harmless but confusing to users.
///
/// # Safety
/// Uses `libc::dup`/`libc::dup2` to save and restore file descriptor 2.
/// Safe as long as no other thread is concurrently manipulating fd 2.
fn with_suppressed_stderr<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    unsafe {
        let saved_fd = libc::dup(2);
        let devnull = libc::open(c"/dev/null".as_ptr(), libc::O_WRONLY);
        if saved_fd >= 0 && devnull >= 0 {
            libc::dup2(devnull, 2);
            libc::close(devnull);
        }

        let result = f();

        if saved_fd >= 0 {
            libc::dup2(saved_fd, 2);
            libc::close(saved_fd);
        }

        result
    }
}

/// Quiet down JACK/ALSA/PipeWire log output during backend probing.
///
/// # Safety
/// Modifies environment variables; call at startup before spawning threads.
pub fn suppress_audio_warnings() {
    // SAFETY: Called at startup before any threads are spawned
    unsafe {
        std::env::set_var("JACK_NO_START_SERVER", "1");
        std::env::set_var("JACK_NO_AUDIO_RESERVATION", "1");
        std::env::set_var("PIPEWIRE_DEBUG", "0");
        std::env::set_var("ALSA_DEBUG", "0");
        std::env::set_var("PW_LOG", "0");
    }
}

/// Preferred device names for desktop PipeWire/PulseAudio environments.
const PREFERRED_DEVICES: &[&str] = &["pipewire", "pulse", "PulseAudio"];

/// Device name patterns not useful for microphone input.
const FILTERED_PATTERNS: &[&str] = &[
    "surround",
    "front:",
    "rear:",
    "center:",
    "side:",
    "Digital Output",
    "HDMI",
    "S/PDIF",
];

fn should_filter_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    FILTERED_PATTERNS
        .iter()
        .any(|pattern| lower.contains(&pattern.to_lowercase()))
}

fn is_preferred_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    PREFERRED_DEVICES
        .iter()
        .any(|pref| lower.contains(&pref.to_lowercase()))
}

/// List available audio input devices, preferred ones marked "\[recommended\]".
///
/// Filters out obviously unusable devices (surround channels, HDMI, S/PDIF).
///
/// # Errors
/// Returns `VaaniError::DeviceAccess` if device enumeration fails.
pub fn list_devices() -> Result<Vec<String>> {
    let (host, devices) = with_suppressed_stderr(|| {
        let host = cpal::default_host();
        let devices = host.input_devices();
        (host, devices)
    });
    let _ = host; // keep host alive while iterating devices
    let devices = devices.map_err(|e| VaaniError::DeviceAccess {
        message: format!("Failed to enumerate input devices: {}", e),
    })?;

    let mut device_names = Vec::new();
    for device in devices {
        if let Ok(name) = device.name() {
            if should_filter_device(&name) {
                continue;
            }
            if is_preferred_device(&name) {
                device_names.push(format!("{} [recommended]", name));
            } else {
                device_names.push(name);
            }
        }
    }

    Ok(device_names)
}

/// Pick the best default input device, preferring PipeWire/PulseAudio so the
/// desktop's device selection is respected.
///
/// # Errors
/// Returns `VaaniError::DeviceNotFound` if no input device is available.
fn get_best_default_device() -> Result<cpal::Device> {
    with_suppressed_stderr(|| {
        let host = cpal::default_host();

        if let Ok(devices) = host.input_devices() {
            for device in devices {
                if let Ok(name) = device.name()
                    && is_preferred_device(&name)
                {
                    return Ok(device);
                }
            }
        }

        host.default_input_device()
            .ok_or_else(|| VaaniError::DeviceNotFound {
                device: "default".to_string(),
            })
    })
}

/// Wrapper for cpal::Stream to make it Send.
///
/// SAFETY: The stream is only touched through `&mut self` on the owning
/// source, so it never crosses thread boundaries concurrently.
struct SendableStream(cpal::Stream);

unsafe impl Send for SendableStream {}

/// Real microphone capture via CPAL.
///
/// Records at the device's native sample rate and channel count; i16 and f32
/// input formats are normalized to f32 in the data callback. Each callback
/// delivery becomes one buffered chunk.
pub struct CpalChunkSource {
    device: cpal::Device,
    stream: Option<SendableStream>,
    chunks: Arc<Mutex<Vec<Vec<f32>>>>,
    channels: u16,
    sample_rate: u32,
}

impl CpalChunkSource {
    /// Open a capture source on the named device, or the best default when
    /// `device_name` is None.
    ///
    /// # Errors
    /// Returns `VaaniError::DeviceNotFound` if the device does not exist, or
    /// `VaaniError::DeviceAccess` if its input configuration cannot be read.
    pub fn new(device_name: Option<&str>) -> Result<Self> {
        let device = with_suppressed_stderr(|| {
            let host = cpal::default_host();

            if let Some(name) = device_name {
                let devices = host
                    .input_devices()
                    .map_err(|e| VaaniError::DeviceAccess {
                        message: format!("Failed to enumerate devices: {}", e),
                    })?;

                let mut found_device = None;
                for dev in devices {
                    if let Ok(dev_name) = dev.name()
                        && dev_name == name
                    {
                        found_device = Some(dev);
                        break;
                    }
                }

                found_device.ok_or_else(|| VaaniError::DeviceNotFound {
                    device: name.to_string(),
                })
            } else {
                get_best_default_device()
            }
        })?;

        let default_config =
            device
                .default_input_config()
                .map_err(|e| VaaniError::DeviceAccess {
                    message: format!("Failed to query default input config: {}", e),
                })?;

        Ok(Self {
            device,
            stream: None,
            chunks: Arc::new(Mutex::new(Vec::new())),
            channels: default_config.channels(),
            sample_rate: default_config.sample_rate(),
        })
    }

    /// Build the input stream at the device's native config.
    fn build_stream(&self) -> Result<cpal::Stream> {
        use cpal::SampleFormat;

        let default_config =
            self.device
                .default_input_config()
                .map_err(|e| VaaniError::DeviceAccess {
                    message: format!("Failed to query default input config: {}", e),
                })?;

        let stream_config: cpal::StreamConfig = default_config.clone().into();

        let err_callback = |err| {
            eprintln!("Audio stream error: {}", err);
        };

        let chunks = Arc::clone(&self.chunks);

        match default_config.sample_format() {
            SampleFormat::F32 => self
                .device
                .build_input_stream(
                    &stream_config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if let Ok(mut buffered) = chunks.lock() {
                            buffered.push(data.to_vec());
                        }
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| VaaniError::DeviceAccess {
                    message: format!("Failed to build f32 input stream: {}", e),
                }),
            SampleFormat::I16 => self
                .device
                .build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let normalized: Vec<f32> =
                            data.iter().map(|&s| f32::from(s) / 32768.0).collect();
                        if let Ok(mut buffered) = chunks.lock() {
                            buffered.push(normalized);
                        }
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| VaaniError::DeviceAccess {
                    message: format!("Failed to build i16 input stream: {}", e),
                }),
            fmt => Err(VaaniError::DeviceAccess {
                message: format!(
                    "Unsupported native sample format: {:?}. \
                     Try specifying a device with --device.",
                    fmt
                ),
            }),
        }
    }
}

impl ChunkSource for CpalChunkSource {
    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(()); // Already started
        }

        let stream = self.build_stream()?;
        stream.play().map_err(|e| VaaniError::DeviceAccess {
            message: format!("Failed to start audio stream: {}", e),
        })?;

        self.stream = Some(SendableStream(stream));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(sendable_stream) = self.stream.take() {
            sendable_stream
                .0
                .pause()
                .map_err(|e| VaaniError::DeviceAccess {
                    message: format!("Failed to stop audio stream: {}", e),
                })?;
        }
        Ok(())
    }

    fn take_chunks(&mut self) -> Result<Vec<Vec<f32>>> {
        let mut buffered = self.chunks.lock().map_err(|e| VaaniError::DeviceAccess {
            message: format!("Failed to lock chunk buffer: {}", e),
        })?;

        Ok(std::mem::take(&mut *buffered))
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
