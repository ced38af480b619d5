//! Interactive recording and translation session.
//!
//! Composition root: wires the capture controller, waveform encoder,
//! transfer client, and playback together. The flow per round is
//! record → encode → save + play → upload → save + play the translation.

use crate::audio::capture::{CpalChunkSource, suppress_audio_warnings};
use crate::audio::playback;
use crate::audio::source::ChunkSource;
use crate::defaults::{RECORDED_FILE_NAME, TIMER_TICK_MS, TRANSLATED_FILE_STEM};
use crate::error::Result;
use crate::session::{SessionController, WaveformFile};
use crate::transfer::{TranslationClient, TranslationResult};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options for the interactive session, filled from CLI flags.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Capture device name; None picks the best default.
    pub device: Option<String>,
    /// Directory receiving the recorded and translated audio files.
    pub output_dir: PathBuf,
    /// Exit after one record-translate round.
    pub once: bool,
    /// Skip local playback, only save files.
    pub no_play: bool,
    /// Suppress status messages (errors still print).
    pub quiet: bool,
    /// Verbosity level (1: request details, 2: full diagnostics).
    pub verbosity: u8,
}

/// Run the interactive loop until EOF on stdin (or after one round with
/// `--once`).
///
/// Every per-round failure is reported as a status line and returns the loop
/// to the prompt; only startup failures (no capture device at all, unwritable
/// output directory) abort.
pub async fn run_session(opts: SessionOptions) -> Result<()> {
    // Quiet down JACK/ALSA probing noise before the first device query
    suppress_audio_warnings();

    let source = CpalChunkSource::new(opts.device.as_deref())?;
    if opts.verbosity >= 2 {
        eprintln!(
            "vaani: capturing at {} ch / {} Hz (device native format)",
            source.channels(),
            source.sample_rate(),
        );
    }

    let mut session = SessionController::new(source);
    let client = TranslationClient::new();
    std::fs::create_dir_all(&opts.output_dir)?;

    loop {
        if !opts.quiet {
            eprint!("Press Enter to start recording (Ctrl+D to quit)... ");
            let _ = io::stderr().flush();
        }
        if read_stdin_line().await?.is_none() {
            break; // EOF
        }

        if let Err(e) = session.start() {
            eprintln!("Error accessing microphone: {}", e);
            if opts.once {
                break;
            }
            continue;
        }
        if !opts.quiet {
            eprintln!("Listening... press Enter to stop.");
        }

        wait_for_stop(&session, opts.quiet).await?;

        if !opts.quiet {
            eprintln!("Processing audio...");
        }
        let recording = match session.stop() {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error processing audio: {}", e);
                if opts.once {
                    break;
                }
                continue;
            }
        };

        handle_finished_recording(recording, &client, &opts).await;

        if opts.once {
            break;
        }
    }

    Ok(())
}

/// Keep the elapsed-time line on stderr fresh until the user presses Enter.
async fn wait_for_stop(
    session: &SessionController<CpalChunkSource>,
    quiet: bool,
) -> Result<()> {
    let mut line = tokio::task::spawn_blocking(read_line_blocking);
    let mut ticker = tokio::time::interval(Duration::from_millis(TIMER_TICK_MS));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !quiet {
                    eprint!("\rTime: {:.2}s ", session.elapsed().as_secs_f64());
                    let _ = io::stderr().flush();
                }
            }
            result = &mut line => {
                if !quiet {
                    // Clear the timer line
                    eprint!("\r{:40}\r", "");
                    let _ = io::stderr().flush();
                }
                // EOF while recording also counts as a stop request
                let _stopped = result.map_err(|e| io::Error::other(e.to_string()))??;
                return Ok(());
            }
        }
    }
}

/// Save and play the recording, then translate it and play the result.
/// Failures are reported and leave the loop ready for the next round.
async fn handle_finished_recording(
    recording: &WaveformFile,
    client: &TranslationClient,
    opts: &SessionOptions,
) {
    let wav_path = opts.output_dir.join(RECORDED_FILE_NAME);
    if let Err(e) = std::fs::write(&wav_path, &recording.data) {
        eprintln!("Error saving recording: {}", e);
        return;
    }
    if !opts.quiet {
        eprintln!(
            "Recording complete: {} ({:.2}s, {} ch, {} Hz)",
            wav_path.display(),
            recording.duration_secs(),
            recording.channels,
            recording.sample_rate,
        );
    }

    if !opts.no_play
        && let Err(e) = play_blocking(recording.data.clone()).await
    {
        eprintln!("Could not play recording: {}", e);
    }

    if !opts.quiet {
        eprintln!("Translating audio...");
    }
    if opts.verbosity >= 1 {
        eprintln!(
            "  uploading {} bytes to {}",
            recording.data.len(),
            client.endpoint(),
        );
    }

    match client.translate(recording).await {
        Ok(result) => handle_translation(&result, opts).await,
        Err(e) => eprintln!("Error during translation: {}", e),
    }
}

/// Save the opaque translated audio; play it only when it is WAV.
async fn handle_translation(result: &TranslationResult, opts: &SessionOptions) {
    let path = opts
        .output_dir
        .join(format!("{}.{}", TRANSLATED_FILE_STEM, result.file_extension()));
    if let Err(e) = std::fs::write(&path, &result.bytes) {
        eprintln!("Error saving translated audio: {}", e);
        return;
    }
    if !opts.quiet {
        eprintln!("Translation complete: {}", path.display());
    }

    if opts.no_play {
        return;
    }

    if result.is_wav() {
        if let Err(e) = play_blocking(result.bytes.clone()).await {
            eprintln!("Could not play translated audio: {}", e);
        }
    } else if !opts.quiet {
        eprintln!(
            "Translated audio is not WAV ({}); open {} with a media player.",
            result.content_type.as_deref().unwrap_or("unknown type"),
            path.display(),
        );
    }
}

/// Playback blocks on the output device; run it off the async runtime.
async fn play_blocking(bytes: Vec<u8>) -> Result<()> {
    tokio::task::spawn_blocking(move || playback::play_wav(&bytes))
        .await
        .map_err(|e| io::Error::other(e.to_string()).into())
        .and_then(|r| r)
}

/// Read one line from stdin without blocking the runtime.
async fn read_stdin_line() -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(read_line_blocking)
        .await
        .map_err(|e| io::Error::other(e.to_string()))?
}

/// Read one line from stdin; None on EOF.
fn read_line_blocking() -> io::Result<Option<String>> {
    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Where the recorded WAV for an output directory lands (used by tests and
/// by callers that post-process the file).
pub fn recording_path(output_dir: &Path) -> PathBuf {
    output_dir.join(RECORDED_FILE_NAME)
}
