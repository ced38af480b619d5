//! End-to-end recording flow over a mock capture source: start a session,
//! accumulate chunks, stop, and verify the finished WAV with an independent
//! reader.

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use vaani::{MockChunkSource, Phase, SessionController, VaaniError};

fn read_wav(data: &[u8]) -> WavReader<Cursor<&[u8]>> {
    WavReader::new(Cursor::new(data)).expect("finished recording should be readable WAV")
}

#[test]
fn recorded_session_produces_playable_wav() {
    let source = MockChunkSource::new()
        .with_sample_rate(16000)
        .with_chunks(vec![vec![0.0, 0.25, 0.5], vec![-0.25, -0.5, 0.99]]);
    let mut session = SessionController::new(source);

    session.start().expect("session should start");
    assert_eq!(session.phase(), Phase::Recording);

    let file = session.stop().expect("session should stop cleanly").clone();
    assert_eq!(session.phase(), Phase::Ready);

    let reader = read_wav(&file.data);
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);
    assert_eq!(reader.duration(), 6);
}

#[test]
fn full_scale_samples_hit_the_int16_rails() {
    let source = MockChunkSource::new().with_chunks(vec![vec![0.0, 1.0, -1.0]]);
    let mut session = SessionController::new(source);

    session.start().unwrap();
    let file = session.stop().unwrap();

    // 44-byte header plus three 16-bit samples
    assert_eq!(file.data.len(), 50);

    let samples: Vec<i16> = read_wav(&file.data)
        .samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(samples, vec![0, i16::MAX, i16::MIN]);
}

#[test]
fn stereo_recording_keeps_channel_geometry() {
    let source = MockChunkSource::new()
        .with_channels(2)
        .with_sample_rate(44100)
        .with_chunks(vec![vec![0.5, -0.5]]);
    let mut session = SessionController::new(source);

    session.start().unwrap();
    let file = session.stop().unwrap();

    assert_eq!(file.channels, 2);
    assert_eq!(file.frames, 1);

    // Byte rate and block align follow from 2 ch x 16 bit x 44100 Hz
    assert_eq!(
        u32::from_le_bytes([file.data[28], file.data[29], file.data[30], file.data[31]]),
        176_400
    );
    assert_eq!(u16::from_le_bytes([file.data[32], file.data[33]]), 4);
}

#[test]
fn denied_microphone_leaves_the_session_retryable() {
    let source = MockChunkSource::new()
        .with_start_failure()
        .with_error_message("requested device is busy");
    let mut session = SessionController::new(source);

    match session.start() {
        Err(VaaniError::DeviceAccess { message }) => {
            assert!(message.contains("busy"));
        }
        other => panic!("expected DeviceAccess, got {:?}", other),
    }
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.last_recording().is_none());
}

#[test]
fn restarting_discards_audio_from_before_the_session() {
    let source = MockChunkSource::new()
        .with_buffered(vec![vec![0.7; 4800]])
        .with_chunks(vec![vec![0.1; 320]]);
    let mut session = SessionController::new(source);

    session.start().unwrap();
    let file = session.stop().unwrap();

    // The stale pre-session audio never reaches the encoder
    assert_eq!(file.frames, 320);
    assert_eq!(read_wav(&file.data).duration(), 320);
}

#[test]
fn saved_recording_is_readable_from_disk() {
    let source = MockChunkSource::new().with_chunks(vec![vec![0.25; 800]]);
    let mut session = SessionController::new(source);

    session.start().unwrap();
    let file = session.stop().unwrap();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recording.wav");
    std::fs::write(&path, &file.data).expect("write recording");

    let reader = hound::WavReader::open(&path).expect("open saved recording");
    assert_eq!(reader.spec().sample_rate, 16000);
    assert_eq!(reader.duration(), 800);
}

#[test]
fn consecutive_rounds_each_yield_a_fresh_file() {
    let source = MockChunkSource::new().with_chunks(vec![vec![0.3; 160]]);
    let mut session = SessionController::new(source);

    session.start().unwrap();
    let first_len = session.stop().unwrap().data.len();

    session.start().unwrap();
    let file = session.stop().unwrap();

    assert_eq!(file.data.len(), first_len);
    assert_eq!(file.frames, 160);
    assert_eq!(session.phase(), Phase::Ready);
}
