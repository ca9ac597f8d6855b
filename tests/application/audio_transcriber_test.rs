use std::sync::Arc;
use std::sync::atomic::Ordering;

use docsum::application::services::AudioProcessingError;
use docsum::domain::FileKind;

use crate::helpers::{
    StubCodec, StubEngine, counting_loader, failing_loader, scratch_is_empty, transcriber,
};

#[tokio::test]
async fn given_audio_at_exact_limit_when_transcribing_then_proceeds() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new(" limit reached ", Some(0.5)));
    let (loader, _) = counting_loader(Arc::clone(&engine));
    let transcriber = transcriber(StubCodec::new(), loader, scratch.path().to_path_buf());

    let transcript = transcriber
        .transcribe(&vec![0u8; 3600], "full.wav", FileKind::Wav)
        .await
        .unwrap();

    assert_eq!(transcript.duration_secs, 1800.0);
    assert_eq!(transcript.text, "limit reached");
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn given_audio_half_second_over_limit_when_transcribing_then_engine_is_never_called() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("unused", None));
    let (loader, loads) = counting_loader(Arc::clone(&engine));
    let transcriber = transcriber(StubCodec::new(), loader, scratch.path().to_path_buf());

    let result = transcriber
        .transcribe(&vec![0u8; 3601], "long.mp3", FileKind::Mp3)
        .await;

    assert!(matches!(
        result,
        Err(AudioProcessingError::DurationExceeded { duration_secs, .. }) if duration_secs == 1800.5
    ));
    assert_eq!(engine.calls(), 0);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_encode_failure_when_transcribing_then_scratch_dir_is_left_empty() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("unused", None));
    let (loader, _) = counting_loader(Arc::clone(&engine));
    let transcriber = transcriber(
        StubCodec::failing_encode(),
        loader,
        scratch.path().to_path_buf(),
    );

    let result = transcriber
        .transcribe(&[0u8; 10], "clip.wav", FileKind::Wav)
        .await;

    assert!(matches!(result, Err(AudioProcessingError::Transcoding(_))));
    assert_eq!(engine.calls(), 0);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_successful_transcription_when_done_then_scratch_dir_is_left_empty() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("fine", Some(0.9)));
    let (loader, _) = counting_loader(Arc::clone(&engine));
    let transcriber = transcriber(StubCodec::new(), loader, scratch.path().to_path_buf());

    transcriber
        .transcribe(&[0u8; 10], "clip.wav", FileKind::Wav)
        .await
        .unwrap();

    assert!(engine.saw_canonical_file.load(Ordering::SeqCst));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_many_requests_when_transcribing_then_engine_loads_once() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("again", None));
    let (loader, loads) = counting_loader(Arc::clone(&engine));
    let transcriber = Arc::new(transcriber(
        StubCodec::new(),
        loader,
        scratch.path().to_path_buf(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transcriber = Arc::clone(&transcriber);
            tokio::spawn(async move {
                transcriber
                    .transcribe(&[0u8; 8], &format!("clip-{i}.wav"), FileKind::Wav)
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(engine.calls(), 4);
}

#[tokio::test]
async fn given_engine_without_confidence_when_transcribing_then_confidence_is_none() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("no score", None));
    let (loader, _) = counting_loader(engine);
    let transcriber = transcriber(StubCodec::new(), loader, scratch.path().to_path_buf());

    let transcript = transcriber
        .transcribe(&[0u8; 4], "clip.wav", FileKind::Wav)
        .await
        .unwrap();

    assert_eq!(transcript.confidence, None);
}

#[tokio::test]
async fn given_failing_loader_when_transcribing_then_returns_engine_init_error() {
    let scratch = tempfile::tempdir().unwrap();
    let transcriber = transcriber(StubCodec::new(), failing_loader(), scratch.path().to_path_buf());

    let result = transcriber
        .transcribe(&[0u8; 4], "clip.wav", FileKind::Wav)
        .await;

    assert!(matches!(result, Err(AudioProcessingError::EngineInit(_))));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_warm_up_when_transcribing_later_then_loader_is_not_rerun() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = Arc::new(StubEngine::new("warm", None));
    let (loader, loads) = counting_loader(engine);
    let transcriber = transcriber(StubCodec::new(), loader, scratch.path().to_path_buf());

    transcriber.warm_up().await.unwrap();
    transcriber
        .transcribe(&[0u8; 4], "clip.wav", FileKind::Wav)
        .await
        .unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
