// Integration tests for session state and channel-driven ingestion

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Mutex};
use voice_replay::{
    run_ingest, Participant, PcmPassthrough, SessionConfig, VoiceEvent, VoiceSession,
};

fn session() -> VoiceSession {
    let config = SessionConfig {
        session_id: "test-session".to_string(),
        ..SessionConfig::default()
    };
    VoiceSession::new(config, 777, 99)
}

fn pcm_of(sample: i16, frames: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames * 4);
    for _ in 0..frames * 2 {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

#[tokio::test]
async fn test_ingest_loop_fills_speaker_buffers() -> Result<()> {
    let session = Arc::new(Mutex::new(session()));
    let (tx, rx) = mpsc::channel(100);

    let ingest_handle = tokio::spawn(run_ingest(Arc::clone(&session), rx));

    tx.send(VoiceEvent::SpeakingStart { speaker: 1 }).await?;
    for i in 0..10u64 {
        tx.send(VoiceEvent::Frame {
            speaker: 1,
            payload: pcm_of(300, 960),
            timestamp_ms: 1000 + i * 20,
        })
        .await?;
    }
    tx.send(VoiceEvent::Frame {
        speaker: 2,
        payload: pcm_of(-300, 960),
        timestamp_ms: 1100,
    })
    .await?;

    // Empty frames are dropped at the door, never buffered.
    tx.send(VoiceEvent::Frame {
        speaker: 3,
        payload: vec![],
        timestamp_ms: 1200,
    })
    .await?;

    drop(tx);
    let ingested = ingest_handle.await?;
    assert_eq!(ingested, 11);

    let session = session.lock().await;
    let stats = session.stats();
    assert_eq!(stats.speaker_count, 2);
    assert_eq!(stats.packets_ingested, 11);
    // Speaker 1 also holds its speaking-start marker.
    assert_eq!(stats.packets_buffered, 12);

    let snapshots = session.snapshot_all();
    assert_eq!(snapshots[&1].len(), 11);
    assert!(snapshots[&1][0].is_marker());
    assert_eq!(snapshots[&2].len(), 1);
    assert!(!snapshots.contains_key(&3));

    Ok(())
}

#[tokio::test]
async fn test_clip_request_interleaves_with_ingestion() -> Result<()> {
    let session = Arc::new(Mutex::new(session()));
    let (tx, rx) = mpsc::channel(16);

    let ingest_handle = tokio::spawn(run_ingest(Arc::clone(&session), rx));

    tx.send(VoiceEvent::Frame {
        speaker: 5,
        payload: pcm_of(250, 960),
        timestamp_ms: 1000,
    })
    .await?;

    // Give the pump a chance to drain before reading.
    tokio::task::yield_now().await;

    let container = {
        let session = session.lock().await;
        session.clip(5000, 0, &PcmPassthrough)?
    };

    // Ingestion continues after the snapshot-based read.
    tx.send(VoiceEvent::Frame {
        speaker: 5,
        payload: pcm_of(250, 960),
        timestamp_ms: 1020,
    })
    .await?;
    drop(tx);
    ingest_handle.await?;

    let container = container.expect("buffered audio should reconstruct");
    let reader = hound::WavReader::new(std::io::Cursor::new(container))?;
    assert_eq!(reader.spec().sample_rate, 48_000);

    Ok(())
}

#[test]
fn test_should_teardown_truth_table() {
    let session = session(); // self_id = 99

    let human = Participant {
        id: 1,
        automated: false,
    };
    let bot = Participant {
        id: 2,
        automated: true,
    };
    let engine = Participant {
        id: 99,
        automated: true,
    };

    // Humans present and the engine still in the channel: keep running.
    assert!(!session.should_teardown(&[human.clone(), engine.clone()]));
    assert!(!session.should_teardown(&[human.clone(), bot.clone(), engine.clone()]));

    // Only automated members left: tear down.
    assert!(session.should_teardown(&[bot.clone(), engine.clone()]));
    assert!(session.should_teardown(&[engine.clone()]));

    // Engine itself was disconnected: tear down even with humans around.
    assert!(session.should_teardown(&[human, bot]));

    // Nobody at all.
    assert!(session.should_teardown(&[]));
}

#[test]
fn test_buffers_created_lazily_per_speaker() {
    let mut session = session();
    assert_eq!(session.stats().speaker_count, 0);

    session.get_or_create_buffer(10);
    session.get_or_create_buffer(10);
    session.get_or_create_buffer(11);

    assert_eq!(session.stats().speaker_count, 2);
}
