// Channel-driven ingestion from the voice transport
//
// The transport (out of scope here) delivers per-speaker encoded frames and
// speaking-start notifications. This loop pumps them into the session's
// sliding-window buffers. The append path does no decoding and no I/O, so it
// never becomes a bottleneck behind the transport.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use super::session::VoiceSession;
use crate::audio::{Packet, SpeakerId};

/// One event from the voice transport.
#[derive(Debug, Clone)]
pub enum VoiceEvent {
    /// An encoded audio frame arrived for a speaker.
    Frame {
        speaker: SpeakerId,
        payload: Vec<u8>,
        timestamp_ms: u64,
    },
    /// The transport signalled that a speaker began a new utterance.
    SpeakingStart { speaker: SpeakerId },
}

/// Pump transport events into the session until the sender side closes.
///
/// The session lock is held per event only, so clip requests interleave
/// freely with ingestion.
pub async fn run_ingest(
    session: Arc<Mutex<VoiceSession>>,
    mut rx: mpsc::Receiver<VoiceEvent>,
) -> u64 {
    info!("Ingestion started");
    let mut ingested = 0u64;

    while let Some(event) = rx.recv().await {
        match event {
            VoiceEvent::Frame {
                speaker,
                payload,
                timestamp_ms,
            } => {
                if payload.is_empty() {
                    warn!(
                        "Dropping empty frame from speaker {} at {}ms",
                        speaker, timestamp_ms
                    );
                    continue;
                }

                let mut session = session.lock().await;
                session.ingest_packet(speaker, Packet::new(timestamp_ms, payload));
                ingested += 1;
            }
            VoiceEvent::SpeakingStart { speaker } => {
                let mut session = session.lock().await;
                session.mark_speaking(speaker);
            }
        }
    }

    info!("Ingestion stopped after {} frames", ingested);
    ingested
}
