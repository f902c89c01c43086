use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::config::SessionConfig;
use super::stats::SessionStats;
use crate::audio::{
    reconstruct_to_container, FrameDecoder, Packet, SlidingWindowBuffer, SpeakerId,
};

/// A member of the voice channel, as reported by the transport.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: SpeakerId,
    /// True for bots and other automated members; they don't keep a session
    /// alive on their own.
    pub automated: bool,
}

/// Per-voice-channel capture state: one sliding-window buffer per observed
/// speaker, created lazily on first observation and dropped with the session.
///
/// The session object is owned by the orchestration layer and passed to
/// whatever needs it; the engine never reaches into ambient global state.
pub struct VoiceSession {
    config: SessionConfig,
    /// Voice channel currently captured.
    channel_id: u64,
    /// The engine's own participant id in the channel.
    self_id: SpeakerId,
    buffers: HashMap<SpeakerId, SlidingWindowBuffer>,
    started_at: DateTime<Utc>,
    packets_ingested: u64,
}

impl VoiceSession {
    pub fn new(config: SessionConfig, channel_id: u64, self_id: SpeakerId) -> Self {
        info!(
            "Capture session {} started on channel {} ({}s retention)",
            config.session_id,
            channel_id,
            config.retention_ms / 1000
        );

        Self {
            config,
            channel_id,
            self_id,
            buffers: HashMap::new(),
            started_at: Utc::now(),
            packets_ingested: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Buffer for a speaker, created on first observation.
    pub fn get_or_create_buffer(&mut self, speaker: SpeakerId) -> &mut SlidingWindowBuffer {
        let retention_ms = self.config.retention_ms;
        self.buffers.entry(speaker).or_insert_with(|| {
            info!("First packet from speaker {}, creating buffer", speaker);
            SlidingWindowBuffer::new(retention_ms)
        })
    }

    /// Append one arrived packet to the speaker's buffer.
    pub fn ingest_packet(&mut self, speaker: SpeakerId, packet: Packet) {
        self.packets_ingested += 1;
        self.get_or_create_buffer(speaker).append(packet);
    }

    /// Record a speaking-start boundary for the speaker.
    pub fn mark_speaking(&mut self, speaker: SpeakerId) {
        debug!("Speaker {} started speaking", speaker);
        self.get_or_create_buffer(speaker).flag_speaking_start();
    }

    /// Owned snapshots of every speaker's buffer, safe to hand to a
    /// reconstruction running outside the session lock.
    pub fn snapshot_all(&self) -> HashMap<SpeakerId, Vec<Packet>> {
        self.buffers
            .iter()
            .map(|(id, buf)| (*id, buf.snapshot()))
            .collect()
    }

    /// Reconstruct the requested slice across all buffered speakers and
    /// package it as a WAV container. `None` when nothing was captured in
    /// range (including ranges already evicted by the retention window).
    pub fn clip(
        &self,
        duration_ms: u64,
        start_ms: u64,
        decoder: &dyn FrameDecoder,
    ) -> Result<Option<Vec<u8>>> {
        let snapshots = self.snapshot_all();
        reconstruct_to_container(&snapshots, duration_ms, start_ms, decoder)
    }

    /// Whether the orchestration layer should tear this session down: true
    /// when no non-automated participant remains in the channel, or when the
    /// engine itself is no longer a member. Pure; the caller drives the
    /// periodic tick.
    pub fn should_teardown(&self, participants: &[Participant]) -> bool {
        let humans_left = participants.iter().any(|p| !p.automated);
        let self_present = participants.iter().any(|p| p.id == self.self_id);
        !humans_left || !self_present
    }

    pub fn stats(&self) -> SessionStats {
        let uptime = Utc::now().signed_duration_since(self.started_at);
        SessionStats {
            started_at: self.started_at,
            uptime_secs: uptime.num_milliseconds() as f64 / 1000.0,
            speaker_count: self.buffers.len(),
            packets_buffered: self.buffers.values().map(|b| b.len()).sum(),
            packets_ingested: self.packets_ingested,
        }
    }
}
