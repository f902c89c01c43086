// Sliding-window packet store for a single speaker
//
// Ingestion appends at the tail; packets older than the retention window
// (relative to the newest timestamp seen) are evicted from the head.
// Reconstruction reads an owned snapshot, never the live deque.

use std::collections::VecDeque;
use tracing::debug;

use super::packet::{now_ms, Packet};

/// Rolling buffer of captured packets for exactly one speaker.
pub struct SlidingWindowBuffer {
    packets: VecDeque<Packet>,
    /// Maximum age a packet may reach before eviction, in milliseconds.
    retention_ms: u64,
}

impl SlidingWindowBuffer {
    pub fn new(retention_ms: u64) -> Self {
        Self {
            packets: VecDeque::new(),
            retention_ms,
        }
    }

    /// Append a packet at the tail, then evict everything that fell out of
    /// the retention window relative to this packet's timestamp.
    ///
    /// No ordering is enforced beyond arrival order; timestamps are only
    /// near-monotonic under delivery jitter.
    pub fn append(&mut self, packet: Packet) {
        let latest = packet.timestamp_ms;
        self.packets.push_back(packet);
        self.truncate(latest);
    }

    /// Evict from the head while the head packet is older than
    /// `latest_ms - retention_ms`.
    ///
    /// Front-only eviction assumes near-monotonic arrival; under heavy
    /// reordering a stale packet behind a newer one can outlive the window.
    /// Accepted approximation.
    pub fn truncate(&mut self, latest_ms: u64) {
        let mut evicted = 0usize;
        while let Some(head) = self.packets.front() {
            if head.timestamp_ms + self.retention_ms < latest_ms {
                self.packets.pop_front();
                evicted += 1;
            } else {
                break;
            }
        }

        if evicted > 0 {
            debug!(
                "Evicted {} packets older than {}ms ({} retained)",
                evicted,
                latest_ms.saturating_sub(self.retention_ms),
                self.packets.len()
            );
        }
    }

    /// Record that a new utterance began now.
    ///
    /// The transport is silence-suppressed: no packets arrive while the
    /// speaker is quiet, so reconstruction needs an explicit boundary to
    /// avoid bridging unrelated utterances.
    pub fn flag_speaking_start(&mut self) {
        self.append(Packet::marker(now_ms()));
    }

    /// Owned copy of the current packet sequence.
    ///
    /// The copy stays valid for the caller, but makes no promise about the
    /// live buffer: ingestion may truncate it before the caller finishes.
    pub fn snapshot(&self) -> Vec<Packet> {
        self.packets.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }
}
