/// Fixed operating format for the capture engine.
///
/// The voice transport delivers audio decoded to 48kHz 16-bit stereo PCM,
/// interleaved little-endian. All offset arithmetic in reconstruction is
/// derived from these constants.
pub const SAMPLE_RATE: u32 = 48_000;
pub const CHANNELS: u16 = 2;
pub const BYTES_PER_SAMPLE: u32 = 2;

/// One time-aligned sample across all channels (16-bit stereo = 4 bytes).
pub const FRAME_SIZE: usize = (CHANNELS as u32 * BYTES_PER_SAMPLE) as usize;

/// PCM bytes per millisecond of audio: 48000 * 2 * 2 / 1000.
pub const BYTES_PER_MS: u64 =
    (SAMPLE_RATE as u64 * CHANNELS as u64 * BYTES_PER_SAMPLE as u64) / 1000;

/// A single captured voice packet for one speaker.
///
/// Packets are stamped with the wall-clock arrival time, not a media
/// timestamp; delivery jitter means arrival order is only near-monotonic.
/// A packet with no payload is a marker: it records that a new utterance
/// began at this instant (the transport sends nothing during silence, so
/// without markers reconstruction would bridge unrelated utterances).
#[derive(Debug, Clone)]
pub struct Packet {
    /// Wall-clock arrival time in milliseconds.
    pub timestamp_ms: u64,
    /// Encoded audio bytes; `None` for a speaking-start marker.
    pub payload: Option<Vec<u8>>,
}

impl Packet {
    pub fn new(timestamp_ms: u64, payload: Vec<u8>) -> Self {
        Self {
            timestamp_ms,
            payload: Some(payload),
        }
    }

    /// A speaking-start marker. Carries no decodable payload and must never
    /// reach the decoder.
    pub fn marker(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            payload: None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.payload.is_none()
    }
}

/// Current wall-clock time in milliseconds, as used for packet stamping.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
