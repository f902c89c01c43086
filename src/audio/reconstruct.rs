// Clip reconstruction: time-aligned mixing of buffered speaker packets
//
// Takes snapshots of one or more speakers' packet sequences and rebuilds the
// requested time slice as a single linear PCM buffer. Packets are decoded,
// grouped into marker-delimited utterance segments, placed at byte-exact
// sample offsets relative to the earliest audio in range, and mixed where
// placements overlap.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

use super::decode::FrameDecoder;
use super::packet::{Packet, BYTES_PER_MS, FRAME_SIZE};
use super::wav;

/// Identifies one session participant whose audio is captured independently.
pub type SpeakerId = u64;

/// A mixed, frame-aligned PCM buffer spanning the reconstructed time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedClip {
    /// Interleaved 48kHz stereo s16le samples. Length is always a whole
    /// multiple of the sample-frame size.
    pub pcm: Vec<u8>,
}

impl ReconstructedClip {
    pub fn duration_ms(&self) -> u64 {
        self.pcm.len() as u64 / BYTES_PER_MS
    }
}

/// One utterance: decoded chunks concatenated in arrival order, placed as a
/// unit at its first chunk's start time.
struct SegmentRun {
    start_ms: Option<f64>,
    pcm: Vec<u8>,
}

impl SegmentRun {
    fn new() -> Self {
        Self {
            start_ms: None,
            pcm: Vec::new(),
        }
    }
}

/// Rebuild the time slice `[start_ms, start_ms + duration_ms]` from the given
/// per-speaker packet snapshots into one mixed PCM buffer.
///
/// Returns `None` when no packet falls in range or nothing in range decodes
/// to audio. A packet the decoder rejects is skipped, not fatal: codec frames
/// are independent.
pub fn reconstruct(
    packets_by_speaker: &HashMap<SpeakerId, Vec<Packet>>,
    duration_ms: u64,
    start_ms: u64,
    decoder: &dyn FrameDecoder,
) -> Option<ReconstructedClip> {
    let end_ms = start_ms + duration_ms;

    let mut segments: Vec<SegmentRun> = Vec::new();
    let mut min_start: Option<f64> = None;
    let mut max_end: Option<f64> = None;
    let mut in_range = 0usize;

    for (speaker, packets) in packets_by_speaker {
        let mut current: Option<SegmentRun> = None;

        for packet in packets
            .iter()
            .filter(|p| p.timestamp_ms >= start_ms && p.timestamp_ms <= end_ms)
        {
            in_range += 1;
            let ts = packet.timestamp_ms as f64;

            match &packet.payload {
                None => {
                    // Speaking-start marker: close the current utterance and
                    // open a new one. The marker's own timestamp still bounds
                    // the output range even if no audio follows it.
                    min_start = Some(min_start.map_or(ts, |m| m.min(ts)));
                    max_end = Some(max_end.map_or(ts, |m| m.max(ts)));
                    if let Some(seg) = current.take() {
                        segments.push(seg);
                    }
                    current = Some(SegmentRun::new());
                }
                Some(encoded) => {
                    let pcm = match decoder.decode(encoded) {
                        Ok(pcm) => pcm,
                        Err(e) => {
                            warn!(
                                "Skipping undecodable {}-byte frame from speaker {} at {}ms: {}",
                                encoded.len(),
                                speaker,
                                packet.timestamp_ms,
                                e
                            );
                            continue;
                        }
                    };

                    // Playback duration comes from the decoded byte count;
                    // the packet timestamp marks the END of the chunk.
                    let chunk_ms = pcm.len() as f64 / BYTES_PER_MS as f64;
                    let chunk_start = ts - chunk_ms;

                    min_start = Some(min_start.map_or(chunk_start, |m| m.min(chunk_start)));
                    max_end = Some(max_end.map_or(ts, |m| m.max(ts)));

                    let seg = current.get_or_insert_with(SegmentRun::new);
                    if seg.start_ms.is_none() {
                        seg.start_ms = Some(chunk_start);
                    }
                    seg.pcm.extend_from_slice(&pcm);
                }
            }
        }

        if let Some(seg) = current.take() {
            segments.push(seg);
        }
    }

    if in_range == 0 {
        debug!("No packets in [{}, {}]ms", start_ms, end_ms);
        return None;
    }

    let (min_start, max_end) = match (min_start, max_end) {
        (Some(lo), Some(hi)) if hi >= lo => (lo, hi),
        _ => return None,
    };

    if segments.iter().all(|s| s.pcm.is_empty()) {
        debug!("No decodable audio in [{}, {}]ms", start_ms, end_ms);
        return None;
    }

    // Size the output to the full audible span, rounded down to whole
    // sample-frames. The trailing partial frame is dropped, not padded.
    let span_bytes = ((max_end - min_start) * BYTES_PER_MS as f64) as usize;
    let data_len = (span_bytes / FRAME_SIZE) * FRAME_SIZE;
    let mut data = vec![0u8; data_len];

    for seg in &segments {
        let (Some(seg_start), false) = (seg.start_ms, seg.pcm.is_empty()) else {
            continue;
        };

        let offset_bytes = ((seg_start - min_start) * BYTES_PER_MS as f64) as usize;
        let offset = (offset_bytes / FRAME_SIZE) * FRAME_SIZE;

        debug!(
            "Placing {}-byte segment at offset {} ({}ms into clip)",
            seg.pcm.len(),
            offset,
            (seg_start - min_start) as u64
        );
        mix_into(&mut data, offset, &seg.pcm);
    }

    Some(ReconstructedClip { pcm: data })
}

/// Reconstruct and package as a playable WAV container in one step.
pub fn reconstruct_to_container(
    packets_by_speaker: &HashMap<SpeakerId, Vec<Packet>>,
    duration_ms: u64,
    start_ms: u64,
    decoder: &dyn FrameDecoder,
) -> Result<Option<Vec<u8>>> {
    match reconstruct(packets_by_speaker, duration_ms, start_ms, decoder) {
        Some(clip) => Ok(Some(wav::wrap(&clip.pcm)?)),
        None => Ok(None),
    }
}

/// Write a PCM run into `data` at `offset`, one 16-bit sample at a time.
///
/// Placements from different segments and speakers overlap, so this cannot
/// byte-blit: where both the existing and incoming sample are non-zero they
/// are averaged with floor semantics; silence on either side passes the other
/// through unchanged. Samples that would land past the end of the buffer are
/// dropped, which is the expected steady state at clip edges.
fn mix_into(data: &mut [u8], offset: usize, run: &[u8]) {
    for (i, sample) in run.chunks_exact(2).enumerate() {
        let pos = offset + i * 2;
        if pos + 2 > data.len() {
            break;
        }

        let incoming = i16::from_le_bytes([sample[0], sample[1]]);
        if incoming == 0 {
            continue;
        }

        let existing = i16::from_le_bytes([data[pos], data[pos + 1]]);
        let mixed = if existing == 0 {
            incoming
        } else {
            // div_euclid floors negative sums; plain / would truncate
            // toward zero.
            ((incoming as i32 + existing as i32).div_euclid(2)) as i16
        };

        data[pos..pos + 2].copy_from_slice(&mixed.to_le_bytes());
    }
}
