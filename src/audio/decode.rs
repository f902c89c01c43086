use anyhow::Result;

use super::packet::FRAME_SIZE;

/// Decoder seam between the voice transport's codec and the capture engine.
///
/// Implementations turn one encoded frame into interleaved PCM bytes in the
/// engine's fixed operating format (48kHz stereo s16le). Codec internals live
/// behind this trait; the engine never inspects encoded bytes itself.
///
/// Codec frames are independent, so a failed decode affects only that frame;
/// reconstruction skips it and continues.
pub trait FrameDecoder: Send + Sync {
    fn decode(&self, frame: &[u8]) -> Result<Vec<u8>>;
}

/// Identity decoder for transports that already deliver raw PCM.
///
/// Rejects frames that are not whole sample-frames, since a torn frame would
/// shift every later channel sample.
pub struct PcmPassthrough;

impl FrameDecoder for PcmPassthrough {
    fn decode(&self, frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() % FRAME_SIZE != 0 {
            anyhow::bail!(
                "PCM frame of {} bytes is not frame-aligned ({}-byte frames)",
                frame.len(),
                FRAME_SIZE
            );
        }
        Ok(frame.to_vec())
    }
}
