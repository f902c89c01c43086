// WAV container packaging for reconstructed clips
//
// Wraps a raw PCM buffer in the standard 44-byte RIFF/WAVE header so any
// downstream player accepts the clip. The header fields are fixed by the
// engine's operating format: PCM, 48kHz, stereo, 16-bit, block align 4.

use anyhow::{Context, Result};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

use super::packet::{BYTES_PER_MS, CHANNELS, SAMPLE_RATE};

/// RIFF + fmt + data headers for 16-bit integer PCM.
pub const HEADER_LEN: usize = 44;

fn spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Package raw interleaved s16le PCM bytes as a complete WAV file in memory.
pub fn wrap(pcm: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_LEN + pcm.len()));
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec()).context("Failed to start WAV container")?;

        for sample in pcm.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .context("Failed to write sample to WAV container")?;
        }

        writer
            .finalize()
            .context("Failed to finalize WAV container")?;
    }

    Ok(cursor.into_inner())
}

/// Playable duration of a wrapped container, in milliseconds.
pub fn duration_ms(container: &[u8]) -> u64 {
    (container.len().saturating_sub(HEADER_LEN) as u64) / BYTES_PER_MS
}

/// Write a wrapped clip to disk under a session-scoped filename.
pub fn save_clip(dir: impl AsRef<Path>, session_id: &str, container: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).context("Failed to create clip output directory")?;

    let path = dir.join(format!(
        "{}-clip-{}.wav",
        session_id,
        chrono::Utc::now().timestamp_millis()
    ));
    fs::write(&path, container)
        .with_context(|| format!("Failed to write clip file: {:?}", path))?;

    info!(
        "Saved {:.1}s clip to {}",
        duration_ms(container) as f64 / 1000.0,
        path.display()
    );

    Ok(path)
}
