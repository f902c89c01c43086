use anyhow::Result;
use tracing::info;
use voice_replay::{Config, BYTES_PER_MS, CHANNELS, SAMPLE_RATE};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/voice-replay")?;

    info!("Voice Replay v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Operating format: {}Hz, {} channels, {} bytes/ms",
        SAMPLE_RATE, CHANNELS, BYTES_PER_MS
    );
    info!(
        "Retention window: {}s, clips to {}",
        cfg.capture.retention_ms / 1000,
        cfg.clips.output_path
    );
    info!("Waiting for a voice transport to drive ingestion");

    Ok(())
}
