use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "standup-2026-08-30")
    pub session_id: String,

    /// How much audio to retain per speaker, in milliseconds
    /// Default: 90000 (90 seconds)
    pub retention_ms: u64,

    /// How long the session may sit without live participants before the
    /// orchestration layer should tear it down, in milliseconds
    pub idle_timeout_ms: u64,

    /// Directory where reconstructed clips are written
    pub clip_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            retention_ms: 90_000,
            idle_timeout_ms: 5 * 60 * 1000,
            clip_dir: PathBuf::from("clips"),
        }
    }
}
