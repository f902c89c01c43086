use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Session uptime in seconds
    pub uptime_secs: f64,

    /// Number of speakers observed so far
    pub speaker_count: usize,

    /// Total packets currently retained across all speaker buffers
    pub packets_buffered: usize,

    /// Total packets ingested since the session started
    pub packets_ingested: u64,
}
