//! Capture session management
//!
//! This module provides the `VoiceSession` abstraction that manages:
//! - One sliding-window buffer per observed speaker (created lazily)
//! - Channel-driven ingestion from the voice transport
//! - On-demand clip reconstruction over buffer snapshots
//! - The idle-teardown predicate driven by the orchestration layer
//! - Session statistics

mod config;
mod ingest;
mod session;
mod stats;

pub use config::SessionConfig;
pub use ingest::{run_ingest, VoiceEvent};
pub use session::{Participant, VoiceSession};
pub use stats::SessionStats;
