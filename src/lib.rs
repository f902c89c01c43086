pub mod audio;
pub mod config;
pub mod session;

pub use audio::{
    reconstruct, reconstruct_to_container, FrameDecoder, Packet, PcmPassthrough,
    ReconstructedClip, SlidingWindowBuffer, SpeakerId, BYTES_PER_MS, CHANNELS, FRAME_SIZE,
    SAMPLE_RATE,
};
pub use config::Config;
pub use session::{run_ingest, Participant, SessionConfig, SessionStats, VoiceEvent, VoiceSession};
