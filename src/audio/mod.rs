pub mod decode;
pub mod packet;
pub mod reconstruct;
pub mod wav;
pub mod window;

pub use decode::{FrameDecoder, PcmPassthrough};
pub use packet::{Packet, BYTES_PER_MS, CHANNELS, FRAME_SIZE, SAMPLE_RATE};
pub use reconstruct::{reconstruct, reconstruct_to_container, ReconstructedClip, SpeakerId};
pub use window::SlidingWindowBuffer;
