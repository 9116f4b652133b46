mod frame_codec;
mod frame_header;

pub use frame_codec::FrameCodec;
pub use frame_header::{FrameHeader, FrameType};
