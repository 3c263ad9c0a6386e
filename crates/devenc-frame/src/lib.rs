//! Binary video-image frame protocol.
//!
//! Every frame starts with a fixed 32-byte big-endian header:
//! - A 4-byte magic number ("VDEO") for payload validation
//! - A 2-byte header-format version (currently 1)
//! - A 2-byte pixel-mode code selecting the native element type
//! - An 8-byte signed frame sequence number (-1 when unknown)
//! - 4-byte signed width and height
//! - A 2-byte endianness probe, the header size, and two padding words
//!
//! Pixel data follows as `width * height * element_size` row-major bytes.
//! A header-only payload (no pixel bytes at all) is a valid 0x0 frame.

pub mod codec;
pub mod error;
pub mod mode;

pub use codec::{
    decode_frame, encode_frame, FrameHeader, VideoFrame, HEADER_SIZE, MAGIC,
    UNKNOWN_FRAME_NUMBER, VERSION,
};
pub use error::{FrameError, Result};
pub use mode::PixelMode;
