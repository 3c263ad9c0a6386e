/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame header contains an invalid magic number.
    #[error("invalid frame magic 0x{found:08X} (expected 0x5644454F \"VDEO\")")]
    InvalidMagic { found: u32 },

    /// The pixel-mode code is outside the closed mapping table.
    #[error("unsupported pixel mode {0}")]
    UnsupportedMode(u16),

    /// The payload is shorter than one frame header.
    #[error("payload too short for a frame header ({size} bytes, need {})", crate::codec::HEADER_SIZE)]
    Truncated { size: usize },

    /// The header declares a negative width or height.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Fewer pixel bytes than the header dimensions require.
    #[error("pixel data too short ({actual} bytes, expected {expected})")]
    PixelDataTooShort { expected: usize, actual: usize },

    /// The pixel buffer length does not match the frame dimensions on encode.
    #[error("pixel buffer length {actual} does not match {width}x{height} frame ({expected} bytes)")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, FrameError>;
