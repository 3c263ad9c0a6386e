//! The closed pixel-mode table.
//!
//! Mode codes identify the native element type of a frame's pixel data.
//! Codes 0-3 map to unsigned grayscale elements of 1, 2, 4 and 8 bytes.
//! Any other code is rejected on both encode and decode.

use crate::error::{FrameError, Result};

/// Native element type of a frame's pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// 8-bit grayscale (`u8` elements).
    Mono8,
    /// 16-bit grayscale (`u16` elements).
    Mono16,
    /// 32-bit grayscale (`u32` elements).
    Mono32,
    /// 64-bit grayscale (`u64` elements).
    Mono64,
}

impl PixelMode {
    /// Resolve a wire mode code, or fail for codes outside the table.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0 => Ok(PixelMode::Mono8),
            1 => Ok(PixelMode::Mono16),
            2 => Ok(PixelMode::Mono32),
            3 => Ok(PixelMode::Mono64),
            other => Err(FrameError::UnsupportedMode(other)),
        }
    }

    /// The wire mode code.
    pub fn code(self) -> u16 {
        match self {
            PixelMode::Mono8 => 0,
            PixelMode::Mono16 => 1,
            PixelMode::Mono32 => 2,
            PixelMode::Mono64 => 3,
        }
    }

    /// Size of one pixel element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            PixelMode::Mono8 => 1,
            PixelMode::Mono16 => 2,
            PixelMode::Mono32 => 4,
            PixelMode::Mono64 => 8,
        }
    }

    /// Human-readable name of the native element type.
    pub fn element_name(self) -> &'static str {
        match self {
            PixelMode::Mono8 => "u8",
            PixelMode::Mono16 => "u16",
            PixelMode::Mono32 => "u32",
            PixelMode::Mono64 => "u64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..4u16 {
            let mode = PixelMode::from_code(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            PixelMode::from_code(4),
            Err(FrameError::UnsupportedMode(4))
        ));
        assert!(matches!(
            PixelMode::from_code(0xFFFF),
            Err(FrameError::UnsupportedMode(0xFFFF))
        ));
    }

    #[test]
    fn element_sizes_match_names() {
        assert_eq!(PixelMode::Mono8.element_size(), 1);
        assert_eq!(PixelMode::Mono16.element_size(), 2);
        assert_eq!(PixelMode::Mono32.element_size(), 4);
        assert_eq!(PixelMode::Mono64.element_size(), 8);
        assert_eq!(PixelMode::Mono64.element_name(), "u64");
    }
}
