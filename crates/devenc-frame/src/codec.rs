use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::mode::PixelMode;

/// Frame header: magic (4) + version (2) + mode (2) + frame number (8)
/// + width (4) + height (4) + endianness (2) + header size (2) + padding (4) = 32 bytes.
pub const HEADER_SIZE: usize = 32;

/// Magic number: "VDEO" big-endian.
pub const MAGIC: u32 = 0x5644_454F;

/// Current header-format version.
pub const VERSION: u16 = 1;

/// Frame sequence number used when the position in the stream is unknown.
pub const UNKNOWN_FRAME_NUMBER: i64 = -1;

/// A decoded 2-D video frame: pixel geometry plus raw row-major pixel bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    mode: PixelMode,
    width: u32,
    height: u32,
    frame_number: i64,
    pixels: Bytes,
}

impl VideoFrame {
    /// Create a frame from row-major pixel bytes.
    ///
    /// The buffer length must be exactly `width * height * element_size`.
    pub fn new(mode: PixelMode, width: u32, height: u32, pixels: impl Into<Bytes>) -> Result<Self> {
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(FrameError::InvalidDimensions {
                width: width.min(i32::MAX as u32) as i32,
                height: height.min(i32::MAX as u32) as i32,
            });
        }
        let pixels = pixels.into();
        let expected = width as usize * height as usize * mode.element_size();
        if pixels.len() != expected {
            return Err(FrameError::PixelCountMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            mode,
            width,
            height,
            frame_number: UNKNOWN_FRAME_NUMBER,
            pixels,
        })
    }

    /// A 0x0 frame with no pixel data.
    pub fn empty(mode: PixelMode) -> Self {
        Self {
            mode,
            width: 0,
            height: 0,
            frame_number: UNKNOWN_FRAME_NUMBER,
            pixels: Bytes::new(),
        }
    }

    /// Attach a frame sequence number.
    pub fn with_frame_number(mut self, frame_number: i64) -> Self {
        self.frame_number = frame_number;
        self
    }

    /// The native element type of the pixel data.
    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The frame sequence number, or [`UNKNOWN_FRAME_NUMBER`] if unknown.
    pub fn frame_number(&self) -> i64 {
        self.frame_number
    }

    /// Raw row-major pixel bytes.
    pub fn pixels(&self) -> &Bytes {
        &self.pixels
    }

    /// The total wire size of this frame (header + pixel bytes).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.pixels.len()
    }
}

/// The fixed header fields as read off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u16,
    pub mode_code: u16,
    pub frame_number: i64,
    pub width: i32,
    pub height: i32,
    pub endianness: u16,
    pub header_size: u16,
}

impl FrameHeader {
    /// Parse and validate a header from the start of `buf`.
    ///
    /// Fails on payloads shorter than one header or with a wrong magic.
    /// A header-only payload (exactly [`HEADER_SIZE`] bytes) forces the
    /// dimensions to 0x0 regardless of the encoded values.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(FrameError::Truncated { size: buf.len() });
        }

        let mut cursor = buf;
        let magic = cursor.get_u32();
        if magic != MAGIC {
            return Err(FrameError::InvalidMagic { found: magic });
        }

        let version = cursor.get_u16();
        let mode_code = cursor.get_u16();
        let frame_number = cursor.get_i64();
        let mut width = cursor.get_i32();
        let mut height = cursor.get_i32();
        let endianness = cursor.get_u16();
        let header_size = cursor.get_u16();

        if buf.len() == HEADER_SIZE {
            width = 0;
            height = 0;
        }

        Ok(Self {
            version,
            mode_code,
            frame_number,
            width,
            height,
            endianness,
            header_size,
        })
    }
}

/// Encode a frame into the wire format.
///
/// Wire layout (big-endian):
/// ```text
/// ┌───────────┬─────────┬──────┬──────────┬───────┬────────┬────────┬────────┬─────────┐
/// │ Magic(4B) │ Ver(2B) │ Mode │ Frame#   │ Width │ Height │ Endian │ HSize  │ Pad(4B) │
/// │ "VDEO"    │ 1       │ (2B) │ (8B i64) │ (4B)  │ (4B)   │ (2B)   │ (2B)   │ 0       │
/// └───────────┴─────────┴──────┴──────────┴───────┴────────┴────────┴────────┴─────────┘
/// ```
/// followed by the raw row-major pixel bytes.
pub fn encode_frame(frame: &VideoFrame) -> Bytes {
    let mut buf = BytesMut::with_capacity(frame.wire_size());
    buf.put_u32(MAGIC);
    buf.put_u16(VERSION);
    buf.put_u16(frame.mode.code());
    buf.put_i64(frame.frame_number);
    buf.put_i32(frame.width as i32);
    buf.put_i32(frame.height as i32);
    buf.put_u16(endianness_probe());
    buf.put_u16(HEADER_SIZE as u16);
    buf.put_u16(0);
    buf.put_u16(0);
    buf.put_slice(&frame.pixels);
    buf.freeze()
}

/// Decode a frame from a complete wire payload.
///
/// Pixel bytes start at the header-declared header size; any trailing bytes
/// beyond `width * height * element_size` are ignored.
pub fn decode_frame(buf: &[u8]) -> Result<VideoFrame> {
    let header = FrameHeader::parse(buf)?;
    let mode = PixelMode::from_code(header.mode_code)?;

    if header.width < 0 || header.height < 0 {
        return Err(FrameError::InvalidDimensions {
            width: header.width,
            height: header.height,
        });
    }
    let width = header.width as u32;
    let height = header.height as u32;

    let offset = (header.header_size as usize).max(HEADER_SIZE);
    let expected = width as u64 * height as u64 * mode.element_size() as u64;
    let available = buf.len().saturating_sub(offset) as u64;
    if available < expected {
        return Err(FrameError::PixelDataTooShort {
            expected: expected as usize,
            actual: available as usize,
        });
    }

    let expected = expected as usize;
    let pixels = if expected == 0 {
        Bytes::new()
    } else {
        Bytes::copy_from_slice(&buf[offset..offset + expected])
    };
    Ok(VideoFrame::new(mode, width, height, pixels)?.with_frame_number(header.frame_number))
}

/// Endianness probe field: the last byte of a native-order `1u16`.
///
/// Evaluates to 0 on little-endian hosts and 1 on big-endian hosts.
fn endianness_probe() -> u16 {
    u16::from(1u16.to_ne_bytes()[1])
}
