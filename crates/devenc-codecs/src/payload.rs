use bytes::Bytes;
use devenc_frame::VideoFrame;
use serde_json::Value;

use crate::error::{CodecError, Result};

/// The value half of a `(descriptor, payload)` pair.
///
/// The shape depends on the outermost pending transform: raw bytes while a
/// binary or compression transform is pending, a structured value once the
/// serialization layer is stripped, a video frame after `VIDEO_IMAGE` decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw bytes (wire form).
    Bytes(Bytes),
    /// A structured value (mapping, sequence, scalar).
    Value(Value),
    /// A decoded 2-D video frame with its frame-number annotation.
    Frame(VideoFrame),
}

impl Payload {
    /// The payload shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Bytes(_) => "bytes",
            Payload::Value(_) => "value",
            Payload::Frame(_) => "frame",
        }
    }

    /// Unwrap raw bytes, or fail with the actual shape.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Payload::Bytes(bytes) => Ok(bytes),
            other => Err(CodecError::UnexpectedPayload {
                expected: "bytes",
                actual: other.kind(),
            }),
        }
    }

    /// Unwrap a structured value, or fail with the actual shape.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Payload::Value(value) => Ok(value),
            other => Err(CodecError::UnexpectedPayload {
                expected: "value",
                actual: other.kind(),
            }),
        }
    }

    /// Unwrap a video frame, or fail with the actual shape.
    pub fn into_frame(self) -> Result<VideoFrame> {
        match self {
            Payload::Frame(frame) => Ok(frame),
            other => Err(CodecError::UnexpectedPayload {
                expected: "frame",
                actual: other.kind(),
            }),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes.into())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl From<VideoFrame> for Payload {
    fn from(frame: VideoFrame) -> Self {
        Payload::Frame(frame)
    }
}

/// A payload tagged with the descriptor of its pending transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// The `_`-joined encoding chain still applied to the payload.
    pub format: String,
    /// The payload itself.
    pub payload: Payload,
}

impl Encoded {
    /// Pair a descriptor with a payload.
    pub fn new(format: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            format: format.into(),
            payload: payload.into(),
        }
    }

    /// A payload with no pending transform (empty descriptor).
    pub fn raw(payload: impl Into<Payload>) -> Self {
        Self::new("", payload)
    }
}
