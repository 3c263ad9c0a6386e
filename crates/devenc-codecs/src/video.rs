use devenc_frame::{decode_frame, encode_frame};

use crate::codec::Codec;
use crate::descriptor;
use crate::error::Result;
use crate::payload::Encoded;

/// Descriptor token of [`VideoImageCodec`].
///
/// Upper-case on the wire, matched case-insensitively. The token itself
/// contains the separator character, which is why factory resolution checks
/// the registration table with the full descriptor before attempting to
/// parse it as a pipeline.
pub const VIDEO_IMAGE_TOKEN: &str = "VIDEO_IMAGE";

/// The video-image binary protocol as a codec.
///
/// Encode packs a [`VideoFrame`](devenc_frame::VideoFrame) into the 32-byte
/// header plus row-major pixel bytes; decode validates the magic and
/// reconstructs the frame with its frame-number annotation. Malformed
/// payloads (wrong magic, unsupported pixel mode, short pixel data)
/// propagate as [`CodecError::Frame`](crate::error::CodecError::Frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoImageCodec;

impl Codec for VideoImageCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let frame = payload.into_frame()?;
        let wire = encode_frame(&frame);
        Ok(Encoded::new(
            descriptor::prepend(VIDEO_IMAGE_TOKEN, &format),
            wire,
        ))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(VIDEO_IMAGE_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;
        let frame = decode_frame(&bytes)?;
        Ok(Encoded::new(rest, frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::payload::Payload;
    use bytes::Bytes;
    use devenc_frame::{FrameError, PixelMode, VideoFrame, HEADER_SIZE};

    fn sample_frame() -> VideoFrame {
        VideoFrame::new(PixelMode::Mono8, 4, 3, (0u8..12).collect::<Vec<_>>())
            .unwrap()
            .with_frame_number(7)
    }

    #[test]
    fn roundtrip_preserves_frame_and_annotation() {
        let codec = VideoImageCodec;
        let encoded = codec.encode(Encoded::raw(sample_frame())).unwrap();
        assert_eq!(encoded.format, "VIDEO_IMAGE");

        let decoded = codec.decode(encoded).unwrap();
        assert_eq!(decoded.format, "");
        match decoded.payload {
            Payload::Frame(frame) => {
                assert_eq!(frame, sample_frame());
                assert_eq!(frame.frame_number(), 7);
            }
            other => panic!("expected frame, got {}", other.kind()),
        }
    }

    #[test]
    fn wire_size_is_header_plus_pixels() {
        let encoded = VideoImageCodec.encode(Encoded::raw(sample_frame())).unwrap();
        match encoded.payload {
            Payload::Bytes(bytes) => assert_eq!(bytes.len(), HEADER_SIZE + 12),
            other => panic!("expected bytes, got {}", other.kind()),
        }
    }

    #[test]
    fn bad_magic_errors() {
        let mut wire = match VideoImageCodec.encode(Encoded::raw(sample_frame())).unwrap().payload {
            Payload::Bytes(bytes) => bytes.to_vec(),
            other => panic!("expected bytes, got {}", other.kind()),
        };
        wire[1] ^= 0x01;

        let result = VideoImageCodec.decode(Encoded::new("VIDEO_IMAGE", wire));
        assert!(matches!(
            result,
            Err(CodecError::Frame(FrameError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn lowercase_descriptor_matches() {
        let encoded = VideoImageCodec.encode(Encoded::raw(sample_frame())).unwrap();
        let lowered = Encoded::new("video_image", encoded.payload);
        let decoded = VideoImageCodec.decode(lowered).unwrap();
        assert!(matches!(decoded.payload, Payload::Frame(_)));
    }

    #[test]
    fn foreign_descriptor_passes_through() {
        let data = Encoded::new("zip", Payload::Bytes(Bytes::from_static(b"x")));
        assert_eq!(VideoImageCodec.decode(data.clone()).unwrap(), data);
    }

    #[test]
    fn encode_stacks_token_on_existing_descriptor() {
        // A frame already tagged as zip-compressed downstream keeps the tail.
        let encoded = VideoImageCodec
            .encode(Encoded::new("zip", sample_frame()))
            .unwrap();
        assert_eq!(encoded.format, "VIDEO_IMAGE_zip");
    }
}
