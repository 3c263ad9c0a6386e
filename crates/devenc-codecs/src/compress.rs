//! Compression codecs: `zip` (zlib deflate) and `bz2`.
//!
//! Both operate on raw bytes only; feeding them a structured value is a
//! payload-shape error. Corrupt streams propagate as
//! [`CodecError::Compression`](crate::error::CodecError::Compression).

use std::io::Write;

use crate::codec::Codec;
use crate::descriptor;
use crate::error::Result;
use crate::payload::Encoded;

/// Descriptor token of [`ZipCodec`].
pub const ZIP_TOKEN: &str = "zip";

/// Descriptor token of [`Bz2Codec`].
pub const BZ2_TOKEN: &str = "bz2";

/// Deflate compression (zlib stream) via `flate2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodec;

impl Codec for ZipCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let bytes = payload.into_bytes()?;

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&bytes)?;
        let compressed = encoder.finish()?;

        Ok(Encoded::new(descriptor::prepend(ZIP_TOKEN, &format), compressed))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(ZIP_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;

        let mut decoder = flate2::write::ZlibDecoder::new(Vec::new());
        decoder.write_all(&bytes)?;
        let inflated = decoder.finish()?;

        Ok(Encoded::new(rest, inflated))
    }
}

/// Bzip2 compression via `bzip2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bz2Codec;

impl Codec for Bz2Codec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let bytes = payload.into_bytes()?;

        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(&bytes)?;
        let compressed = encoder.finish()?;

        Ok(Encoded::new(descriptor::prepend(BZ2_TOKEN, &format), compressed))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(BZ2_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;

        let mut decoder = bzip2::write::BzDecoder::new(Vec::new());
        decoder.write_all(&bytes)?;
        let inflated = decoder.finish()?;

        Ok(Encoded::new(rest, inflated))
    }
}
