//! Serialization codecs: `json`, `pickle` and `bson`.
//!
//! These bridge the structured-value and raw-bytes worlds: encode turns a
//! [`Payload::Value`] into bytes, decode parses bytes back into a value.
//! The pickle wire form is MessagePack, the compact self-describing binary
//! format this stack uses wherever the descriptor asks for a pickled blob.

use serde_json::Value;

use crate::codec::Codec;
use crate::descriptor;
use crate::error::Result;
use crate::payload::Encoded;

/// Descriptor token of [`JsonCodec`].
pub const JSON_TOKEN: &str = "json";

/// Descriptor token of [`PickleCodec`].
pub const PICKLE_TOKEN: &str = "pickle";

/// Descriptor token of [`BsonCodec`].
pub const BSON_TOKEN: &str = "bson";

/// JSON text serialization via `serde_json`.
///
/// Output is compact (no extraneous whitespace). With
/// [`with_ascii_strings`](JsonCodec::with_ascii_strings) the encoded text is
/// additionally escaped so every non-ASCII character becomes a `\uXXXX`
/// sequence, guaranteeing a fixed byte encoding for consumers that cannot
/// handle multi-byte text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    ascii: bool,
}

impl JsonCodec {
    /// A codec emitting compact UTF-8 JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec emitting compact JSON with all non-ASCII text escaped.
    pub fn with_ascii_strings() -> Self {
        Self { ascii: true }
    }
}

impl Codec for JsonCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let value = payload.into_value()?;

        let mut text = serde_json::to_string(&value)?;
        if self.ascii {
            text = escape_non_ascii(&text);
        }

        Ok(Encoded::new(
            descriptor::prepend(JSON_TOKEN, &format),
            text.into_bytes(),
        ))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(JSON_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(Encoded::new(rest, value))
    }
}

/// Escape every non-ASCII character as `\uXXXX` (UTF-16 units, so characters
/// outside the BMP become surrogate pairs).
fn escape_non_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

/// Compact binary serialization (MessagePack) via `rmp-serde`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickleCodec;

impl Codec for PickleCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let value = payload.into_value()?;
        let blob = rmp_serde::to_vec(&value)?;
        Ok(Encoded::new(descriptor::prepend(PICKLE_TOKEN, &format), blob))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(PICKLE_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;
        let value: Value = rmp_serde::from_slice(&bytes)?;
        Ok(Encoded::new(rest, value))
    }
}

/// BSON document serialization via `bson`.
///
/// BSON requires a document at the top level, so only mapping values encode;
/// anything else propagates the serializer's error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BsonCodec;

impl Codec for BsonCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let value = payload.into_value()?;
        let blob = bson::to_vec(&value)?;
        Ok(Encoded::new(descriptor::prepend(BSON_TOKEN, &format), blob))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(BSON_TOKEN, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();
        let bytes = data.payload.into_bytes()?;
        let value: Value = bson::from_slice(&bytes)?;
        Ok(Encoded::new(rest, value))
    }
}
