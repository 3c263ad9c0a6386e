use crate::codec::Codec;
use crate::error::Result;
use crate::payload::Encoded;

/// The identity codec: encode and decode both return the input unchanged.
///
/// Registered under `null`, `none` and the empty descriptor, and used by the
/// factory as the permissive fallback for unknown formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCodec;

impl Codec for NullCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        Ok(data)
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use serde_json::json;

    #[test]
    fn encode_and_decode_are_strict_identity() {
        let data = Encoded::new("whatever", Payload::Value(json!({"a": 1})));
        assert_eq!(NullCodec.encode(data.clone()).unwrap(), data);
        assert_eq!(NullCodec.decode(data.clone()).unwrap(), data);
    }
}
