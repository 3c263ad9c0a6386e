use serde_json::{json, Value};

use crate::codec::Codec;
use crate::descriptor;
use crate::error::Result;
use crate::payload::{Encoded, Payload};

/// Descriptor token of the plot specialization of [`FunctionCodec`].
pub const PLOT_TOKEN: &str = "plot";

/// A codec tagging values with a function-call envelope.
///
/// Encode wraps the value as `{"type": <name>, "data": <value>}`; decode
/// unwraps a matching envelope back to its `data` field. Decode never fails:
/// a foreign descriptor or a payload that is not a matching envelope passes
/// through unchanged.
#[derive(Debug, Clone)]
pub struct FunctionCodec {
    name: String,
}

impl FunctionCodec {
    /// A codec for an arbitrary function name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The `plot` specialization.
    pub fn plot() -> Self {
        Self::new(PLOT_TOKEN)
    }

    /// The function name this codec answers to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Codec for FunctionCodec {
    fn encode(&self, data: Encoded) -> Result<Encoded> {
        let Encoded { format, payload } = data;
        let value = payload.into_value()?;
        let envelope = json!({ "type": self.name, "data": value });
        Ok(Encoded::new(descriptor::prepend(&self.name, &format), envelope))
    }

    fn decode(&self, data: Encoded) -> Result<Encoded> {
        let Some(rest) = descriptor::strip(&self.name, &data.format) else {
            return Ok(data);
        };
        let rest = rest.to_string();

        let payload = match data.payload {
            Payload::Value(value) => Payload::Value(self.unwrap_envelope(value)),
            other => other,
        };
        Ok(Encoded { format: rest, payload })
    }
}

impl FunctionCodec {
    fn unwrap_envelope(&self, value: Value) -> Value {
        match value {
            Value::Object(mut map)
                if map.get("type").and_then(Value::as_str) == Some(self.name.as_str())
                    && map.contains_key("data") =>
            {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        }
    }
}
