use std::sync::Arc;

use tracing::debug;

use crate::codec::Codec;
use crate::descriptor;
use crate::error::{CodecError, Result};
use crate::factory::CodecFactory;
use crate::payload::Encoded;

/// An ordered composition of codecs built from a compound descriptor.
///
/// The descriptor is split on `_` and every token resolved through the
/// factory's registration table; construction fails on the first token no
/// codec answers to. Stages are kept in descriptor order (outermost first):
/// decode runs them forward, stripping the descriptor inward, and encode runs
/// them in reverse, so the innermost transform executes first and the
/// descriptor accumulates outward. Encode and decode of the same descriptor
/// are exact inverses.
#[derive(Debug)]
pub struct CodecPipeline {
    descriptor: String,
    stages: Vec<Arc<dyn Codec>>,
}

impl CodecPipeline {
    /// Build a pipeline for `descriptor`, resolving tokens via `factory`.
    pub fn new(factory: &CodecFactory, descriptor: &str) -> Result<Self> {
        let mut stages = Vec::new();
        for token in descriptor.split(descriptor::SEPARATOR) {
            let codec = factory.resolve_token(token).ok_or_else(|| {
                CodecError::UnresolvableToken {
                    descriptor: descriptor.to_string(),
                    token: token.to_string(),
                }
            })?;
            debug!(token, stage = ?codec, "resolved pipeline stage");
            stages.push(codec);
        }
        Ok(Self {
            descriptor: descriptor.to_string(),
            stages,
        })
    }

    /// The compound descriptor this pipeline was built from.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Codec for CodecPipeline {
    fn encode(&self, mut data: Encoded) -> Result<Encoded> {
        for stage in self.stages.iter().rev() {
            data = stage.encode(data)?;
        }
        Ok(data)
    }

    fn decode(&self, mut data: Encoded) -> Result<Encoded> {
        for stage in &self.stages {
            data = stage.decode(data)?;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use serde_json::json;

    #[test]
    fn compound_descriptor_builds_in_token_order() {
        let factory = CodecFactory::new();
        let pipeline = CodecPipeline::new(&factory, "bz2_json").unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.descriptor(), "bz2_json");
    }

    #[test]
    fn encode_runs_innermost_first() {
        let factory = CodecFactory::new();
        let pipeline = CodecPipeline::new(&factory, "bz2_json").unwrap();

        let encoded = pipeline.encode(Encoded::raw(json!([1, 2, 3]))).unwrap();
        // json ran first, bz2 wrapped it, descriptor accumulated outward.
        assert_eq!(encoded.format, "bz2_json");
        assert!(matches!(encoded.payload, Payload::Bytes(_)));
    }

    #[test]
    fn decode_is_the_exact_inverse() {
        let factory = CodecFactory::new();
        let pipeline = CodecPipeline::new(&factory, "zip_pickle").unwrap();

        let value = json!({"positions": [0.5, 1.25], "name": "mot01"});
        let encoded = pipeline.encode(Encoded::raw(value.clone())).unwrap();
        let decoded = pipeline.decode(encoded).unwrap();

        assert_eq!(decoded.format, "");
        assert_eq!(decoded.payload, Payload::Value(value));
    }

    #[test]
    fn unresolvable_token_fails_construction() {
        let factory = CodecFactory::new();
        let result = CodecPipeline::new(&factory, "zip_martian_json");
        assert!(matches!(
            result,
            Err(CodecError::UnresolvableToken { token, .. }) if token == "martian"
        ));
    }

    #[test]
    fn three_stage_roundtrip() {
        let factory = CodecFactory::new();
        let pipeline = CodecPipeline::new(&factory, "bz2_zip_json").unwrap();

        let value = json!([0, 1, 1, 2, 3, 5, 8, 13]);
        let decoded = pipeline
            .decode(pipeline.encode(Encoded::raw(value.clone())).unwrap())
            .unwrap();
        assert_eq!(decoded, Encoded::raw(value));
    }
}
