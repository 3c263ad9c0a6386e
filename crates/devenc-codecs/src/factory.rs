//! The process-wide codec registry.
//!
//! The factory maps descriptor tokens to ordered candidate constructors,
//! resolves full descriptors to live codecs (building a [`CodecPipeline`]
//! for compound formats) and caches every resolution under the exact
//! descriptor that produced it. Unknown formats resolve to the identity
//! codec rather than failing; malformed payloads still error when the
//! resolved codec runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, warn};

use crate::codec::Codec;
use crate::compress::{Bz2Codec, ZipCodec, BZ2_TOKEN, ZIP_TOKEN};
use crate::descriptor;
use crate::error::{CodecError, Result};
use crate::function::{FunctionCodec, PLOT_TOKEN};
use crate::null::NullCodec;
use crate::payload::Encoded;
use crate::pipeline::CodecPipeline;
use crate::serial::{BsonCodec, JsonCodec, PickleCodec, BSON_TOKEN, JSON_TOKEN, PICKLE_TOKEN};
use crate::video::{VideoImageCodec, VIDEO_IMAGE_TOKEN};

type Constructor = Arc<dyn Fn() -> Arc<dyn Codec> + Send + Sync>;

#[derive(Clone)]
struct Candidate {
    name: String,
    construct: Constructor,
}

#[derive(Default)]
struct FactoryState {
    /// token -> candidates, most-recently-registered first.
    table: HashMap<String, Vec<Candidate>>,
    /// full lower-cased descriptor -> resolved codec.
    cache: HashMap<String, Arc<dyn Codec>>,
}

/// Registry and cache resolving format descriptors to codecs.
///
/// Construct one with [`new`](CodecFactory::new) or share the process-wide
/// instance via [`global`](CodecFactory::global). Registration and lookup are
/// internally synchronized; resolved codecs are stateless and shared behind
/// `Arc`.
pub struct CodecFactory {
    state: Mutex<FactoryState>,
}

impl CodecFactory {
    /// A factory seeded with the built-in codecs.
    pub fn new() -> Self {
        let factory = Self {
            state: Mutex::new(FactoryState::default()),
        };
        factory.register_codec(JSON_TOKEN, "json", || Arc::new(JsonCodec::new()));
        factory.register_codec(BSON_TOKEN, "bson", || Arc::new(BsonCodec));
        factory.register_codec(BZ2_TOKEN, "bz2", || Arc::new(Bz2Codec));
        factory.register_codec(ZIP_TOKEN, "zip", || Arc::new(ZipCodec));
        factory.register_codec(PICKLE_TOKEN, "pickle", || Arc::new(PickleCodec));
        factory.register_codec(PLOT_TOKEN, "plot", || Arc::new(FunctionCodec::plot()));
        factory.register_codec(VIDEO_IMAGE_TOKEN, "video_image", || {
            Arc::new(VideoImageCodec)
        });
        factory.register_codec("null", "null", || Arc::new(NullCodec));
        factory.register_codec("none", "null", || Arc::new(NullCodec));
        factory.register_codec("", "null", || Arc::new(NullCodec));
        factory
    }

    /// The process-wide factory, lazily initialized on first access.
    pub fn global() -> &'static CodecFactory {
        static GLOBAL: OnceLock<CodecFactory> = OnceLock::new();
        GLOBAL.get_or_init(CodecFactory::new)
    }

    /// Register a codec constructor for `token` with highest priority.
    ///
    /// Existing candidates for the token are pushed behind in priority, and
    /// any cached resolution for exactly that token is evicted so the new
    /// candidate takes effect on the next lookup. `name` identifies the
    /// candidate for targeted unregistration.
    pub fn register_codec<F>(&self, token: &str, name: &str, construct: F)
    where
        F: Fn() -> Arc<dyn Codec> + Send + Sync + 'static,
    {
        let key = descriptor::normalize(token);
        let candidate = Candidate {
            name: name.to_string(),
            construct: Arc::new(construct),
        };

        let mut state = self.state.lock().unwrap();
        state.table.entry(key.clone()).or_default().insert(0, candidate);
        state.cache.remove(&key);
        debug!(token = %key, name, "registered codec");
    }

    /// Unregister one named candidate, or every candidate, for `token`.
    ///
    /// Fails when the token (or the named candidate) is not registered. The
    /// cached resolution for the token is evicted either way.
    pub fn unregister_codec(&self, token: &str, name: Option<&str>) -> Result<()> {
        let key = descriptor::normalize(token);
        let mut state = self.state.lock().unwrap();

        match name {
            None => {
                if state.table.remove(&key).is_none() {
                    return Err(CodecError::UnknownFormat(token.to_string()));
                }
            }
            Some(name) => {
                let Some(candidates) = state.table.get_mut(&key) else {
                    return Err(CodecError::UnknownFormat(token.to_string()));
                };
                let Some(position) = candidates.iter().position(|c| c.name == name) else {
                    return Err(CodecError::UnknownCandidate {
                        token: token.to_string(),
                        name: name.to_string(),
                    });
                };
                candidates.remove(position);
                if candidates.is_empty() {
                    state.table.remove(&key);
                }
            }
        }

        state.cache.remove(&key);
        debug!(token = %key, ?name, "unregistered codec");
        Ok(())
    }

    /// Resolve a descriptor to a codec.
    ///
    /// Resolution order: cache by the full descriptor; direct registration of
    /// the full descriptor (how `VIDEO_IMAGE` resolves despite containing the
    /// separator); a freshly built [`CodecPipeline`]; the identity codec when
    /// nothing else matches. The result is cached under the full descriptor.
    pub fn get_codec(&self, format: &str) -> Arc<dyn Codec> {
        let key = descriptor::normalize(format);

        {
            let mut state = self.state.lock().unwrap();
            if let Some(codec) = state.cache.get(&key) {
                return Arc::clone(codec);
            }
            if let Some(codec) = resolve_direct(&state.table, &key) {
                state.cache.insert(key, Arc::clone(&codec));
                return codec;
            }
        }

        // Not directly registered: parse as a compound pipeline. The lock is
        // released because pipeline construction resolves tokens through this
        // factory again.
        let codec: Arc<dyn Codec> = match CodecPipeline::new(self, format) {
            Ok(pipeline) => Arc::new(pipeline),
            Err(err) => {
                warn!(format, error = %err, "unknown format, falling back to identity codec");
                Arc::new(NullCodec)
            }
        };

        let mut state = self.state.lock().unwrap();
        Arc::clone(state.cache.entry(key).or_insert(codec))
    }

    /// Resolve one token against the registration table only.
    ///
    /// Used by pipeline construction: a table miss is `None` (the pipeline
    /// fails), a hit with every candidate disabled degrades to the identity
    /// codec. Successful resolutions are cached like any other.
    pub(crate) fn resolve_token(&self, token: &str) -> Option<Arc<dyn Codec>> {
        let key = descriptor::normalize(token);
        let mut state = self.state.lock().unwrap();
        if let Some(codec) = state.cache.get(&key) {
            return Some(Arc::clone(codec));
        }
        let codec = resolve_direct(&state.table, &key)?;
        state.cache.insert(key, Arc::clone(&codec));
        Some(codec)
    }

    /// Decode a tagged payload, resolving codecs until the descriptor is
    /// fully consumed.
    ///
    /// A compound descriptor is normally consumed by a single pipeline
    /// resolution; the loop covers descriptors that decode in more than one
    /// step. When a pass leaves the descriptor unchanged (the identity
    /// fallback on an unknown format), the still-tagged payload is returned
    /// as-is instead of looping.
    pub fn decode(&self, mut data: Encoded) -> Result<Encoded> {
        while !data.format.is_empty() {
            let before = data.format.clone();
            data = self.get_codec(&before).decode(data)?;
            if data.format == before {
                warn!(format = %before, "descriptor not consumed, returning payload as-is");
                break;
            }
        }
        Ok(data)
    }

    /// Encode a payload under `format`.
    ///
    /// A single resolution plus encode call: compound descriptors are handled
    /// entirely inside the resolved pipeline.
    pub fn encode(&self, format: &str, data: Encoded) -> Result<Encoded> {
        self.get_codec(format).encode(data)
    }

    /// Registered tokens with their candidate names, highest priority first,
    /// sorted by token.
    pub fn registered(&self) -> Vec<(String, Vec<String>)> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<(String, Vec<String>)> = state
            .table
            .iter()
            .map(|(token, candidates)| {
                (
                    token.clone(),
                    candidates.iter().map(|c| c.name.clone()).collect(),
                )
            })
            .collect();
        entries.sort();
        entries
    }
}

impl Default for CodecFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// First enabled candidate for `key`, or the identity codec when the token is
/// registered but every candidate is disabled. `None` only on a table miss.
fn resolve_direct(
    table: &HashMap<String, Vec<Candidate>>,
    key: &str,
) -> Option<Arc<dyn Codec>> {
    let candidates = table.get(key)?;
    for candidate in candidates {
        let codec = (candidate.construct)();
        if codec.is_enabled() {
            debug!(token = %key, name = %candidate.name, "resolved codec");
            return Some(codec);
        }
        debug!(token = %key, name = %candidate.name, "skipping disabled codec");
    }
    warn!(token = %key, "all candidates disabled, degrading to identity codec");
    Some(Arc::new(NullCodec))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::payload::Payload;

    /// Test codec that stamps a label so resolution order is observable.
    #[derive(Debug)]
    struct TagCodec {
        token: &'static str,
        label: &'static str,
        enabled: bool,
    }

    impl Codec for TagCodec {
        fn encode(&self, data: Encoded) -> Result<Encoded> {
            let value = data.payload.into_value()?;
            Ok(Encoded::new(
                descriptor::prepend(self.token, &data.format),
                json!({ "by": self.label, "data": value }),
            ))
        }

        fn decode(&self, data: Encoded) -> Result<Encoded> {
            let Some(rest) = descriptor::strip(self.token, &data.format) else {
                return Ok(data);
            };
            Ok(Encoded::new(rest.to_string(), data.payload))
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    fn tag(token: &'static str, label: &'static str) -> Arc<dyn Codec> {
        Arc::new(TagCodec {
            token,
            label,
            enabled: true,
        })
    }

    fn encode_label(codec: &Arc<dyn Codec>) -> String {
        let encoded = codec.encode(Encoded::raw(json!(0))).unwrap();
        match encoded.payload {
            Payload::Value(value) => value["by"].as_str().unwrap_or_default().to_string(),
            other => panic!("expected value, got {}", other.kind()),
        }
    }

    #[test]
    fn empty_descriptor_resolves_to_identity() {
        let factory = CodecFactory::new();
        let codec = factory.get_codec("");

        let data = Encoded::new("", Payload::Bytes(Bytes::from_static(b"raw")));
        assert_eq!(codec.encode(data.clone()).unwrap(), data);
        assert_eq!(codec.decode(data.clone()).unwrap(), data);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let factory = CodecFactory::new();
        let frame = devenc_frame::VideoFrame::empty(devenc_frame::PixelMode::Mono8);
        let encoded = factory
            .encode("video_image", Encoded::raw(frame))
            .unwrap();
        assert_eq!(encoded.format, "VIDEO_IMAGE");
    }

    #[test]
    fn last_registered_wins_and_unregister_restores() {
        let factory = CodecFactory::new();
        factory.register_codec("x", "a", || tag("x", "A"));
        factory.register_codec("x", "b", || tag("x", "B"));

        assert_eq!(encode_label(&factory.get_codec("x")), "B");

        factory.unregister_codec("x", Some("b")).unwrap();
        assert_eq!(encode_label(&factory.get_codec("x")), "A");
    }

    #[test]
    fn registration_evicts_stale_cache_entry() {
        let factory = CodecFactory::new();
        factory.register_codec("x", "a", || tag("x", "A"));
        // Prime the cache.
        assert_eq!(encode_label(&factory.get_codec("x")), "A");

        factory.register_codec("x", "b", || tag("x", "B"));
        assert_eq!(encode_label(&factory.get_codec("x")), "B");
    }

    #[test]
    fn unregister_unknown_token_fails() {
        let factory = CodecFactory::new();
        assert!(matches!(
            factory.unregister_codec("martian", None),
            Err(CodecError::UnknownFormat(_))
        ));
        assert!(matches!(
            factory.unregister_codec("json", Some("martian")),
            Err(CodecError::UnknownCandidate { .. })
        ));
    }

    #[test]
    fn disabled_candidates_are_skipped() {
        let factory = CodecFactory::new();
        factory.register_codec("x", "working", || tag("x", "WORKING"));
        factory.register_codec("x", "broken", || {
            Arc::new(TagCodec {
                token: "x",
                label: "BROKEN",
                enabled: false,
            })
        });

        // The higher-priority candidate is disabled, the next one wins.
        assert_eq!(encode_label(&factory.get_codec("x")), "WORKING");
    }

    #[test]
    fn all_disabled_degrades_to_identity() {
        let factory = CodecFactory::new();
        factory.register_codec("y", "broken", || {
            Arc::new(TagCodec {
                token: "y",
                label: "BROKEN",
                enabled: false,
            })
        });

        let data = Encoded::new("y", json!(1));
        // Identity: descriptor untouched, payload untouched.
        assert_eq!(factory.get_codec("y").decode(data.clone()).unwrap(), data);
    }

    #[test]
    fn unknown_format_falls_back_to_identity() {
        let factory = CodecFactory::new();
        let data = Encoded::new("martian_format", Payload::Bytes(Bytes::from_static(b"x")));
        assert_eq!(factory.get_codec("martian").decode(data.clone()).unwrap(), data);
    }

    #[test]
    fn repeated_lookup_constructs_once() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let factory = CodecFactory::new();
        factory.register_codec("counted", "counted", || {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            tag("counted", "COUNTED")
        });

        let first = factory.get_codec("counted");
        let second = factory.get_codec("counted");
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn compound_descriptor_resolves_once_and_caches_tokens() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let factory = CodecFactory::new();
        factory.register_codec("stamp", "stamp", || {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            tag("stamp", "STAMP")
        });

        let first = factory.get_codec("stamp_json");
        let second = factory.get_codec("stamp_json");
        assert!(Arc::ptr_eq(&first, &second));
        // The pipeline resolved the token exactly once; both compound lookups
        // hit the descriptor cache.
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        // And the single token is now cached too.
        let direct = factory.get_codec("stamp");
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(encode_label(&direct), "STAMP");
    }

    #[test]
    fn decode_stops_on_unconsumed_descriptor() {
        let factory = CodecFactory::new();
        let data = Encoded::new("martian", Payload::Bytes(Bytes::from_static(b"opaque")));
        let out = factory.decode(data.clone()).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn global_factory_is_shared() {
        let a = CodecFactory::global();
        let b = CodecFactory::global();
        assert!(std::ptr::eq(a, b));
    }
}
