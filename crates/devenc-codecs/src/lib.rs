//! Descriptor-driven codec pipeline.
//!
//! Everything in this crate works on the pair *descriptor, payload*: the
//! descriptor is a `_`-joined string naming the encoding chain applied to the
//! payload, outermost transform first. Primitive codecs each answer to one
//! token (`zip`, `bz2`, `json`, ...); the [`CodecPipeline`] composes them by
//! parsing a compound descriptor; the [`CodecFactory`] resolves descriptors to
//! live codecs through a priority-ordered registry with per-descriptor
//! caching.
//!
//! Callers normally go through the factory only:
//!
//! ```
//! use devenc_codecs::{CodecFactory, Encoded, Payload};
//! use serde_json::json;
//!
//! let factory = CodecFactory::new();
//! let encoded = factory
//!     .encode("bz2_json", Encoded::raw(Payload::Value(json!([1, 2, 3]))))
//!     .unwrap();
//! assert_eq!(encoded.format, "bz2_json");
//!
//! let decoded = factory.decode(encoded).unwrap();
//! assert_eq!(decoded.format, "");
//! assert_eq!(decoded.payload, Payload::Value(json!([1, 2, 3])));
//! ```

pub mod codec;
pub mod compress;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod function;
pub mod null;
pub mod payload;
pub mod pipeline;
pub mod serial;
pub mod video;

pub use codec::Codec;
pub use devenc_frame::{PixelMode, VideoFrame};
pub use compress::{Bz2Codec, ZipCodec};
pub use error::{CodecError, Result};
pub use factory::CodecFactory;
pub use function::FunctionCodec;
pub use null::NullCodec;
pub use payload::{Encoded, Payload};
pub use pipeline::CodecPipeline;
pub use serial::{BsonCodec, JsonCodec, PickleCodec};
pub use video::VideoImageCodec;
