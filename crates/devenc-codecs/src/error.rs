use devenc_frame::FrameError;

/// Errors that can occur while resolving or applying codecs.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The format token has no registered candidate.
    #[error("unknown format {0:?}")]
    UnknownFormat(String),

    /// No candidate with the given name is registered for the token.
    #[error("no codec named {name:?} registered for format {token:?}")]
    UnknownCandidate { token: String, name: String },

    /// A compound descriptor contains a token no codec answers to.
    #[error("unsupported descriptor {descriptor:?} (namely {token:?})")]
    UnresolvableToken { descriptor: String, token: String },

    /// The payload shape does not match what the codec operates on.
    #[error("expected a {expected} payload, got {actual}")]
    UnexpectedPayload {
        expected: &'static str,
        actual: &'static str,
    },

    /// A compression stream failed to deflate or inflate.
    #[error("compressed stream error: {0}")]
    Compression(#[from] std::io::Error),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pickle (MessagePack) serialization failed.
    #[error("pickle encode error: {0}")]
    PickleEncode(#[from] rmp_serde::encode::Error),

    /// Pickle (MessagePack) parsing failed.
    #[error("pickle decode error: {0}")]
    PickleDecode(#[from] rmp_serde::decode::Error),

    /// BSON serialization failed.
    #[error("BSON encode error: {0}")]
    BsonEncode(#[from] bson::ser::Error),

    /// BSON parsing failed.
    #[error("BSON decode error: {0}")]
    BsonDecode(#[from] bson::de::Error),

    /// Video frame payload is malformed (bad magic, unsupported mode, ...).
    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
