use std::fmt;

use crate::error::Result;
use crate::payload::Encoded;

/// The uniform encode/decode contract every codec satisfies.
///
/// A codec answers to one descriptor token. On encode it transforms the
/// payload and prepends its token to the descriptor; on decode it strips its
/// token and undoes the transform. When the incoming descriptor does not
/// start with the codec's token, decode is a defensive pass-through that
/// returns the input unchanged rather than failing.
///
/// Codecs are stateless once constructed and are shared behind `Arc` by the
/// factory cache, hence the `Send + Sync` bounds.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Apply this codec's transform and tag the descriptor with its token.
    fn encode(&self, data: Encoded) -> Result<Encoded>;

    /// Strip this codec's token and undo its transform.
    ///
    /// Pass-through when the descriptor does not start with the token.
    fn decode(&self, data: Encoded) -> Result<Encoded>;

    /// Whether this codec can function in the current process.
    ///
    /// Factory resolution skips disabled candidates. Override when the codec
    /// depends on an external capability that may be missing.
    fn is_enabled(&self) -> bool {
        true
    }
}
