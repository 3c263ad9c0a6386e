//! Format descriptor helpers.
//!
//! A descriptor is zero or more tokens joined by `_`, outermost transform
//! first. The empty string means "no transform". Tokens are matched
//! case-insensitively; registry keys are lower-cased.

/// Token separator within a compound descriptor.
pub const SEPARATOR: char = '_';

/// Lower-case a descriptor for case-insensitive registry lookup.
pub fn normalize(descriptor: &str) -> String {
    descriptor.to_ascii_lowercase()
}

/// Prepend `token` to `rest`, separated by `_` only when `rest` is non-empty.
pub fn prepend(token: &str, rest: &str) -> String {
    if rest.is_empty() {
        token.to_string()
    } else {
        format!("{token}{SEPARATOR}{rest}")
    }
}

/// Strip a leading `token` and its separator from `descriptor`.
///
/// The match is case-insensitive and must end at a token boundary (end of
/// string or a `_`). Returns `None` when the descriptor does not start with
/// the token, which is the codec pass-through condition.
pub fn strip<'a>(token: &str, descriptor: &'a str) -> Option<&'a str> {
    if descriptor.len() < token.len() {
        return None;
    }
    let (head, rest) = descriptor.split_at(token.len());
    if !head.eq_ignore_ascii_case(token) {
        return None;
    }
    match rest.strip_prefix(SEPARATOR) {
        Some(stripped) => Some(stripped),
        None if rest.is_empty() => Some(rest),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_joins_with_separator_only_when_needed() {
        assert_eq!(prepend("zip", ""), "zip");
        assert_eq!(prepend("zip", "json"), "zip_json");
        assert_eq!(prepend("bz2", "zip_json"), "bz2_zip_json");
    }

    #[test]
    fn strip_consumes_token_and_separator() {
        assert_eq!(strip("zip", "zip_json"), Some("json"));
        assert_eq!(strip("zip", "zip"), Some(""));
        assert_eq!(strip("bz2", "bz2_zip_json"), Some("zip_json"));
    }

    #[test]
    fn strip_is_case_insensitive() {
        assert_eq!(strip("VIDEO_IMAGE", "video_image_zip"), Some("zip"));
        assert_eq!(strip("zip", "ZIP_json"), Some("json"));
    }

    #[test]
    fn strip_rejects_foreign_descriptors() {
        assert_eq!(strip("zip", "json_zip"), None);
        assert_eq!(strip("zip", ""), None);
        // Token boundary: "zipper" is not "zip" + separator.
        assert_eq!(strip("zip", "zipper_json"), None);
    }
}
