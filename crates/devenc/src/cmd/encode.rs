use std::io::{Read, Write};
use std::path::Path;

use devenc_codecs::{CodecFactory, Encoded, Payload};
use serde_json::Value;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};

/// Tokens whose codec consumes a structured value on encode.
const SERIALIZER_TOKENS: [&str; 4] = ["json", "pickle", "bson", "plot"];

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let raw = read_input(args.input.as_deref())?;

    let payload = if args.json || innermost_is_serializer(&args.format) {
        let value: Value = serde_json::from_slice(&raw)
            .map_err(|err| CliError::new(DATA_INVALID, format!("input is not valid JSON: {err}")))?;
        Payload::Value(value)
    } else {
        Payload::Bytes(raw.into())
    };

    let encoded = CodecFactory::global()
        .encode(&args.format, Encoded::raw(payload))
        .map_err(|err| codec_error("encode failed", err))?;

    tracing::info!(format = %encoded.format, "payload encoded");
    write_output(args.output.as_deref(), &payload_bytes(encoded.payload)?)?;
    Ok(SUCCESS)
}

fn innermost_is_serializer(format: &str) -> bool {
    format
        .rsplit('_')
        .next()
        .map(|token| SERIALIZER_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

/// Wire bytes for an encoded payload. A structured value (a descriptor with
/// no serializer stage, e.g. bare `plot`) is written as compact JSON text.
pub(crate) fn payload_bytes(payload: Payload) -> CliResult<Vec<u8>> {
    match payload {
        Payload::Bytes(bytes) => Ok(bytes.to_vec()),
        Payload::Value(value) => serde_json::to_vec(&value)
            .map_err(|err| CliError::new(DATA_INVALID, format!("cannot render value: {err}"))),
        Payload::Frame(_) => Err(CliError::new(
            DATA_INVALID,
            "encoded payload is a video frame; encode it under VIDEO_IMAGE instead",
        )),
    }
}

pub(crate) fn read_input(path: Option<&Path>) -> CliResult<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).map_err(|err| io_error("reading input", err)),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|err| io_error("reading stdin", err))?;
            Ok(buf)
        }
    }
}

pub(crate) fn write_output(path: Option<&Path>, bytes: &[u8]) -> CliResult<()> {
    match path {
        Some(path) => std::fs::write(path, bytes).map_err(|err| io_error("writing output", err)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .map_err(|err| io_error("writing stdout", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializer_detection_uses_the_innermost_token() {
        assert!(innermost_is_serializer("json"));
        assert!(innermost_is_serializer("bz2_json"));
        assert!(innermost_is_serializer("zip_PICKLE"));
        assert!(!innermost_is_serializer("zip"));
        assert!(!innermost_is_serializer("json_zip"));
        assert!(!innermost_is_serializer(""));
    }
}
