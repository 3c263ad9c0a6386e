use devenc_codecs::{CodecFactory, Encoded, Payload};

use crate::cmd::encode::{read_input, write_output};
use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, CliError, CliResult, DATA_INVALID, SUCCESS};

pub fn run(args: DecodeArgs) -> CliResult<i32> {
    let raw = read_input(args.input.as_deref())?;

    let decoded = CodecFactory::global()
        .decode(Encoded::new(args.format.clone(), raw))
        .map_err(|err| codec_error("decode failed", err))?;

    if !decoded.format.is_empty() {
        eprintln!("undecoded format remainder: {}", decoded.format);
    }

    let bytes = match decoded.payload {
        Payload::Bytes(bytes) => bytes.to_vec(),
        Payload::Value(value) => {
            let mut text = if args.pretty {
                serde_json::to_vec_pretty(&value)
            } else {
                serde_json::to_vec(&value)
            }
            .map_err(|err| CliError::new(DATA_INVALID, format!("cannot render value: {err}")))?;
            text.push(b'\n');
            text
        }
        Payload::Frame(frame) => {
            eprintln!(
                "frame: {}x{} {} pixels, frame number {}",
                frame.width(),
                frame.height(),
                frame.mode().element_name(),
                frame.frame_number()
            );
            frame.pixels().to_vec()
        }
    };

    write_output(args.output.as_deref(), &bytes)?;
    Ok(SUCCESS)
}
