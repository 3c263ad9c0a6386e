use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use devenc_codecs::CodecFactory;
use serde::Serialize;

use crate::cmd::{CodecsArgs, ListFormat};
use crate::exit::{CliResult, SUCCESS};

#[derive(Serialize)]
struct CodecEntry<'a> {
    format: &'a str,
    candidates: &'a [String],
}

pub fn run(args: CodecsArgs) -> CliResult<i32> {
    let entries = CodecFactory::global().registered();

    match args.format {
        ListFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FORMAT", "CANDIDATES"]);
            for (token, candidates) in &entries {
                let shown = if token.is_empty() { "(empty)" } else { token };
                table.add_row(vec![shown.to_string(), candidates.join(", ")]);
            }
            println!("{table}");
        }
        ListFormat::Json => {
            for (token, candidates) in &entries {
                let entry = CodecEntry {
                    format: token,
                    candidates,
                };
                println!(
                    "{}",
                    serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }

    Ok(SUCCESS)
}
