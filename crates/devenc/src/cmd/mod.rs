use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;

pub mod codecs;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a payload under a format descriptor.
    Encode(EncodeArgs),
    /// Decode a payload tagged with a format descriptor.
    Decode(DecodeArgs),
    /// List registered codecs.
    Codecs(CodecsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args),
        Command::Codecs(args) => codecs::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Format descriptor to encode under (e.g. `bz2_json`).
    pub format: String,
    /// Read the payload from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Write the encoded payload to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Parse the input as JSON text into a structured value first.
    ///
    /// Implied when the innermost descriptor token is a serializer
    /// (`json`, `pickle`, `bson`, `plot`).
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Format descriptor the payload is tagged with.
    pub format: String,
    /// Read the payload from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Write the decoded payload to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Pretty-print structured output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CodecsArgs {
    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    pub format: ListFormat,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print extended build and registry information.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}
