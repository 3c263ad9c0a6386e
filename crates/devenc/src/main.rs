mod cmd;
mod exit;
mod logging;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "devenc", version, about = "Descriptor-driven encode/decode CLI")]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        global = true,
        value_parser = logging::parse_level
    )]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
