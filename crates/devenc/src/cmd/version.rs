use devenc_codecs::CodecFactory;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("devenc {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let registered = CodecFactory::global().registered();

    println!("name: devenc");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("registered_formats: {}", registered.len());

    Ok(SUCCESS)
}
