//! A CJK glyph outline restyler for UFO font sources.

use clap::Parser;
use kadomaru::core::cli::CliArgs;

fn main() {
    kadomaru::logging::init();
    let args = CliArgs::parse();
    if let Err(message) = args.validate() {
        eprintln!("error: {message}");
        std::process::exit(2);
    }
    if let Err(error) = kadomaru::run(args) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
