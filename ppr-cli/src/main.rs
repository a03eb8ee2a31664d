//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use ppr_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "errors are reported to the user on stderr"
)]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    match ppr_cli::run() {
        Ok(()) => {}
        // Help and version output also arrive here; clap knows how to exit.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("ppr: {err}");
            std::process::exit(1);
        }
    }
}
