//! Binary entrypoint for the `repotrack` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Recording is handled in commands::dispatch via REPOTRACK_RECORD.
    match repotrack::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
