//! Beatloop - Command-line tool for detecting and building LOOP sequences

use std::process::ExitCode;

use beatloop::cli;

fn main() -> ExitCode {
    cli::run()
}
