//! ## spanwire-cli
//! Mirrors traffic from a capture interface to an egress interface as
//! ERSPAN Type II frames.
//!
//! ```text
//! spanwire <EGRESS_INTERFACE> <CAPTURE_INTERFACE> [--config FILE] [--max-frames N] [--hexdump]
//! ```
//!
//! Exits 0 after a requested stop, 1 on any failure.

use std::process::ExitCode;

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spanwire: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
