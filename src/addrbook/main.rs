//! # addrbook CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/addrbook/cli/`,
//! while this file only invokes `cli::run()` and handles process termination.
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI is responsible for
//! argument parsing, context initialization, prompting, dispatch, error
//! reporting and rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
