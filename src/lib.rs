//! # shortutil
//!
//! Windows 8.3 short filename checksums, short name generation and rainbow wordlists.

pub mod checksum;
pub mod cli;
pub mod completion;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod parser;
pub mod shortname;
pub mod wordlist;

pub use error::{Error, Result};

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Run the command-line tool to completion.
///
/// Arguments, logging and failures are all handled here, so callers only need to invoke it.
pub fn run() {
    cli::run_cli();
}
