//! CLI module for reploit.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//! - The chat, ask, health and index commands
//!
//! # Usage
//!
//! Local commands are handled by [`run_cli_command`] before a runtime is
//! built; the rest are async and run from `main`:
//!
//! ```ignore
//! use reploit::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! // Network command, build the runtime
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::{run_ask, run_chat, run_health, run_index};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Run a command that needs no network access.
///
/// # Returns
///
/// * `None` - The command talks to the backend and must run on a runtime
/// * `Some(Ok(()))` - The command executed successfully
/// * `Some(Err(e))` - The arguments were invalid
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            handle_version_command();
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(reason) => Some(Err(eyre!("{}\n\n{}", reason, USAGE))),
        CliCommand::Chat | CliCommand::Ask(_) | CliCommand::Health | CliCommand::Index(_) => None,
    }
}
