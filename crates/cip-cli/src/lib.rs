//! CIP CLI library.
//!
//! Profile linting and detection from the command line: argument parsing,
//! command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
