//! CLI module for the Lucent front end
//!
//! This module provides the command-line interface for the toolchain.
//!
//! ## Commands
//!
//! - `check <file>` - Parse and report diagnostics (also the default action)
//! - `parse <file>` - Parse and dump the syntax tree
//! - `fmt <file|dir>` - Format Lucent source files
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Lucent language front end
#[derive(Parser, Debug)]
#[command(name = "lucent")]
#[command(version = VERSION)]
#[command(about = "The Lucent language front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tokenize only and dump the token stream (debug)
    #[arg(long = "tokens", value_name = "FILE", conflicts_with = "file")]
    pub tokens_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and report diagnostics
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a file and dump the syntax tree
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Format Lucent source files
    Fmt {
        /// File or directory to format
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Some(file) = cli.tokens_file {
        return commands::dump_tokens(&file.to_string_lossy());
    }

    match cli.command {
        Some(Command::Check { file }) => commands::check_file(&file.to_string_lossy()),
        Some(Command::Parse { file }) => commands::parse_file(&file.to_string_lossy()),
        Some(Command::Fmt { path, check }) => commands::format_files(&path.to_string_lossy(), check),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file.to_string_lossy())
            } else {
                // No command and no file - fail with usage hint
                Err(CliError::failure(
                    "error: a file or subcommand is required; try `lucent --help`",
                ))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["lucent", "check", "test.lc"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Check { .. })));
    }

    #[test]
    fn test_cli_parse_parse() {
        let cli = Cli::try_parse_from(["lucent", "parse", "test.lc"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Parse { .. })));
    }

    #[test]
    fn test_cli_parse_fmt() {
        let cli = Cli::try_parse_from(["lucent", "fmt", "src/", "--check"]).unwrap();
        if let Some(Command::Fmt { check, .. }) = cli.command {
            assert!(check);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_default_file() {
        let cli = Cli::try_parse_from(["lucent", "test.lc"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.file.is_some());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["lucent", "--tokens", "test.lc"]).unwrap();
        assert!(cli.tokens_file.is_some());
    }
}
