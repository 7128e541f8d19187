//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! discovering files, and setting up terminal output.

use crate::cli::args::ColorChoice;
use crate::config::{Config, load_or_discover};
use crate::engine::PathMatcher;
use crate::engine::file_walker::{FileEntry, FileWalker, FileWalkerError, SkipReason, WalkResult};
use log::debug;
use crate::error::ConfigError;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load configuration for a command
///
/// An explicit `--config` path must exist and contain a flake8 section.
/// Otherwise the configuration is discovered from the working directory
/// upwards, falling back to defaults.
///
/// # Errors
///
/// Returns `ConfigError::Io` if the explicit file cannot be read, or any
/// parse error from the file that was found.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir()?;
    load_or_discover(explicit, &cwd)
}

/// Exit code for a configuration error
pub(crate) fn config_exit_code(err: &ConfigError) -> i32 {
    if err.is_parse_error() {
        EXIT_PARSE_ERROR
    } else {
        EXIT_ERROR
    }
}

/// Discover files to check using FileWalker
///
/// With `verbose`, every excluded or filtered-out file is logged at `debug`
/// with the reason it was skipped.
///
/// # Errors
///
/// Returns `FileWalkerError` if a path does not exist or the walk fails.
pub(crate) fn discover_files(
    paths: &[String],
    matcher: Arc<PathMatcher>,
    verbose: bool,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    let walker = FileWalker::with_verbose(&paths, matcher, verbose)?;

    let mut files = Vec::new();
    for result in walker.walk_with_skip_info() {
        match result? {
            WalkResult::File(file) => files.push(file),
            WalkResult::Skipped {
                reason: SkipReason::NotAFile,
                ..
            } => {}
            WalkResult::Skipped { path, reason } => {
                debug!("Skipping {} ({})", path.display(), reason);
            }
        }
    }
    Ok(files)
}

/// Map the `--color` flag onto termcolor for a stream
pub(crate) fn color_choice(choice: ColorChoice, is_terminal: bool) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if is_terminal => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}

pub(crate) fn stdout(choice: ColorChoice) -> termcolor::StandardStream {
    termcolor::StandardStream::stdout(color_choice(choice, std::io::stdout().is_terminal()))
}

pub(crate) fn stderr(choice: ColorChoice) -> termcolor::StandardStream {
    termcolor::StandardStream::stderr(color_choice(choice, std::io::stderr().is_terminal()))
}
