//! List command implementation
//!
//! This module implements the `lintscope list` command, which:
//! - Lists every catalogued code with its description
//! - Shows whether each code is active, ignored or not selected
//! - With `--file`, also shows codes removed by per-file overrides
//! - Supports both human-readable and JSONL output formats

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, config_exit_code};
use crate::engine::Resolver;
use crate::output::{RuleStatusHumanFormatter, RuleStatusJsonlFormatter, rule_statuses};
use std::path::Path;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::error::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the list command
///
/// # Arguments
///
/// * `file` - Report the state for this file rather than globally
/// * `format` - Output format (human or JSONL)
/// * `config_path` - Explicit configuration file, if any
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error in the configuration
pub fn run_list(file: Option<&str>, format: OutputFormat, config_path: Option<&Path>) -> i32 {
    match run_list_inner(file, format, config_path) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match &e {
                ListError::Config(config) => config_exit_code(config),
                ListError::Io(_) => EXIT_ERROR,
            }
        }
    }
}

/// Internal implementation of list command
fn run_list_inner(
    file: Option<&str>,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<(), ListError> {
    let config = super::common::load_config(config_path)?;
    let resolver = Resolver::from_config(&config);

    let file = file.map(|f| std::path::absolute(Path::new(f))).transpose()?;
    let statuses = rule_statuses(&resolver, file.as_deref());

    match format {
        OutputFormat::Human => RuleStatusHumanFormatter::new().write_to_stdout(&statuses),
        OutputFormat::Jsonl => RuleStatusJsonlFormatter::new().write_to_stdout(&statuses),
    }

    Ok(())
}
