//! Check command implementation
//!
//! This module implements the `lintscope check` command, which:
//! - Loads the flake8 configuration (explicit or discovered)
//! - Discovers files to check
//! - Resolves the active codes per file and runs the checks in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, config_exit_code,
};
use crate::engine::{ExecutionEngine, ExecutionResult, Resolver};
use crate::error::LintscopeError;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::rules::builtin_rules;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

/// Exit code for a failed check run
fn exit_code(err: &LintscopeError) -> i32 {
    match err {
        LintscopeError::Config(e) => config_exit_code(e),
        // Raised only for an invalid copyright-regexp
        LintscopeError::Rule(_) => EXIT_PARSE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Run the check command
///
/// # Arguments
///
/// * `paths` - Paths to check (defaults to current directory)
/// * `format` - Output format (human or JSONL)
/// * `config_path` - Explicit configuration file, if any
/// * `color` - Colour choice for human output
/// * `verbose` - Log skipped files and the reason for each
///
/// # Returns
///
/// Exit code:
/// - 0: Success (no violations)
/// - 1: One or more violations
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid configuration content)
pub fn run_check(
    paths: &[String],
    format: OutputFormat,
    config_path: Option<&Path>,
    color: ColorChoice,
    verbose: bool,
) -> i32 {
    match run_check_inner(paths, format, config_path, color, verbose) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_VIOLATIONS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

/// Internal implementation of check command
fn run_check_inner(
    paths: &[String],
    format: OutputFormat,
    config_path: Option<&Path>,
    color: ColorChoice,
    verbose: bool,
) -> Result<bool, LintscopeError> {
    // 1. Load configuration
    let config = super::common::load_config(config_path)?;
    if config.complexity_enabled() {
        info!(
            "max-complexity = {} is recorded but C901 is not measured",
            config.max_complexity
        );
    }

    // 2. Build checks and the resolver
    let rules = builtin_rules(&config)?;
    let resolver = Arc::new(Resolver::from_config(&config));
    if resolver.baseline().is_empty() {
        warn!("No rule codes are selected. Nothing to check.");
    }

    // 3. Discover files using FileWalker
    let matcher = Arc::new(resolver.matcher().clone());
    let files = super::common::discover_files(paths, matcher, verbose)?;
    if files.is_empty() {
        warn!("No files found to check.");
    }
    info!("Checking {} files with {} checks", files.len(), rules.len());

    // 4. Run ExecutionEngine
    let engine = ExecutionEngine::new(resolver, rules);
    let result = engine.execute(files);

    // 5. Format and print output
    match format {
        OutputFormat::Human => print_human_output(&result, color)?,
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format_check(&result)),
    }

    Ok(result.is_clean())
}

/// Print violations to stdout and the summary to stderr
fn print_human_output(result: &ExecutionResult, color: ColorChoice) -> std::io::Result<()> {
    let formatter = HumanFormatter::new();
    formatter.write_violations(&mut super::common::stdout(color), &result.violations)?;
    formatter.write_summary(&mut super::common::stderr(color), result)
}
