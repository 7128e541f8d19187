//! Resolve command implementation
//!
//! `lintscope resolve <PATH>...` prints the codes active for each path after
//! the global selection and per-file overrides are applied. The paths need
//! not exist; resolution never reads them.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, config_exit_code};
use crate::engine::{EffectiveConfig, Resolver};
use crate::error::ConfigError;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::path::Path;

/// Error type specific to resolve command
#[derive(Debug, thiserror::Error)]
enum ResolveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the resolve command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error in the configuration
pub fn run_resolve(
    paths: &[String],
    format: OutputFormat,
    config_path: Option<&Path>,
    color: ColorChoice,
) -> i32 {
    match run_resolve_inner(paths, format, config_path, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match &e {
                ResolveError::Config(config) => config_exit_code(config),
                ResolveError::Io(_) => EXIT_ERROR,
            }
        }
    }
}

fn run_resolve_inner(
    paths: &[String],
    format: OutputFormat,
    config_path: Option<&Path>,
    color: ColorChoice,
) -> Result<(), ResolveError> {
    let config = super::common::load_config(config_path)?;
    let resolver = Resolver::from_config(&config);
    let resolutions = resolve_paths(&resolver, paths)?;

    match format {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new();
            let mut out = super::common::stdout(color);
            for effective in &resolutions {
                formatter.write_resolution(&mut out, effective)?;
            }
        }
        OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_resolutions(&resolutions));
        }
    }

    Ok(())
}

/// Resolve each path, in the order given
///
/// Relative paths are taken from the working directory so they line up with
/// a configuration discovered further up the tree.
fn resolve_paths(resolver: &Resolver, paths: &[String]) -> std::io::Result<Vec<EffectiveConfig>> {
    paths
        .iter()
        .map(|path| -> std::io::Result<EffectiveConfig> {
            let absolute = std::path::absolute(Path::new(path))?;
            Ok(resolver.effective(&absolute))
        })
        .collect()
}
