//! Config command implementation
//!
//! `lintscope config` prints the configuration in effect, after discovery
//! and defaults, as pretty-printed JSON.

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, config_exit_code};
use crate::config::Config;
use crate::error::ConfigError;
use std::path::Path;

/// Error type specific to config command
#[derive(Debug, thiserror::Error)]
enum ShowConfigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the config command
pub fn run_show_config(config_path: Option<&Path>) -> i32 {
    match render(config_path) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            match &e {
                ShowConfigError::Config(config) => config_exit_code(config),
                ShowConfigError::Json(_) => EXIT_ERROR,
            }
        }
    }
}

fn render(config_path: Option<&Path>) -> Result<String, ShowConfigError> {
    let config = super::common::load_config(config_path)?;
    to_json(&config)
}

fn to_json(config: &Config) -> Result<String, ShowConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}
