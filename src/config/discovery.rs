//! Locating the configuration file for a project

use crate::config::settings::Config;
use crate::error::ConfigError;
use log::{debug, info};
use std::path::Path;

/// File names searched in each directory, in priority order
pub const CANDIDATES: &[&str] = &["setup.cfg", "tox.ini", ".flake8", "pyproject.toml"];

/// Find the nearest configuration at or above `start`
///
/// Candidate files without a flake8 section are skipped. Returns `Ok(None)`
/// when no directory up to the filesystem root holds one.
///
/// # Errors
///
/// A candidate that contains a flake8 section but fails to parse is an error;
/// discovery does not fall through to the next file.
pub fn discover(start: &Path) -> Result<Option<Config>, ConfigError> {
    for dir in start.ancestors() {
        for name in CANDIDATES {
            let candidate = dir.join(name);
            if !candidate.is_file() {
                continue;
            }

            match Config::try_load(&candidate)? {
                Some(config) => {
                    info!("Using configuration from {}", candidate.display());
                    return Ok(Some(config));
                }
                None => debug!("No flake8 section in {}", candidate.display()),
            }
        }
    }
    Ok(None)
}

/// Load `explicit` if given, otherwise discover from `start`, otherwise use
/// defaults anchored at `start`
pub fn load_or_discover(explicit: Option<&Path>, start: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    if let Some(config) = discover(start)? {
        return Ok(config);
    }

    info!(
        "No configuration found from {}; using defaults",
        start.display()
    );
    Ok(Config {
        root: Some(std::path::absolute(start)?),
        ..Config::default()
    })
}
