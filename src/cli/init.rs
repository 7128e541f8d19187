//! Initialize a lintscope project
//!
//! Writes a commented starter `.flake8` that lintscope and flake8 both read.

use std::fs;
use std::path::{Path, PathBuf};

/// File written by `lintscope init`
pub const CONFIG_FILE: &str = ".flake8";

/// Default content for .flake8
const DEFAULT_FLAKE8: &str = r#"[flake8]
# Codes to report; a letter or a partial code selects every code it prefixes
select = E,F,W,C90

# Codes never reported, even when selected
extend-ignore =
    E203,
    W503

max-line-length = 88

# Set to a number to enable the C901 complexity check
max-complexity = -1

exclude =
    .git,
    __pycache__,
    build,
    dist

# Extra codes to ignore for files matching a glob
per-file-ignores =
    __init__.py: F401
    tests/*: D1

# Require a copyright notice in the first 1024 bytes of each file
copyright-check = false
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What init did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    /// The file existed and `--force` was not given
    Skipped,
    Overwritten,
}

/// Result of init command
#[derive(Debug, PartialEq, Eq)]
pub struct InitResult {
    pub path: PathBuf,
    pub outcome: InitOutcome,
}

/// Run the init command in `dir`
///
/// # Arguments
/// * `dir` - Directory to write `.flake8` into
/// * `force` - If true, overwrite an existing file. If false, leave it alone.
///
/// # Returns
/// * `Ok(InitResult)` - Where the file is and what happened to it
/// * `Err(InitError)` - If an I/O error occurred
pub fn run_init(dir: &Path, force: bool) -> Result<InitResult, InitError> {
    if !dir.is_dir() {
        return Err(InitError::Path(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let path = dir.join(CONFIG_FILE);
    let outcome = if path.exists() {
        if force {
            fs::write(&path, DEFAULT_FLAKE8)?;
            InitOutcome::Overwritten
        } else {
            InitOutcome::Skipped
        }
    } else {
        fs::write(&path, DEFAULT_FLAKE8)?;
        InitOutcome::Created
    };

    Ok(InitResult { path, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_init(temp_dir.path(), false).expect("init should succeed");

        assert_eq!(result.outcome, InitOutcome::Created);
        assert_eq!(result.path, temp_dir.path().join(".flake8"));

        let content = fs::read_to_string(&result.path).unwrap();
        assert!(content.starts_with("[flake8]"));
    }

    #[test]
    fn test_init_skips_existing_file_without_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".flake8"), "existing content").unwrap();

        let result = run_init(temp_dir.path(), false).expect("init should succeed");
        assert_eq!(result.outcome, InitOutcome::Skipped);

        let content = fs::read_to_string(temp_dir.path().join(".flake8")).unwrap();
        assert_eq!(content, "existing content");
    }

    #[test]
    fn test_init_overwrites_existing_file_with_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".flake8"), "old content").unwrap();

        let result = run_init(temp_dir.path(), true).expect("init should succeed");
        assert_eq!(result.outcome, InitOutcome::Overwritten);

        let content = fs::read_to_string(temp_dir.path().join(".flake8")).unwrap();
        assert_eq!(content, DEFAULT_FLAKE8);
    }

    #[test]
    fn test_init_error_when_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file");
        fs::write(&file, "").unwrap();

        let err = run_init(&file, false).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(DEFAULT_FLAKE8).unwrap();
        assert_eq!(config.max_line_length, 88);
        assert_eq!(config.extend_ignore.to_strings(), vec!["E203", "W503"]);
        assert_eq!(config.per_file_ignores.len(), 2);
        assert!(!config.copyright.check);
        assert!(!config.complexity_enabled());
    }
}
