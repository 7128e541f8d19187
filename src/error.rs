//! Error types for lintscope
//!
//! Each concern gets its own error enum; `LintscopeError` is the umbrella
//! type the CLI maps onto exit codes.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed INI content
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Malformed TOML content
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A key was present but its value could not be interpreted
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The file exists but has no flake8 section
    #[error("No [{section}] section in {}", path.display())]
    MissingSection { section: String, path: PathBuf },
}

impl ConfigError {
    /// Whether the error comes from the content of the file rather than from
    /// reaching it
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Syntax { .. } | ConfigError::Toml(_) | ConfigError::InvalidValue { .. }
        )
    }
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A string that is not a well-formed rule code
    #[error("Invalid rule code: {0}")]
    InvalidCode(String),

    /// Rule not found in the catalog
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

/// Top-level error type for lintscope
#[derive(Debug, thiserror::Error)]
pub enum LintscopeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Directory traversal error
    #[error("File walker error: {0}")]
    Walk(#[from] crate::engine::file_walker::FileWalkerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
