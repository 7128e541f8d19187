#![forbid(unsafe_code)]

//! lintscope: rule selection and per-file overrides for flake8-style
//! configurations
//!
//! A `[flake8]` section decides which rule codes are reported. `select` and
//! `ignore` work on code prefixes, and `per-file-ignores` removes further
//! codes for files matching a glob. The [`engine::Resolver`] answers "which
//! codes are active for this file?", and the check engine runs the built-in
//! line checks against a tree using that answer.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, LintscopeError, RuleError};

// Re-export core domain types for convenient access
pub use config::{Config, PerFileOverride};
pub use engine::{EffectiveConfig, PathMatcher, Resolver};
pub use rules::{RuleCatalog, RuleRegistry};
pub use types::{GlobPattern, ProjectPath, RuleCode, RuleSet};
