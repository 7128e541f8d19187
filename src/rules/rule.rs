#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing checks

use crate::types::RuleCode;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Execution context provided to rules when they run
#[derive(Debug)]
pub struct ExecutionContext<'a> {
    /// Path to the file being analyzed
    pub file_path: &'a Path,

    /// Full text content of the file
    pub content: &'a str,
}

/// A single finding reported by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Code of the finding, e.g. `E501`
    pub code: RuleCode,

    /// File path where the violation was found
    pub file: PathBuf,

    /// 1-indexed line
    pub line: u32,

    /// 1-indexed column
    pub column: u32,

    /// Human-readable message, without the code
    pub message: String,
}

impl Violation {
    pub fn new(
        code: RuleCode,
        file: &Path,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            file: file.to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Trait that all checks implement
///
/// A rule may emit several codes; the engine runs it when at least one of
/// them is active for the file and drops findings whose code is not.
/// `Send + Sync` so files can be checked in parallel.
pub trait Rule: Send + Sync {
    /// Codes this rule can emit
    fn codes(&self) -> &[RuleCode];

    /// Human-readable description of what the rule checks
    fn description(&self) -> &str;

    /// Check one file, returning every finding in it
    fn check(&self, ctx: &ExecutionContext) -> Vec<Violation>;
}

/// Convert a 0-based count to a 1-based position, saturating at `u32::MAX`
pub(crate) fn position(zero_based: usize) -> u32 {
    u32::try_from(zero_based + 1).unwrap_or(u32::MAX)
}
