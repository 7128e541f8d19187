#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order. A check run
//! produces every violation record (already sorted by file, line, column
//! and code) followed by one status record. A resolve run produces one
//! resolution record per path, in the order the paths were given.

use crate::engine::{EffectiveConfig, ExecutionResult};
use serde::Serialize;
use std::path::Path;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a check result as JSONL
    pub fn format_check(&self, result: &ExecutionResult) -> String {
        let mut output = String::new();

        for violation in &result.violations {
            push_record(
                &mut output,
                &ViolationRecord {
                    record_type: "violation",
                    code: violation.code.as_str(),
                    file: &violation.file,
                    line: violation.line,
                    column: violation.column,
                    message: &violation.message,
                },
            );
        }

        push_record(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.is_clean(),
                files_checked: result.files_checked as u64,
                files_skipped: result.files_skipped as u64,
                total_violations: result.violations.len() as u64,
            },
        );

        output
    }

    /// Format per-path resolutions as JSONL
    pub fn format_resolutions(&self, resolutions: &[EffectiveConfig]) -> String {
        let mut output = String::new();

        for effective in resolutions {
            push_record(
                &mut output,
                &ResolutionRecord {
                    record_type: "resolution",
                    effective,
                },
            );
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Violation record for JSONL output
#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    code: &'a str,
    file: &'a Path,
    line: u32,
    column: u32,
    message: &'a str,
}

/// Resolution record for JSONL output
#[derive(Debug, Serialize)]
struct ResolutionRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    effective: &'a EffectiveConfig,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    files_skipped: u64,
    total_violations: u64,
}
