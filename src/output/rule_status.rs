#![forbid(unsafe_code)]

//! RuleStatus output formatters
//!
//! This module provides formatters for displaying catalog codes and their
//! state from the `lintscope list` command. It supports both human-readable
//! and JSONL output formats.

use crate::engine::Resolver;
use crate::rules::Selection;
use crate::types::RuleCode;
use serde::Serialize;
use std::path::Path;

/// Whether a code is reported, and if not, why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    Active,
    /// Covered by the global `ignore` list
    Ignored,
    /// Not covered by `select`
    NotSelected,
    /// Selected, but a per-file override removes it for the file asked about
    FileIgnored,
}

impl RuleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleState::Active => "active",
            RuleState::Ignored => "ignored",
            RuleState::NotSelected => "not-selected",
            RuleState::FileIgnored => "file-ignored",
        }
    }
}

/// Status information for a single catalog code
#[derive(Debug, Clone)]
pub struct RuleStatus {
    pub code: RuleCode,
    pub description: String,
    pub state: RuleState,
}

/// State of every catalogued code, globally or for one file
pub fn rule_statuses(resolver: &Resolver, file: Option<&Path>) -> Vec<RuleStatus> {
    let active = file.map(|path| resolver.resolve(path));

    resolver
        .registry()
        .catalog()
        .iter()
        .map(|(code, description)| {
            let state = match resolver.registry().explain(code.as_str()) {
                Selection::Ignored => RuleState::Ignored,
                Selection::NotSelected => RuleState::NotSelected,
                Selection::Selected => match &active {
                    Some(active) if !active.contains(code.as_str()) => RuleState::FileIgnored,
                    _ => RuleState::Active,
                },
            };
            RuleStatus {
                code: code.clone(),
                description: description.to_string(),
                state,
            }
        })
        .collect()
}

/// Human-readable formatter for rule status
pub struct RuleStatusHumanFormatter;

impl RuleStatusHumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        RuleStatusHumanFormatter
    }

    /// Format a list of rule statuses for human consumption
    pub fn format(&self, statuses: &[RuleStatus]) -> String {
        let mut output = String::new();

        let active = statuses
            .iter()
            .filter(|s| s.state == RuleState::Active)
            .count();
        output.push_str(&format!(
            "Rules ({} of {} active):\n",
            active,
            statuses.len()
        ));
        output.push('\n');

        for status in statuses {
            let icon = if status.state == RuleState::Active {
                "✓"
            } else {
                "✗"
            };
            output.push_str(&format!(
                "  {} {:<5} {:<13} {}\n",
                icon,
                status.code.as_str(),
                status.state.as_str(),
                status.description
            ));
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, statuses: &[RuleStatus]) {
        print!("{}", self.format(statuses));
    }
}

impl Default for RuleStatusHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSONL output structure for rule status
#[derive(Debug, Serialize)]
struct JsonlRuleStatus<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    code: &'a str,
    description: &'a str,
    state: &'static str,
}

/// JSONL formatter for rule status
pub struct RuleStatusJsonlFormatter;

impl RuleStatusJsonlFormatter {
    /// Create a new JSONL formatter
    pub fn new() -> Self {
        RuleStatusJsonlFormatter
    }

    /// Format a list of rule statuses as JSONL, one `rule` record per line
    pub fn format(&self, statuses: &[RuleStatus]) -> String {
        let mut output = String::new();

        for status in statuses {
            let record = JsonlRuleStatus {
                record_type: "rule",
                code: status.code.as_str(),
                description: &status.description,
                state: status.state.as_str(),
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, statuses: &[RuleStatus]) {
        print!("{}", self.format(statuses));
    }
}

impl Default for RuleStatusJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
