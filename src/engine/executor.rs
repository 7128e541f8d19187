#![forbid(unsafe_code)]

//! Parallel execution engine for running checks across files
//!
//! For each file the engine resolves the active codes, runs only the rules
//! that can emit one of them, and drops findings that are inactive or
//! suppressed with `# noqa`. Files are processed in parallel with rayon;
//! the result is sorted so output does not depend on scheduling.

use crate::engine::file_walker::FileEntry;
use crate::engine::resolver::Resolver;
use crate::rules::{ExecutionContext, NoqaMap, Rule, Violation};
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::sync::Arc;

/// Result of checking a set of files
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Every reported violation, sorted by file, line, column and code
    pub violations: Vec<Violation>,
    /// Number of files read and checked
    pub files_checked: usize,
    /// Files that could not be read
    pub files_skipped: usize,
}

impl ExecutionResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome for one file
enum FileOutcome {
    Checked(Vec<Violation>),
    Unreadable,
}

/// Execution engine that coordinates parallel rule execution
pub struct ExecutionEngine {
    resolver: Arc<Resolver>,
    rules: Vec<Box<dyn Rule>>,
}

impl ExecutionEngine {
    /// Creates a new ExecutionEngine
    ///
    /// # Arguments
    ///
    /// * `resolver` - Decides which codes are active for each file
    /// * `rules` - Every check that may run
    pub fn new(resolver: Arc<Resolver>, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { resolver, rules }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Check every file
    pub fn execute(&self, files: Vec<FileEntry>) -> ExecutionResult {
        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| self.execute_file(file))
            .collect();

        let mut result = ExecutionResult::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Checked(violations) => {
                    result.files_checked += 1;
                    result.violations.extend(violations);
                }
                FileOutcome::Unreadable => result.files_skipped += 1,
            }
        }

        result.violations.sort_by(|a, b| {
            (&a.file, a.line, a.column, &a.code).cmp(&(&b.file, b.line, b.column, &b.code))
        });
        result
    }

    /// Check a single file
    fn execute_file(&self, file: &FileEntry) -> FileOutcome {
        // Read file content - if we can't read it, log warning and skip
        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read file {}: {}", file.path.display(), e);
                return FileOutcome::Unreadable;
            }
        };

        let noqa = NoqaMap::parse(&file.path, &content);
        if noqa.skip_file() {
            debug!("Skipping {}: file-level noqa", file.path.display());
            return FileOutcome::Checked(vec![]);
        }

        let active = self.resolver.resolve_project(&file.project_path);
        let ctx = ExecutionContext {
            file_path: &file.path,
            content: &content,
        };

        let violations = self
            .rules
            .iter()
            .filter(|rule| rule.codes().iter().any(|code| active.contains(code.as_str())))
            .flat_map(|rule| rule.check(&ctx))
            .filter(|v| active.contains(v.code.as_str()))
            .filter(|v| !noqa.is_suppressed(&v.code, v.line))
            .collect();

        FileOutcome::Checked(violations)
    }
}
