#![forbid(unsafe_code)]

//! Per-file rule resolution
//!
//! The Resolver combines the global selection with the per-file overrides.
//! Every override whose glob matches a file removes its codes from that
//! file's active set, so a file matched by several overrides loses the codes
//! of all of them.
//!
//! Resolution never touches the filesystem and never fails.

use crate::config::Config;
use crate::engine::path_matcher::PathMatcher;
use crate::rules::{RuleCatalog, RuleRegistry};
use crate::types::{GlobPattern, ProjectPath, RuleSet};
use serde::Serialize;
use std::path::Path;

/// Everything that applies to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub path: ProjectPath,
    pub excluded: bool,
    pub active: RuleSet,
    /// Globs of the per-file overrides that matched, in declaration order
    pub overrides: Vec<GlobPattern>,
    pub max_line_length: usize,
    pub max_complexity: i64,
}

/// Resolves the active rules for file paths
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: RuleRegistry,
    matcher: PathMatcher,
    /// `select - ignore` over the catalog, computed once
    baseline: RuleSet,
    max_line_length: usize,
    max_complexity: i64,
}

impl Resolver {
    /// Build a resolver over the built-in catalog
    pub fn from_config(config: &Config) -> Self {
        Self::with_catalog(config, RuleCatalog::builtin())
    }

    /// Build a resolver over a caller-supplied catalog
    pub fn with_catalog(config: &Config, catalog: RuleCatalog) -> Self {
        let registry = RuleRegistry::from_config(config, catalog);
        let matcher = PathMatcher::new(
            &config.per_file_ignores,
            &config.all_excludes(),
            &config.filename,
            config.root.as_deref(),
        );
        Self::new(registry, matcher, config.max_line_length, config.max_complexity)
    }

    pub fn new(
        registry: RuleRegistry,
        matcher: PathMatcher,
        max_line_length: usize,
        max_complexity: i64,
    ) -> Self {
        let baseline = registry.active();
        Self {
            registry,
            matcher,
            baseline,
            max_line_length,
            max_complexity,
        }
    }

    /// The active codes for `path`
    pub fn resolve(&self, path: &Path) -> RuleSet {
        let path = self.matcher.project_path(path);
        self.resolve_project(&path)
    }

    /// The active codes for an already normalized path
    pub fn resolve_project(&self, path: &ProjectPath) -> RuleSet {
        let mut active = self.baseline.clone();
        for entry in self.matcher.applicable_to(path) {
            active.remove_matching(&entry.extra_ignore);
        }
        active
    }

    /// True if `code` is reported for `path`
    ///
    /// Unlike `resolve`, this also answers for codes missing from the
    /// catalog.
    pub fn is_active(&self, path: &Path, code: &str) -> bool {
        if !self.registry.is_selected(code) {
            return false;
        }
        let path = self.matcher.project_path(path);
        !self
            .matcher
            .applicable_to(&path)
            .iter()
            .any(|entry| entry.extra_ignore.matches(code))
    }

    /// The full picture for `path`
    pub fn effective(&self, path: &Path) -> EffectiveConfig {
        let path = self.matcher.project_path(path);
        let overrides = self
            .matcher
            .applicable_to(&path)
            .into_iter()
            .map(|entry| entry.path_glob.clone())
            .collect();

        EffectiveConfig {
            excluded: self.matcher.is_excluded_path(&path),
            active: self.resolve_project(&path),
            overrides,
            max_line_length: self.max_line_length,
            max_complexity: self.max_complexity,
            path,
        }
    }

    /// Codes active for a file no override matches
    pub fn baseline(&self) -> &RuleSet {
        &self.baseline
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }
}
