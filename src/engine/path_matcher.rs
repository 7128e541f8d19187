#![forbid(unsafe_code)]

//! Glob matching of file paths against per-file overrides and excludes
//!
//! All patterns are compiled once, when the matcher is built. `*` stays
//! within a path segment and `**` crosses segments. A pattern without a `/`
//! is also tried against the file name, so `__init__.py` matches
//! `pkg/__init__.py`.
//!
//! A pattern that fails to compile is logged and then never matches; it does
//! not take the rest of the configuration down with it.

use crate::config::PerFileOverride;
use crate::types::{GlobPattern, ProjectPath};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use log::warn;
use std::path::{Path, PathBuf};

/// A per-file override with its compiled glob
#[derive(Debug, Clone)]
struct CompiledOverride {
    entry: PerFileOverride,
    matcher: Option<GlobMatcher>,
}

/// Matches paths against the configured globs
#[derive(Debug, Clone)]
pub struct PathMatcher {
    overrides: Vec<CompiledOverride>,
    /// Every exclude pattern, matched against the path and its ancestors
    exclude: GlobSet,
    /// Slash-free exclude patterns, matched against single components
    exclude_names: GlobSet,
    filename: GlobSet,
    root: Option<PathBuf>,
}

impl PathMatcher {
    /// Compile the matcher
    ///
    /// `root` is the directory relative patterns are anchored to; absolute
    /// paths beneath it are made relative before matching.
    pub fn new(
        overrides: &[PerFileOverride],
        exclude: &[GlobPattern],
        filename: &[GlobPattern],
        root: Option<&Path>,
    ) -> Self {
        let overrides = overrides
            .iter()
            .map(|entry| CompiledOverride {
                matcher: compile(&entry.path_glob, "per-file-ignores").map(|g| g.compile_matcher()),
                entry: entry.clone(),
            })
            .collect();

        let basenames: Vec<GlobPattern> = exclude
            .iter()
            .filter(|p| p.is_basename_pattern())
            .cloned()
            .collect();

        Self {
            overrides,
            exclude: build_set(exclude, "exclude"),
            exclude_names: build_set(&basenames, "exclude"),
            filename: build_set(filename, "filename"),
            root: root.map(Path::to_path_buf),
        }
    }

    /// A matcher with no patterns at all
    pub fn empty() -> Self {
        Self::new(&[], &[], &[], None)
    }

    /// Normalize `path` the way every query does
    pub fn project_path(&self, path: &Path) -> ProjectPath {
        ProjectPath::relative_to(path, self.root.as_deref())
    }

    /// Overrides whose glob matches `path`, in declaration order
    pub fn applicable_overrides(&self, path: &Path) -> Vec<&PerFileOverride> {
        let path = self.project_path(path);
        self.applicable_to(&path)
    }

    pub(crate) fn applicable_to(&self, path: &ProjectPath) -> Vec<&PerFileOverride> {
        self.overrides
            .iter()
            .filter(|o| {
                o.matcher.as_ref().is_some_and(|m| {
                    m.is_match(path.as_str())
                        || (o.entry.path_glob.is_basename_pattern() && m.is_match(path.file_name()))
                })
            })
            .map(|o| &o.entry)
            .collect()
    }

    /// True if `path`, one of its parent directories, or one of its
    /// components matches an exclude pattern
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = self.project_path(path);
        self.is_excluded_path(&path)
    }

    pub(crate) fn is_excluded_path(&self, path: &ProjectPath) -> bool {
        if path.as_str() == "." {
            return false;
        }
        self.exclude.is_match(path.as_str())
            || path.ancestors().iter().any(|dir| self.exclude.is_match(dir))
            || path.components().any(|c| self.exclude_names.is_match(c))
    }

    /// True if a `filename` pattern matches the path or its file name
    pub fn matches_filename(&self, path: &Path) -> bool {
        let path = self.project_path(path);
        self.matches_filename_path(&path)
    }

    pub(crate) fn matches_filename_path(&self, path: &ProjectPath) -> bool {
        self.filename.is_match(path.as_str()) || self.filename.is_match(path.file_name())
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

fn compile(pattern: &GlobPattern, option: &str) -> Option<Glob> {
    let text = match pattern.as_str().trim_end_matches('/') {
        "" => pattern.as_str(),
        trimmed => trimmed,
    };

    match GlobBuilder::new(text).literal_separator(true).build() {
        Ok(glob) => Some(glob),
        Err(e) => {
            warn!("Ignoring malformed {} pattern '{}': {}", option, pattern, e);
            None
        }
    }
}

fn build_set(patterns: &[GlobPattern], option: &str) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for glob in patterns.iter().filter_map(|p| compile(p, option)) {
        builder.add(glob);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Failed to build {} patterns: {}", option, e);
        GlobSet::empty()
    })
}
