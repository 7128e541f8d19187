//! File discovery and traversal with gitignore support
//!
//! Directories are walked with the ignore crate. Excluded directories are
//! pruned before they are entered, and files found by the walk must also
//! match a `filename` pattern. Files named explicitly on the command line
//! skip the `filename` check but are still subject to `exclude`.

use crate::engine::path_matcher::PathMatcher;
use crate::types::ProjectPath;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file or one of its directories matched an exclude pattern
    Excluded,
    /// Found by the walk but matched no `filename` pattern
    NoMatchingFilename,
    /// Not a regular file (e.g., directory, symlink)
    NotAFile,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::Excluded => "excluded",
            SkipReason::NoMatchingFilename => "no matching filename pattern",
            SkipReason::NotAFile => "not a file",
        };
        f.write_str(reason)
    }
}

/// Result of file walking - either a file to check or a skipped path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    /// File to be checked
    File(FileEntry),
    /// Path that was skipped with reason
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as walked, used for display
    pub path: PathBuf,
    /// Path relative to the configuration root, used for matching
    pub project_path: ProjectPath,
}

impl FileEntry {
    pub fn new(path: PathBuf, matcher: &PathMatcher) -> Self {
        let project_path = project_path(&path, matcher);
        Self { path, project_path }
    }
}

/// Normalize a walked path against the matcher's root
///
/// Relative paths are taken from the working directory, which is not
/// necessarily the directory the configuration was found in.
fn project_path(path: &Path, matcher: &PathMatcher) -> ProjectPath {
    match std::path::absolute(path) {
        Ok(absolute) => matcher.project_path(&absolute),
        Err(_) => matcher.project_path(path),
    }
}

/// Iterator source over the files to check
pub struct FileWalker {
    paths: Vec<PathBuf>,
    matcher: Arc<PathMatcher>,
    verbose: bool,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `paths` - Files and directories to check
    /// * `matcher` - Exclude and filename patterns
    ///
    /// # Errors
    /// Returns `FileWalkerError::NotFound` if a path does not exist
    pub fn new(paths: &[PathBuf], matcher: Arc<PathMatcher>) -> Result<Self, FileWalkerError> {
        Self::with_verbose(paths, matcher, false)
    }

    /// Creates a new FileWalker with verbose mode option
    ///
    /// With `verbose`, skipped paths are reported rather than dropped.
    pub fn with_verbose(
        paths: &[PathBuf],
        matcher: Arc<PathMatcher>,
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            return Err(FileWalkerError::NotFound(missing.clone()));
        }

        Ok(Self {
            paths: paths.to_vec(),
            matcher,
            verbose,
        })
    }

    /// Walks every path and returns an iterator over matching files
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        self.walk_with_skip_info().filter_map(|result| match result {
            Ok(WalkResult::File(file)) => Some(Ok(file)),
            Ok(WalkResult::Skipped { .. }) => None,
            Err(e) => Some(Err(e)),
        })
    }

    /// Walks every path and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let verbose = self.verbose;
        let matcher = self.matcher;

        self.paths
            .into_iter()
            .flat_map(move |root| {
                let results: Box<dyn Iterator<Item = Result<WalkResult, FileWalkerError>>> =
                    if root.is_file() {
                        Box::new(std::iter::once(Ok(Self::explicit_file(root, &matcher))))
                    } else {
                        Box::new(Self::walk_dir(root, Arc::clone(&matcher)))
                    };
                results
            })
            .filter(move |result| verbose || !matches!(result, Ok(WalkResult::Skipped { .. })))
    }

    fn explicit_file(path: PathBuf, matcher: &PathMatcher) -> WalkResult {
        let entry = FileEntry::new(path, matcher);
        if matcher.is_excluded_path(&entry.project_path) {
            WalkResult::Skipped {
                path: entry.path,
                reason: SkipReason::Excluded,
            }
        } else {
            WalkResult::File(entry)
        }
    }

    fn walk_dir(
        root: PathBuf,
        matcher: Arc<PathMatcher>,
    ) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let prune = Arc::clone(&matcher);
        let walker = WalkBuilder::new(&root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .filter_entry(move |entry| {
                // Never prune the root the user asked for
                entry.depth() == 0
                    || !entry.file_type().is_some_and(|ft| ft.is_dir())
                    || !prune.is_excluded_path(&project_path(entry.path(), &prune))
            })
            .build();

        walker.map(move |result| -> Result<WalkResult, FileWalkerError> {
            let entry = result?;
            let path = entry.path().to_path_buf();

            // Only process files (not directories)
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return Ok(WalkResult::Skipped {
                    path,
                    reason: SkipReason::NotAFile,
                });
            }

            let file = FileEntry::new(path, &matcher);
            if matcher.is_excluded_path(&file.project_path) {
                return Ok(WalkResult::Skipped {
                    path: file.path,
                    reason: SkipReason::Excluded,
                });
            }
            if !matcher.matches_filename_path(&file.project_path) {
                return Ok(WalkResult::Skipped {
                    path: file.path,
                    reason: SkipReason::NoMatchingFilename,
                });
            }

            Ok(WalkResult::File(file))
        })
    }
}
