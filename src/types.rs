#![forbid(unsafe_code)]

//! Core domain types for lintscope
//!
//! This module defines the fundamental types used throughout the system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A validated rule code such as `E203`, `D1` or `C90`
///
/// Codes are one to three ASCII uppercase letters followed by at most three
/// digits. A code may stand for itself or act as a prefix of longer codes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleCode(String);

impl RuleCode {
    /// Creates a new RuleCode, validating the input
    ///
    /// Returns None if the input is not a well-formed code
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        let letters = code.chars().take_while(|c| c.is_ascii_uppercase()).count();
        let digits = code[letters..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .count();

        if !(1..=3).contains(&letters) || digits > 3 || letters + digits != code.len() {
            return None;
        }
        Some(RuleCode(code))
    }

    /// Wraps a code literal known to be well formed
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert!(RuleCode::new(code).is_some(), "malformed code literal {code}");
        RuleCode(code.to_string())
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this code, read as a prefix, covers `code`
    ///
    /// `D1` covers `D100` and `D1` itself but not `D201`.
    pub fn covers(&self, code: &str) -> bool {
        code.starts_with(self.0.as_str())
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleCode::new(value.clone()).ok_or_else(|| format!("Invalid rule code '{}'", value))
    }
}

impl From<RuleCode> for String {
    fn from(code: RuleCode) -> Self {
        code.0
    }
}

/// A set of rule codes, kept sorted for deterministic output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeSet<RuleCode>);

impl RuleSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds a set from string codes, dropping any that are malformed
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        codes.into_iter().filter_map(RuleCode::new).collect()
    }

    pub fn insert(&mut self, code: RuleCode) -> bool {
        self.0.insert(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c.as_str() == code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleCode> {
        self.0.iter()
    }

    /// True if any member of the set is a prefix of `code`
    pub fn matches(&self, code: &str) -> bool {
        self.0.iter().any(|prefix| prefix.covers(code))
    }

    /// Returns the members of `self` and `other` together
    pub fn union(&self, other: &RuleSet) -> RuleSet {
        RuleSet(self.0.union(&other.0).cloned().collect())
    }

    /// Removes every member that one of `prefixes` covers
    pub fn remove_matching(&mut self, prefixes: &RuleSet) {
        self.0.retain(|code| !prefixes.matches(code.as_str()));
    }

    /// Codes as owned strings, in sorted order
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl FromIterator<RuleCode> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RuleCode>>(iter: I) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}

impl Extend<RuleCode> for RuleSet {
    fn extend<I: IntoIterator<Item = RuleCode>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleCode;
    type IntoIter = std::collections::btree_set::Iter<'a, RuleCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join(","))
    }
}

/// A normalized file path used for glob matching
///
/// Paths use forward slashes, have no leading "./" and no trailing slash;
/// the root is represented as ".".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Creates a new ProjectPath with normalization
    pub fn new(path: impl Into<String>) -> Self {
        ProjectPath(Self::normalize(path.into()))
    }

    /// Normalizes `path` and, when it is absolute and beneath `root`, makes
    /// it relative to `root`
    ///
    /// `.` and `..` components are collapsed before the root is stripped.
    pub fn relative_to(path: &Path, root: Option<&Path>) -> Self {
        let path = collapse(path);
        if let Some(root) = root
            && path.is_absolute()
            && let Ok(stripped) = path.strip_prefix(collapse(root))
        {
            return Self::new(stripped.to_string_lossy().to_string());
        }
        Self::new(path.to_string_lossy().to_string())
    }

    /// Normalizes a path:
    /// - Convert backslashes to forward slashes
    /// - Collapse `.` and `..` segments and repeated or trailing slashes
    /// - Empty path, "." or "/" becomes "."
    ///
    /// A leading `..` that cannot be collapsed is kept on relative paths and
    /// dropped at the filesystem root.
    fn normalize(path: String) -> String {
        let path = path.replace('\\', "/");
        let absolute = path.starts_with('/');

        let mut parts: Vec<&str> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if absolute => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }

        if parts.is_empty() {
            return ".".to_string();
        }

        let joined = parts.join("/");
        if absolute { format!("/{}", joined) } else { joined }
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path component
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Every path component, in order
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    /// Proper ancestor directories, outermost first
    ///
    /// `a/b/c.py` yields `a` and `a/b`.
    pub fn ancestors(&self) -> Vec<&str> {
        self.0
            .match_indices('/')
            .filter(|(idx, _)| *idx > 0)
            .map(|(idx, _)| &self.0[..idx])
            .collect()
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem
fn collapse(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProjectPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(ProjectPath::new(value))
    }
}

impl From<ProjectPath> for String {
    fn from(path: ProjectPath) -> Self {
        path.0
    }
}

/// A glob pattern for file matching
///
/// A thin wrapper around a string that will be compiled with `globset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern, dropping a leading "./"
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into().replace('\\', "/");
        match pattern.strip_prefix("./") {
            Some(rest) if !rest.is_empty() => GlobPattern(rest.to_string()),
            _ => GlobPattern(pattern),
        }
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the pattern names a single path component
    pub fn is_basename_pattern(&self) -> bool {
        !self.0.contains('/')
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern::new(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern::new(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_code_validation() {
        assert!(RuleCode::new("E203").is_some());
        assert!(RuleCode::new("D1").is_some());
        assert!(RuleCode::new("E").is_some());
        assert!(RuleCode::new("ABC123").is_some());
        assert!(RuleCode::new("").is_none());
        assert!(RuleCode::new("e203").is_none());
        assert!(RuleCode::new("ABCD1").is_none());
        assert!(RuleCode::new("E1234").is_none());
        assert!(RuleCode::new("203").is_none());
        assert!(RuleCode::new("E20A").is_none());
        assert!(RuleCode::new("E 203").is_none());
    }

    #[test]
    fn test_rule_code_covers_prefix() {
        let d1 = RuleCode::new("D1").unwrap();
        assert!(d1.covers("D100"));
        assert!(d1.covers("D105"));
        assert!(d1.covers("D1"));
        assert!(!d1.covers("D201"));
        assert!(!d1.covers("E1"));
    }

    #[test]
    fn test_rule_set_matches_and_removal() {
        let mut set = RuleSet::from_codes(["E101", "E203", "E501", "W291"]);
        assert_eq!(set.len(), 4);
        assert!(set.contains("E203"));

        let prefixes = RuleSet::from_codes(["E2", "W"]);
        assert!(prefixes.matches("E203"));
        assert!(!prefixes.matches("E101"));

        set.remove_matching(&prefixes);
        assert_eq!(set.to_strings(), vec!["E101", "E501"]);
    }

    #[test]
    fn test_rule_set_drops_malformed_codes() {
        let set = RuleSet::from_codes(["E1", "bogus", "W6"]);
        assert_eq!(set.to_strings(), vec!["E1", "W6"]);
        assert_eq!(set.to_string(), "E1,W6");
    }

    #[test]
    fn test_rule_set_union() {
        let a = RuleSet::from_codes(["E1", "W6"]);
        let b = RuleSet::from_codes(["W6", "N801"]);
        assert_eq!(a.union(&b).to_strings(), vec!["E1", "N801", "W6"]);
    }

    #[test]
    fn test_project_path_normalization() {
        assert_eq!(ProjectPath::new("").as_str(), ".");
        assert_eq!(ProjectPath::new(".").as_str(), ".");
        assert_eq!(ProjectPath::new("./").as_str(), ".");
        assert_eq!(ProjectPath::new("src").as_str(), "src");
        assert_eq!(ProjectPath::new("src/").as_str(), "src");
        assert_eq!(ProjectPath::new("./src/a.py").as_str(), "src/a.py");
        assert_eq!(ProjectPath::new("././src").as_str(), "src");
        assert_eq!(ProjectPath::new("src\\pkg\\a.py").as_str(), "src/pkg/a.py");
        assert_eq!(ProjectPath::new("src//pkg/./a.py").as_str(), "src/pkg/a.py");
    }

    #[test]
    fn test_project_path_collapses_parent_segments() {
        assert_eq!(ProjectPath::new("pkg/../tests/a.py").as_str(), "tests/a.py");
        assert_eq!(ProjectPath::new("a/b/../../c.py").as_str(), "c.py");
        assert_eq!(ProjectPath::new("pkg/..").as_str(), ".");
        assert_eq!(ProjectPath::new("../x.py").as_str(), "../x.py");
        assert_eq!(ProjectPath::new("../../x.py").as_str(), "../../x.py");
        assert_eq!(ProjectPath::new("/../x.py").as_str(), "/x.py");
    }

    #[test]
    fn test_project_path_relative_to_root() {
        let root = Path::new("/work/project");
        let path = ProjectPath::relative_to(Path::new("/work/project/tests/x.py"), Some(root));
        assert_eq!(path.as_str(), "tests/x.py");

        let outside = ProjectPath::relative_to(Path::new("/elsewhere/x.py"), Some(root));
        assert_eq!(outside.as_str(), "/elsewhere/x.py");

        let relative = ProjectPath::relative_to(Path::new("tests/x.py"), Some(root));
        assert_eq!(relative.as_str(), "tests/x.py");

        let dotted = ProjectPath::relative_to(
            Path::new("/work/project/pkg/../tests/./x.py"),
            Some(root),
        );
        assert_eq!(dotted.as_str(), "tests/x.py");

        let via_parent = ProjectPath::relative_to(
            Path::new("/work/project/tests/x.py"),
            Some(Path::new("/work/other/../project")),
        );
        assert_eq!(via_parent.as_str(), "tests/x.py");
    }

    #[test]
    fn test_project_path_parts() {
        let path = ProjectPath::new("tests/unit/x.py");
        assert_eq!(path.file_name(), "x.py");
        assert_eq!(path.components().collect::<Vec<_>>(), vec!["tests", "unit", "x.py"]);
        assert_eq!(path.ancestors(), vec!["tests", "tests/unit"]);
        assert!(ProjectPath::new("x.py").ancestors().is_empty());
    }

    #[test]
    fn test_glob_pattern() {
        let pattern = GlobPattern::new("./tests/*.py");
        assert_eq!(pattern.as_str(), "tests/*.py");
        assert!(!pattern.is_basename_pattern());
        assert!(GlobPattern::new("__init__.py").is_basename_pattern());
    }
}
