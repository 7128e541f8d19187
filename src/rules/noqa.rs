#![forbid(unsafe_code)]

//! Inline suppression comments
//!
//! - `x = 1  # noqa` suppresses every finding on that line
//! - `x = 1  # noqa: E501,W291` suppresses the listed codes (as prefixes)
//! - a line reading `# flake8: noqa` anywhere in a file skips the file

use crate::types::RuleCode;
use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// `# noqa` with an optional code list
static NOQA_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#\s*noqa(?::[\s]?(?P<codes>[A-Z]+[0-9]+(?:[,\s]+[A-Z]+[0-9]+)*))?").unwrap()
});

/// A whole line consisting of `# flake8: noqa`
static NOQA_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#\s*flake8[:=]\s*noqa(?::\s?(?P<codes>.+))?\s*$").unwrap()
});

/// What a `# noqa` comment suppresses on its line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suppression {
    All,
    Codes(Vec<String>),
}

impl Suppression {
    fn covers(&self, code: &RuleCode) -> bool {
        match self {
            Suppression::All => true,
            Suppression::Codes(codes) => {
                codes.iter().any(|c| code.as_str().starts_with(c.as_str()))
            }
        }
    }
}

/// Suppressions found in one file
#[derive(Debug, Default)]
pub struct NoqaMap {
    lines: HashMap<u32, Suppression>,
    skip_file: bool,
}

impl NoqaMap {
    /// Scan `content` for suppression comments
    ///
    /// `path` is only used for log messages.
    pub fn parse(path: &Path, content: &str) -> Self {
        let mut map = Self::default();

        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = NOQA_FILE.captures(line) {
                match caps.name("codes") {
                    None => map.skip_file = true,
                    Some(codes) => warn!(
                        "{}:{}: `# flake8: noqa: {}` has no effect; \
                         use `# noqa: {}` on the line instead",
                        path.display(),
                        idx + 1,
                        codes.as_str().trim(),
                        codes.as_str().trim()
                    ),
                }
                continue;
            }

            let Some(caps) = NOQA_INLINE.captures(line) else {
                continue;
            };
            let suppression = match caps.name("codes") {
                None => Suppression::All,
                Some(codes) => Suppression::Codes(
                    codes
                        .as_str()
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|c| !c.is_empty())
                        .map(str::to_ascii_uppercase)
                        .collect(),
                ),
            };
            let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            map.lines.insert(line_no, suppression);
        }

        map
    }

    /// True if the file carries a `# flake8: noqa` line
    pub fn skip_file(&self) -> bool {
        self.skip_file
    }

    /// True if a finding with `code` on 1-indexed `line` is suppressed
    pub fn is_suppressed(&self, code: &RuleCode, line: u32) -> bool {
        self.skip_file
            || self
                .lines
                .get(&line)
                .is_some_and(|suppression| suppression.covers(code))
    }

    /// True if the file has no suppression comments at all
    pub fn is_empty(&self) -> bool {
        !self.skip_file && self.lines.is_empty()
    }
}
