#![forbid(unsafe_code)]

//! C801: the file header must carry a copyright notice

use crate::config::CopyrightSettings;
use crate::error::RuleError;
use crate::rules::rule::{ExecutionContext, Rule, Violation};
use crate::types::RuleCode;
use regex::{Regex, RegexBuilder};

/// Bytes from the start of the file that are searched for the notice, unless
/// `copyright-min-file-size` asks for more
pub const HEADER_BYTES: usize = 1024;

/// Looks for a copyright notice near the top of each file
pub struct CopyrightRule {
    codes: [RuleCode; 1],
    pattern: Regex,
    min_file_size: usize,
}

impl std::fmt::Debug for CopyrightRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyrightRule")
            .field("pattern", &self.pattern.as_str())
            .field("min_file_size", &self.min_file_size)
            .finish()
    }
}

impl CopyrightRule {
    /// Compile the rule from configuration
    ///
    /// Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the configured expression does
    /// not compile.
    pub fn from_settings(settings: &CopyrightSettings) -> Result<Self, RuleError> {
        let source = settings.pattern();
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                RuleError::InvalidRegex(format!(
                    "Failed to compile copyright-regexp '{}': {}",
                    source, e
                ))
            })?;

        Ok(Self {
            codes: [RuleCode::known("C801")],
            pattern,
            min_file_size: settings.min_file_size,
        })
    }
}

/// The first `limit` bytes of `content`, cut back to a character boundary
fn header(content: &str, limit: usize) -> &str {
    if content.len() <= limit {
        return content;
    }
    let mut end = limit;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

impl Rule for CopyrightRule {
    fn codes(&self) -> &[RuleCode] {
        &self.codes
    }

    fn description(&self) -> &str {
        "copyright notice not present"
    }

    fn check(&self, ctx: &ExecutionContext) -> Vec<Violation> {
        let top = header(ctx.content, HEADER_BYTES.max(self.min_file_size));
        if top.len() < self.min_file_size || self.pattern.is_match(top) {
            return vec![];
        }

        vec![Violation::new(
            self.codes[0].clone(),
            ctx.file_path,
            1,
            1,
            "Copyright notice not present.",
        )]
    }
}
