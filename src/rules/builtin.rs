#![forbid(unsafe_code)]

//! Built-in physical-line checks and the set of checks a config enables

use crate::config::Config;
use crate::error::RuleError;
use crate::rules::copyright::CopyrightRule;
use crate::rules::rule::{ExecutionContext, Rule, Violation, position};
use crate::types::RuleCode;

/// E501: physical line longer than the configured maximum
#[derive(Debug)]
pub struct LineLengthRule {
    codes: [RuleCode; 1],
    max_line_length: usize,
}

impl LineLengthRule {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            codes: [RuleCode::known("E501")],
            max_line_length,
        }
    }

    /// `#` and one token (such as a URL in a comment), or a lone token on a
    /// line of a multi-line string, is accepted when the text before that
    /// token is short
    fn is_exempt(&self, line: &str, in_multiline_string: bool) -> bool {
        let chunks: Vec<&str> = line.split_whitespace().collect();
        let single_token = match chunks.as_slice() {
            [_] => in_multiline_string,
            ["#", _] => true,
            _ => false,
        };
        if !single_token {
            return false;
        }

        let last_len = chunks.last().map_or(0, |c| c.chars().count());
        let leading = line.chars().count() - last_len;
        leading + 7 < self.max_line_length
    }
}

const TRIPLE_QUOTES: [&str; 2] = [r#"""""#, "'''"];

/// Track triple-quoted strings across physical lines
///
/// Takes the delimiter open at the start of `line` and returns the one open
/// at its end. Outside a string, scanning stops at a `#` comment. Escapes
/// and single-quoted strings are not tokenized.
fn open_triple_quote(line: &str, mut open: Option<&'static str>) -> Option<&'static str> {
    let mut rest = line;
    loop {
        match open {
            Some(delimiter) => match rest.find(delimiter) {
                Some(at) => {
                    rest = &rest[at + delimiter.len()..];
                    open = None;
                }
                None => return open,
            },
            None => {
                let next = TRIPLE_QUOTES
                    .iter()
                    .filter_map(|d| rest.find(d).map(|at| (at, *d)))
                    .min_by_key(|(at, _)| *at);
                let Some((at, delimiter)) = next else {
                    return None;
                };
                if rest[..at].contains('#') {
                    return None;
                }
                rest = &rest[at + delimiter.len()..];
                open = Some(delimiter);
            }
        }
    }
}

impl Rule for LineLengthRule {
    fn codes(&self) -> &[RuleCode] {
        &self.codes
    }

    fn description(&self) -> &str {
        "line too long"
    }

    fn check(&self, ctx: &ExecutionContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut open_string = None;

        for (idx, raw) in ctx.content.lines().enumerate() {
            let line = raw.trim_end();
            let open_before = open_string;
            open_string = open_triple_quote(line, open_before);
            let in_multiline_string = open_before.is_some() || open_string.is_some();

            let length = line.chars().count();
            if length <= self.max_line_length || self.is_exempt(line, in_multiline_string) {
                continue;
            }

            violations.push(Violation::new(
                self.codes[0].clone(),
                ctx.file_path,
                position(idx),
                position(self.max_line_length),
                format!(
                    "line too long ({} > {} characters)",
                    length, self.max_line_length
                ),
            ));
        }

        violations
    }
}

/// W291/W293: whitespace at the end of a line
#[derive(Debug)]
pub struct TrailingWhitespaceRule {
    codes: [RuleCode; 2],
}

impl TrailingWhitespaceRule {
    pub fn new() -> Self {
        Self {
            codes: [RuleCode::known("W291"), RuleCode::known("W293")],
        }
    }
}

impl Default for TrailingWhitespaceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TrailingWhitespaceRule {
    fn codes(&self) -> &[RuleCode] {
        &self.codes
    }

    fn description(&self) -> &str {
        "trailing whitespace"
    }

    fn check(&self, ctx: &ExecutionContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (idx, raw) in ctx.content.lines().enumerate() {
            let line = raw.trim_end_matches(['\r', '\x0c']);
            let stripped = line.trim_end_matches([' ', '\t', '\x0b']);
            if stripped.len() == line.len() {
                continue;
            }

            let violation = if stripped.is_empty() {
                Violation::new(
                    self.codes[1].clone(),
                    ctx.file_path,
                    position(idx),
                    1,
                    "blank line contains whitespace",
                )
            } else {
                Violation::new(
                    self.codes[0].clone(),
                    ctx.file_path,
                    position(idx),
                    position(stripped.chars().count()),
                    "trailing whitespace",
                )
            };
            violations.push(violation);
        }

        violations
    }
}

/// Instantiate every check the configuration can use
///
/// The copyright check is only included when `copyright-check` is on.
///
/// # Errors
///
/// Returns `RuleError::InvalidRegex` if the copyright pattern does not
/// compile.
pub fn builtin_rules(config: &Config) -> Result<Vec<Box<dyn Rule>>, RuleError> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(LineLengthRule::new(config.max_line_length)),
        Box::new(TrailingWhitespaceRule::new()),
    ];

    if config.copyright.check {
        rules.push(Box::new(CopyrightRule::from_settings(&config.copyright)?));
    }

    Ok(rules)
}
