//! Value parsers for individual flake8 options
//!
//! Every option arrives as raw text (INI values, or TOML values flattened to
//! text). These helpers turn that text into typed values.

use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleCode, RuleSet};
use log::warn;
use std::str::FromStr;

/// Split a comma- and/or whitespace-separated list
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a list of rule codes; malformed entries are logged and skipped
pub fn parse_codes(field: &str, value: &str) -> RuleSet {
    let mut codes = RuleSet::new();
    for item in parse_list(value) {
        match RuleCode::new(item.as_str()) {
            Some(code) => {
                codes.insert(code);
            }
            None => warn!("Ignoring invalid rule code '{}' in {}", item, field),
        }
    }
    codes
}

/// Parse a list of glob patterns
pub fn parse_globs(value: &str) -> Vec<GlobPattern> {
    parse_list(value).into_iter().map(GlobPattern::new).collect()
}

/// Parse a boolean the way configparser does
pub fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not a boolean", other),
        }),
    }
}

/// Parse an integer option
pub fn parse_int<T>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not a valid integer: {}", value.trim(), e),
        })
}

/// One `pattern: codes` entry from `per-file-ignores`, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCodes {
    pub pattern: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Code,
    File,
    Colon,
    Comma,
    Whitespace,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
}

fn tokenize(value: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = value;

    while !rest.is_empty() {
        let (kind, len) = next_token(rest);
        tokens.push(Token {
            kind,
            text: rest[..len].trim(),
        });
        rest = &rest[len..];
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
    });
    tokens
}

/// Classify the token at the start of `s`, returning its kind and byte length
fn next_token(s: &str) -> (TokenKind, usize) {
    // A code is uppercase letters then digits, and must end at whitespace,
    // a comma or the end of input. `E1:` is therefore a file pattern.
    let letters = s.bytes().take_while(u8::is_ascii_uppercase).count();
    if letters > 0 {
        let digits = s[letters..].bytes().take_while(u8::is_ascii_digit).count();
        let end = letters + digits;
        match s[end..].chars().next() {
            None => return (TokenKind::Code, end),
            Some(c) if c == ',' || c.is_whitespace() => return (TokenKind::Code, end),
            _ => {}
        }
    }

    let file_len = s
        .find(|c: char| c == ':' || c == ',' || c.is_whitespace())
        .unwrap_or(s.len());
    if file_len > 0 {
        return (TokenKind::File, file_len);
    }

    let ws_len = s.len() - s.trim_start().len();
    let after_ws = &s[ws_len..];
    for (sep, kind) in [(':', TokenKind::Colon), (',', TokenKind::Comma)] {
        if let Some(tail) = after_ws.strip_prefix(sep) {
            let trailing = tail.len() - tail.trim_start().len();
            return (kind, ws_len + sep.len_utf8() + trailing);
        }
    }

    (TokenKind::Whitespace, ws_len)
}

/// Parse a `per-file-ignores` value
///
/// Grammar: one or more file patterns, a colon, one or more codes. A file
/// pattern after codes starts a new entry. Patterns listed before one colon
/// share its codes.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when a token appears out of place,
/// e.g. two colons in a row or a trailing pattern with no colon.
pub fn parse_per_file_ignores(value: &str) -> Result<Vec<FileCodes>, ConfigError> {
    let mut entries = Vec::new();
    if value.trim().is_empty() {
        return Ok(entries);
    }

    let mut seen_sep = true;
    let mut seen_colon = false;
    let mut filenames: Vec<String> = Vec::new();
    let mut codes: Vec<String> = Vec::new();

    let flush = |filenames: &mut Vec<String>,
                 codes: &mut Vec<String>,
                 entries: &mut Vec<FileCodes>| {
        if !codes.is_empty() {
            for pattern in filenames.iter() {
                entries.push(FileCodes {
                    pattern: pattern.clone(),
                    codes: codes.clone(),
                });
            }
        }
        filenames.clear();
        codes.clear();
    };

    for token in tokenize(value) {
        let unexpected = || ConfigError::InvalidValue {
            field: "per-file-ignores".to_string(),
            message: format!(
                "unexpected token {:?} '{}'; expected 'pattern: CODE,CODE' pairs",
                token.kind, token.text
            ),
        };

        match token.kind {
            TokenKind::Comma | TokenKind::Whitespace => seen_sep = true,
            _ if !seen_colon => match token.kind {
                TokenKind::Colon => {
                    seen_colon = true;
                    seen_sep = true;
                }
                // A bare code before the colon is still a file name
                TokenKind::File | TokenKind::Code if seen_sep => {
                    filenames.push(token.text.to_string());
                    seen_sep = false;
                }
                _ => return Err(unexpected()),
            },
            TokenKind::Eof => {
                flush(&mut filenames, &mut codes, &mut entries);
                seen_sep = true;
                seen_colon = false;
            }
            TokenKind::Code if seen_sep => {
                codes.push(token.text.to_string());
                seen_sep = false;
            }
            TokenKind::File if seen_sep => {
                flush(&mut filenames, &mut codes, &mut entries);
                seen_colon = false;
                filenames.push(token.text.to_string());
                seen_sep = false;
            }
            _ => return Err(unexpected()),
        }
    }

    Ok(entries)
}
