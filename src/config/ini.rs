//! Minimal INI reader for setup.cfg, tox.ini and .flake8
//!
//! Follows the configparser dialect flake8 reads: `key = value` or
//! `key: value`, indented continuation lines, full-line `#`/`;` comments and
//! no interpolation.

use crate::error::ConfigError;
use std::collections::BTreeMap;

/// A parsed INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

/// One `[name]` section and its options, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<IniEntry>,
}

/// A single option with the line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

impl IniDocument {
    /// Parse INI text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Syntax` for an option outside any section, a
    /// duplicate section or option, an unterminated section header, or a
    /// line that is not an assignment.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut doc = IniDocument::default();
        // Whether the last option can still take continuation lines
        let mut open_value = false;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(|c: char| c.is_whitespace());

            if indented && open_value {
                if let Some(entry) = doc
                    .sections
                    .last_mut()
                    .and_then(|section| section.entries.last_mut())
                {
                    if !entry.value.is_empty() {
                        entry.value.push('\n');
                    }
                    entry.value.push_str(trimmed);
                }
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| ConfigError::Syntax {
                    line: line_no,
                    message: format!("unterminated section header '{}'", trimmed),
                })?;
                let name = name.trim().to_string();
                if doc.sections.iter().any(|s| s.name == name) {
                    return Err(ConfigError::Syntax {
                        line: line_no,
                        message: format!("duplicate section [{}]", name),
                    });
                }
                doc.sections.push(IniSection {
                    name,
                    entries: Vec::new(),
                });
                open_value = false;
                continue;
            }

            let Some(split_at) = trimmed.find(['=', ':']) else {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("expected 'key = value', found '{}'", trimmed),
                });
            };

            let key = normalize_key(&trimmed[..split_at]);
            let value = trimmed[split_at + 1..].trim().to_string();

            if key.is_empty() {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: "option name is empty".to_string(),
                });
            }

            let Some(section) = doc.sections.last_mut() else {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("option '{}' appears before any section header", key),
                });
            };

            if section.entries.iter().any(|e| e.key == key) {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("duplicate option '{}' in section [{}]", key, section.name),
                });
            }

            section.entries.push(IniEntry {
                key,
                value,
                line: line_no,
            });
            open_value = true;
        }

        Ok(doc)
    }

    /// Look up a section by exact name
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Section names in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}

impl IniSection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[IniEntry] {
        &self.entries
    }

    /// Options as a key → value map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }
}

/// Lower-case an option name and spell it with dashes
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}
