//! The `[flake8]` configuration model
//!
//! A `Config` is built once from an INI or TOML file and never mutated
//! afterwards. Missing keys take flake8's defaults.

use crate::config::ini::{IniDocument, normalize_key};
use crate::config::options::{
    parse_bool, parse_codes, parse_globs, parse_int, parse_per_file_ignores,
};
use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleCode, RuleSet};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the INI section (and TOML table) holding the options
pub const SECTION: &str = "flake8";

pub const DEFAULT_SELECT: &[&str] = &["E", "F", "W", "C90"];
pub const DEFAULT_IGNORE: &[&str] = &[
    "E121", "E123", "E126", "E226", "E24", "E704", "W503", "W504",
];
pub const DEFAULT_EXCLUDE: &[&str] = &[
    ".svn",
    "CVS",
    ".bzr",
    ".hg",
    ".git",
    "__pycache__",
    ".tox",
    ".nox",
    ".eggs",
    "*.egg",
];
pub const DEFAULT_FILENAME: &[&str] = &["*.py"];
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;
pub const DEFAULT_MAX_COMPLEXITY: i64 = -1;
pub const DEFAULT_COPYRIGHT_REGEXP: &str =
    r"Copyright\s+(\(C\)\s+)?\d{4}([-,]\d{4})*\s+%(author)s";

const KNOWN_KEYS: &[&str] = &[
    "select",
    "extend-select",
    "ignore",
    "extend-ignore",
    "max-line-length",
    "max-complexity",
    "exclude",
    "extend-exclude",
    "filename",
    "per-file-ignores",
    "copyright-check",
    "copyright-author",
    "copyright-regexp",
    "copyright-min-file-size",
    "inline-quotes",
];

/// Resolved flake8 configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Codes (or prefixes) to report
    pub select: RuleSet,

    /// Codes added to `select` without replacing it
    pub extend_select: RuleSet,

    /// Codes (or prefixes) never to report; wins over `select`
    pub ignore: RuleSet,

    /// Codes added to `ignore` without replacing it
    pub extend_ignore: RuleSet,

    pub max_line_length: usize,

    /// McCabe threshold; -1 disables the check
    pub max_complexity: i64,

    pub exclude: Vec<GlobPattern>,

    pub extend_exclude: Vec<GlobPattern>,

    /// Patterns selecting which files a directory walk checks
    pub filename: Vec<GlobPattern>,

    /// Per-file exemptions, in declaration order
    pub per_file_ignores: Vec<PerFileOverride>,

    pub copyright: CopyrightSettings,

    pub inline_quotes: QuoteStyle,

    /// Directory the configuration was loaded from; relative patterns are
    /// anchored here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// The file the configuration came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            select: RuleSet::from_codes(DEFAULT_SELECT.iter().copied()),
            extend_select: RuleSet::new(),
            ignore: RuleSet::from_codes(DEFAULT_IGNORE.iter().copied()),
            extend_ignore: RuleSet::new(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_complexity: DEFAULT_MAX_COMPLEXITY,
            exclude: DEFAULT_EXCLUDE.iter().map(|p| GlobPattern::new(*p)).collect(),
            extend_exclude: Vec::new(),
            filename: DEFAULT_FILENAME.iter().map(|p| GlobPattern::new(*p)).collect(),
            per_file_ignores: Vec::new(),
            copyright: CopyrightSettings::default(),
            inline_quotes: QuoteStyle::default(),
            root: None,
            source: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// Files ending in `.toml` are read as TOML, everything else as INI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSection` if the file has no flake8
    /// section, plus any read or parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::try_load(path)?.ok_or_else(|| ConfigError::MissingSection {
            section: SECTION.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Load configuration from a file that may not contain a flake8 section
    ///
    /// Returns `Ok(None)` when the file parses but has no such section.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = fs::read_to_string(path)?;
        let options = if is_toml(path) {
            toml_options(&content)?
        } else {
            ini_options(&content)?
        };

        let Some(options) = options else {
            return Ok(None);
        };

        let mut config = Self::from_options(&options)?;
        let absolute = std::path::absolute(path)?;
        config.root = absolute.parent().map(Path::to_path_buf);
        config.source = Some(absolute);
        Ok(Some(config))
    }

    /// Parse configuration from INI text
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let options = ini_options(s)?.ok_or_else(|| ConfigError::MissingSection {
            section: SECTION.to_string(),
            path: PathBuf::from("<input>"),
        })?;
        Self::from_options(&options)
    }

    /// Parse configuration from TOML text (`[tool.flake8]` or `[flake8]`)
    pub fn parse_toml(s: &str) -> Result<Self, ConfigError> {
        let options = toml_options(s)?.ok_or_else(|| ConfigError::MissingSection {
            section: format!("tool.{}", SECTION),
            path: PathBuf::from("<input>"),
        })?;
        Self::from_options(&options)
    }

    /// Build a configuration from normalized option text
    pub fn from_options(options: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for key in options.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                debug!("Ignoring unrecognized option '{}'", key);
            }
        }

        let get = |key: &str| options.get(key).map(String::as_str);

        if let Some(value) = get("select") {
            config.select = parse_codes("select", value);
        }
        if let Some(value) = get("extend-select") {
            config.extend_select = parse_codes("extend-select", value);
        }
        if let Some(value) = get("ignore") {
            config.ignore = parse_codes("ignore", value);
        }
        if let Some(value) = get("extend-ignore") {
            config.extend_ignore = parse_codes("extend-ignore", value);
        }
        if let Some(value) = get("max-line-length") {
            config.max_line_length = parse_int("max-line-length", value)?;
        }
        if let Some(value) = get("max-complexity") {
            config.max_complexity = parse_int("max-complexity", value)?;
        }
        if let Some(value) = get("exclude") {
            config.exclude = parse_globs(value);
        }
        if let Some(value) = get("extend-exclude") {
            config.extend_exclude = parse_globs(value);
        }
        if let Some(value) = get("filename") {
            config.filename = parse_globs(value);
        }
        if let Some(value) = get("per-file-ignores") {
            config.per_file_ignores = parse_per_file_ignores(value)?
                .into_iter()
                .map(|entry| PerFileOverride {
                    path_glob: GlobPattern::new(entry.pattern),
                    extra_ignore: entry
                        .codes
                        .iter()
                        .filter_map(|code| {
                            let parsed = RuleCode::new(code.as_str());
                            if parsed.is_none() {
                                warn!("Ignoring invalid rule code '{}' in per-file-ignores", code);
                            }
                            parsed
                        })
                        .collect(),
                })
                .collect();
        }
        if let Some(value) = get("copyright-check") {
            config.copyright.check = parse_bool("copyright-check", value)?;
        }
        if let Some(value) = get("copyright-author") {
            let author = value.trim();
            config.copyright.author = (!author.is_empty()).then(|| author.to_string());
        }
        if let Some(value) = get("copyright-regexp") {
            config.copyright.regexp = value.trim().to_string();
        }
        if let Some(value) = get("copyright-min-file-size") {
            config.copyright.min_file_size = parse_int("copyright-min-file-size", value)?;
        }
        if let Some(value) = get("inline-quotes") {
            config.inline_quotes = QuoteStyle::parse(value)?;
        }

        Ok(config)
    }

    /// `exclude` followed by `extend-exclude`
    pub fn all_excludes(&self) -> Vec<GlobPattern> {
        self.exclude
            .iter()
            .chain(self.extend_exclude.iter())
            .cloned()
            .collect()
    }

    /// Whether McCabe complexity checking is switched on
    pub fn complexity_enabled(&self) -> bool {
        self.max_complexity >= 0
    }
}

/// A per-file exemption: files matching `path_glob` additionally ignore
/// every code covered by `extra_ignore`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerFileOverride {
    pub path_glob: GlobPattern,
    pub extra_ignore: RuleSet,
}

impl PerFileOverride {
    pub fn new(path_glob: impl Into<GlobPattern>, extra_ignore: RuleSet) -> Self {
        Self {
            path_glob: path_glob.into(),
            extra_ignore,
        }
    }
}

/// Settings for the copyright notice check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyrightSettings {
    pub check: bool,
    pub author: Option<String>,
    /// Regular expression; `%(author)s` is replaced with the author
    pub regexp: String,
    /// Files shorter than this are not checked; the header window grows to
    /// this size when it exceeds 1024 bytes
    pub min_file_size: usize,
}

impl Default for CopyrightSettings {
    fn default() -> Self {
        Self {
            check: false,
            author: None,
            regexp: DEFAULT_COPYRIGHT_REGEXP.to_string(),
            min_file_size: 0,
        }
    }
}

impl CopyrightSettings {
    /// The regular expression with the author substituted in
    ///
    /// The author is matched literally; without one any text is accepted.
    pub fn pattern(&self) -> String {
        let author = match &self.author {
            Some(author) => regex::escape(author),
            None => ".*".to_string(),
        };
        self.regexp.replace("%(author)s", &author)
    }
}

/// Preferred quote character for inline strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim() {
            "'" | "single" => Ok(QuoteStyle::Single),
            "\"" | "double" => Ok(QuoteStyle::Double),
            other => Err(ConfigError::InvalidValue {
                field: "inline-quotes".to_string(),
                message: format!("expected ', \", single or double; found '{}'", other),
            }),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}

fn ini_options(content: &str) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
    let doc = IniDocument::parse(content)?;
    Ok(doc.section(SECTION).map(|section| section.to_map()))
}

fn toml_options(content: &str) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
    let doc: toml::Table = toml::from_str(content)?;

    let table = doc
        .get("tool")
        .and_then(|tool| tool.get(SECTION))
        .or_else(|| doc.get(SECTION));

    let Some(table) = table else {
        return Ok(None);
    };
    let table = table.as_table().ok_or_else(|| ConfigError::InvalidValue {
        field: SECTION.to_string(),
        message: "expected a table".to_string(),
    })?;

    let mut options = BTreeMap::new();
    for (key, value) in table {
        let key = normalize_key(key);
        let text = if key == "per-file-ignores" {
            per_file_ignores_from_toml(value)?
        } else {
            toml_value_to_text(&key, value)?
        };
        options.insert(key, text);
    }
    Ok(Some(options))
}

fn toml_value_to_text(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| toml_value_to_text(key, item))
            .collect::<Result<Vec<_>, _>>()
            .map(|parts| parts.join("\n")),
        other => Err(ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("unsupported TOML type '{}'", other.type_str()),
        }),
    }
}

/// Accepts the string/array form or a `{ "glob" = codes }` table
fn per_file_ignores_from_toml(value: &toml::Value) -> Result<String, ConfigError> {
    let key = "per-file-ignores";
    let toml::Value::Table(table) = value else {
        return toml_value_to_text(key, value);
    };

    let mut lines = Vec::new();
    for (pattern, codes) in table {
        let codes = toml_value_to_text(key, codes)?.replace('\n', ",");
        lines.push(format!("{}: {}", pattern, codes));
    }
    Ok(lines.join("\n"))
}
