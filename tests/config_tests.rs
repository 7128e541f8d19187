//! Integration tests for configuration loading and discovery

mod common;

use common::{fixture_path, write_file};
use lintscope::config::{self, QuoteStyle};
use lintscope::{Config, ConfigError, GlobPattern, RuleSet};
use tempfile::TempDir;

// ============================================================================
// INI (setup.cfg / tox.ini / .flake8)
// ============================================================================

#[test]
fn test_load_setup_cfg() {
    let config = assert_ok!(Config::load(fixture_path("setup.cfg")));

    assert_eq!(
        config.select,
        RuleSet::from_codes(["B", "C", "D", "E", "F", "N", "Q", "W", "B9"])
    );
    assert_eq!(config.ignore, RuleSet::from_codes(["E203", "W503", "D1"]));
    assert_eq!(config.max_complexity, 10);
    assert_eq!(config.max_line_length, 88);
    assert_eq!(
        config.exclude,
        vec![
            GlobPattern::new(".git"),
            GlobPattern::new("build"),
            GlobPattern::new("dist")
        ]
    );
    assert!(config.copyright.check);
    assert_eq!(config.copyright.author.as_deref(), Some("Numenta"));
    assert_eq!(config.inline_quotes, QuoteStyle::Double);
}

#[test]
fn test_load_setup_cfg_per_file_ignores() {
    let config = assert_ok!(Config::load(fixture_path("setup.cfg")));

    let globs: Vec<&str> = config
        .per_file_ignores
        .iter()
        .map(|entry| entry.path_glob.as_str())
        .collect();
    assert_eq!(globs, vec!["tests/unit/frameworks/htm/*", "__init__.py", "tests/*"]);

    assert_eq!(config.per_file_ignores[0].extra_ignore, RuleSet::from_codes(["N801"]));
    assert_eq!(
        config.per_file_ignores[2].extra_ignore,
        RuleSet::from_codes(["D1", "E501"])
    );
}

#[test]
fn test_load_records_root_and_source() {
    let path = fixture_path("setup.cfg");
    let config = assert_ok!(Config::load(&path));

    let source = assert_some!(config.source.as_deref());
    assert!(source.ends_with("tests/fixtures/config/setup.cfg"));
    let root = assert_some!(config.root.as_deref());
    assert!(root.ends_with("tests/fixtures/config"));
}

#[test]
fn test_load_without_section_is_error() {
    let result = Config::load(fixture_path("no_section.cfg"));
    assert!(matches!(result, Err(ConfigError::MissingSection { .. })));
}

#[test]
fn test_try_load_without_section_is_none() {
    let result = assert_ok!(Config::try_load(&fixture_path("no_section.cfg")));
    assert!(result.is_none());
}

#[test]
fn test_load_syntax_error() {
    let err = Config::load(fixture_path("bad_syntax.cfg")).unwrap_err();
    assert!(matches!(err, ConfigError::Syntax { line: 1, .. }));
    assert!(err.is_parse_error());
}

#[test]
fn test_load_non_integer_threshold() {
    let err = Config::load(fixture_path("bad_int.cfg")).unwrap_err();
    match &err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "max-line-length"),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
    assert!(err.is_parse_error());
}

#[test]
fn test_load_malformed_per_file_ignores() {
    let err = Config::load(fixture_path("bad_per_file.cfg")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref field, .. } if field == "per-file-ignores"
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = Config::load(fixture_path("does_not_exist.cfg")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(!err.is_parse_error());
}

// ============================================================================
// TOML (pyproject.toml)
// ============================================================================

#[test]
fn test_load_pyproject_toml() {
    let config = assert_ok!(Config::load(fixture_path("pyproject.toml")));

    assert_eq!(config.select, RuleSet::from_codes(["E", "W", "F"]));
    assert_eq!(config.extend_ignore, RuleSet::from_codes(["E203"]));
    assert_eq!(config.max_line_length, 100);

    let scripts = config
        .per_file_ignores
        .iter()
        .find(|entry| entry.path_glob.as_str() == "scripts/*");
    let scripts = assert_some!(scripts, "scripts/* override missing");
    assert_eq!(scripts.extra_ignore, RuleSet::from_codes(["E501"]));

    let init = assert_some!(config
        .per_file_ignores
        .iter()
        .find(|entry| entry.path_glob.as_str() == "__init__.py"));
    assert_eq!(init.extra_ignore, RuleSet::from_codes(["F401"]));
}

#[test]
fn test_parse_toml_invalid() {
    let err = Config::parse_toml("[tool.flake8\nselect = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discover_from_nested_directory() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "tox.ini", "[flake8]\nmax-line-length = 120\n");
    let nested = temp.path().join("pkg").join("sub");
    std::fs::create_dir_all(&nested).unwrap();

    let config = assert_some!(assert_ok!(config::discover(&nested)));
    assert_eq!(config.max_line_length, 120);
    assert_eq!(
        config.root.as_deref(),
        Some(std::path::absolute(temp.path()).unwrap().as_path())
    );
}

#[test]
fn test_discover_prefers_setup_cfg() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "setup.cfg", "[flake8]\nmax-line-length = 90\n");
    write_file(temp.path(), ".flake8", "[flake8]\nmax-line-length = 100\n");

    let config = assert_some!(assert_ok!(config::discover(temp.path())));
    assert_eq!(config.max_line_length, 90);
}

#[test]
fn test_discover_skips_file_without_section() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "setup.cfg", "[metadata]\nname = x\n");
    write_file(temp.path(), ".flake8", "[flake8]\nselect = W\n");

    let config = assert_some!(assert_ok!(config::discover(temp.path())));
    assert_eq!(config.select, RuleSet::from_codes(["W"]));
}

#[test]
fn test_discover_stops_at_broken_candidate() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "setup.cfg", "[flake8]\nmax-complexity = many\n");
    write_file(temp.path(), ".flake8", "[flake8]\nselect = W\n");

    let result = config::discover(temp.path());
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_load_or_discover_prefers_explicit() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "setup.cfg", "[flake8]\nmax-line-length = 90\n");
    let explicit = write_file(temp.path(), "custom.ini", "[flake8]\nmax-line-length = 60\n");

    let config = assert_ok!(config::load_or_discover(Some(&explicit), temp.path()));
    assert_eq!(config.max_line_length, 60);
}

#[test]
fn test_load_or_discover_explicit_missing_is_error() {
    let temp = TempDir::new().unwrap();
    let result = config::load_or_discover(Some(&temp.path().join("gone.cfg")), temp.path());
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
