//! Integration tests for rule selection and per-file resolution
//!
//! These exercise the registry, path matcher and resolver together, starting
//! from configuration text the way a project would write it.

mod common;

use lintscope::rules::Selection;
use lintscope::{Config, PathMatcher, PerFileOverride, Resolver, RuleCatalog, RuleRegistry, RuleSet};
use std::path::Path;

const HTM_CONFIG: &str = r#"
[flake8]
select = E,W
ignore = E203
per-file-ignores =
    tests/unit/frameworks/htm/*: N801
"#;

fn resolver(ini: &str) -> Resolver {
    Resolver::from_config(&assert_ok!(Config::parse(ini)))
}

/// `select - ignore` computed directly from the catalog
fn expected_baseline(select: &[&str], ignore: &[&str]) -> RuleSet {
    let select = RuleSet::from_codes(select.iter().copied());
    let ignore = RuleSet::from_codes(ignore.iter().copied());
    RuleCatalog::builtin()
        .codes()
        .filter(|code| select.matches(code.as_str()) && !ignore.matches(code.as_str()))
        .cloned()
        .collect()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_ignore_beats_select_for_every_ignored_code() {
    let registry = RuleRegistry::new(
        RuleSet::from_codes(["E", "W", "E501", "W291"]),
        RuleSet::from_codes(["E501", "W291", "E2"]),
        RuleCatalog::builtin(),
    );

    for code in ["E501", "W291", "E203", "E231"] {
        assert!(!registry.is_selected(code), "{} should be ignored", code);
        assert_eq!(registry.explain(code), Selection::Ignored);
    }
    assert!(registry.is_selected("E302"));
    assert!(registry.is_selected("W292"));
}

#[test]
fn test_prefix_selection() {
    let config = assert_ok!(Config::parse("[flake8]\nselect = E1,W6\nignore =\n"));
    let registry = RuleRegistry::from_config(&config, RuleCatalog::builtin());

    assert!(registry.is_selected("E101"));
    assert!(registry.is_selected("E131"));
    assert!(registry.is_selected("W605"));
    assert!(!registry.is_selected("E201"));
    assert!(!registry.is_selected("W291"));
    assert_eq!(registry.explain("F401"), Selection::NotSelected);
}

#[test]
fn test_extend_lists_fold_into_selection() {
    let config = assert_ok!(Config::parse(
        "[flake8]\nselect = E\nextend-select = N8\nignore =\nextend-ignore = E501\n"
    ));
    let registry = RuleRegistry::from_config(&config, RuleCatalog::builtin());

    assert!(registry.is_selected("N801"));
    assert!(registry.is_selected("E302"));
    assert!(!registry.is_selected("E501"));
}

#[test]
fn test_malformed_code_is_never_selected() {
    let registry = RuleRegistry::new(
        RuleSet::from_codes(["E"]),
        RuleSet::new(),
        RuleCatalog::builtin(),
    );

    assert!(!registry.is_selected("e501"));
    assert!(!registry.is_selected("501"));
    assert!(!registry.is_selected(""));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_unmatched_file_gets_select_minus_ignore() {
    let resolver = resolver(HTM_CONFIG);
    let expected = expected_baseline(&["E", "W"], &["E203"]);

    for path in ["src/app.py", "setup.py", "tests/unit/other/x.py"] {
        assert_eq!(resolver.resolve(Path::new(path)), expected, "{}", path);
    }
    assert_eq!(resolver.baseline(), &expected);
}

#[test]
fn test_htm_override_example() {
    let resolver = resolver(HTM_CONFIG);
    let active = resolver.resolve(Path::new("tests/unit/frameworks/htm/x.py"));

    assert!(!active.is_empty());
    assert!(active.iter().all(|code| {
        let code = code.as_str();
        code.starts_with('E') || code.starts_with('W')
    }));
    assert!(!active.contains("E203"));
    assert!(!active.contains("N801"));
    assert!(active.contains("E501"));
    assert!(active.contains("W291"));
}

#[test]
fn test_override_removes_selected_codes() {
    let resolver = resolver(
        concat!(
            "[flake8]\nselect = E,W,F\nignore =\nper-file-ignores =\n",
            "    __init__.py: F401\n    tests/*: E5,W2\n",
        ),
    );

    let init = resolver.resolve(Path::new("pkg/__init__.py"));
    assert!(!init.contains("F401"));
    assert!(init.contains("F841"));

    let test = resolver.resolve(Path::new("tests/test_x.py"));
    assert!(!test.contains("E501"));
    assert!(!test.contains("E502"));
    assert!(!test.contains("W291"));
    assert!(test.contains("W391"));
    assert!(test.contains("F401"));
}

#[test]
fn test_overlapping_overrides_combine_by_union() {
    let resolver = resolver(
        concat!(
            "[flake8]\nselect = E,W\nignore =\nper-file-ignores =\n",
            "    tests/*: E501\n    *_test.py: W291\n",
        ),
    );

    let both = resolver.resolve(Path::new("tests/api_test.py"));
    assert!(!both.contains("E501"));
    assert!(!both.contains("W291"));

    let only_dir = resolver.resolve(Path::new("tests/api.py"));
    assert!(!only_dir.contains("E501"));
    assert!(only_dir.contains("W291"));

    let effective = resolver.effective(Path::new("tests/api_test.py"));
    assert_eq!(effective.overrides.len(), 2);
}

#[test]
fn test_resolve_is_idempotent() {
    let resolver = resolver(HTM_CONFIG);
    let path = Path::new("tests/unit/frameworks/htm/x.py");

    let first = resolver.resolve(path);
    let second = resolver.resolve(path);
    assert_eq!(first, second);
    assert_eq!(resolver.effective(path), resolver.effective(path));
}

#[test]
fn test_default_config_resolves_to_defaults() {
    let resolver = Resolver::from_config(&Config::default());
    let expected = expected_baseline(
        &["E", "F", "W", "C90"],
        &["E121", "E123", "E126", "E226", "E24", "E704", "W503", "W504"],
    );

    assert_eq!(resolver.resolve(Path::new("anything/at/all.py")), expected);
    assert!(!expected.contains("N801"));
    assert!(expected.contains("C901"));
}

#[test]
fn test_malformed_override_glob_is_noop() {
    let resolver = resolver(
        concat!(
            "[flake8]\nselect = E\nignore =\nper-file-ignores =\n",
            "    tests/[*: E501\n    docs/*: E501\n",
        ),
    );

    assert!(resolver.resolve(Path::new("tests/[x.py")).contains("E501"));
    assert!(!resolver.resolve(Path::new("docs/x.py")).contains("E501"));
}

#[test]
fn test_uncatalogued_override_code_is_noop() {
    let resolver = resolver(
        "[flake8]\nselect = E\nignore =\nper-file-ignores =\n    tests/*: ZZ999\n",
    );

    assert_eq!(resolver.resolve(Path::new("tests/a.py")), resolver.baseline().clone());
}

#[test]
fn test_is_active_answers_for_uncatalogued_codes() {
    let resolver = resolver(
        "[flake8]\nselect = E,X\nignore =\nper-file-ignores =\n    legacy/*: X1\n",
    );

    assert!(resolver.is_active(Path::new("src/a.py"), "X100"));
    assert!(!resolver.is_active(Path::new("legacy/a.py"), "X100"));
    assert!(!resolver.is_active(Path::new("src/a.py"), "F401"));
}

#[test]
fn test_absolute_paths_resolve_against_root() {
    let config = Config {
        root: Some("/project".into()),
        ..assert_ok!(Config::parse(
            "[flake8]\nselect = E\nignore =\nper-file-ignores =\n    tests/*: E501\n"
        ))
    };
    let resolver = Resolver::from_config(&config);

    assert!(!resolver.resolve(Path::new("/project/tests/a.py")).contains("E501"));
    assert!(resolver.resolve(Path::new("/project/src/a.py")).contains("E501"));
}

#[test]
fn test_resolver_built_from_parts() {
    let overrides = vec![PerFileOverride::new("gen/*", RuleSet::from_codes(["E"]))];
    let matcher = PathMatcher::new(&overrides, &[], &[], None);
    let registry = RuleRegistry::new(
        RuleSet::from_codes(["E", "W"]),
        RuleSet::new(),
        RuleCatalog::builtin(),
    );
    let resolver = Resolver::new(registry, matcher, 79, -1);

    let generated = resolver.resolve(Path::new("gen/models.py"));
    assert!(generated.iter().all(|code| code.as_str().starts_with('W')));
    assert!(!generated.is_empty());
}

#[test]
fn test_parent_segments_do_not_bypass_overrides() {
    let config = Config {
        root: Some("/project".into()),
        ..assert_ok!(Config::parse(
            concat!(
                "[flake8]\nselect = E\nignore =\nexclude = build/gen\nper-file-ignores =\n",
                "    tests/*: E501\n",
            )
        ))
    };
    let resolver = Resolver::from_config(&config);

    let direct = resolver.effective(Path::new("/project/tests/a.py"));
    let dotted = resolver.effective(Path::new("/project/pkg/../tests/./a.py"));
    assert_eq!(dotted.path.as_str(), "tests/a.py");
    assert_eq!(dotted, direct);
    assert!(!dotted.active.contains("E501"));

    assert!(!resolver.is_active(Path::new("/project/pkg/../tests/a.py"), "E501"));
    assert!(!resolver.resolve(Path::new("pkg/../tests/a.py")).contains("E501"));
    assert!(resolver.effective(Path::new("/project/src/../build/gen/x.py")).excluded);
}
