#![forbid(unsafe_code)]

//! Global rule selection
//!
//! The RuleRegistry answers one question: is a code switched on by the
//! global `select`/`ignore` lists? Both lists hold prefixes, and a code
//! covered by `ignore` is never selected, whatever `select` says.

use crate::config::Config;
use crate::rules::catalog::RuleCatalog;
use crate::types::{RuleCode, RuleSet};
use log::debug;

/// Why a code is or is not selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Covered by `select` and not by `ignore`
    Selected,
    /// Covered by `ignore`
    Ignored,
    /// Not covered by `select`, or not a valid code
    NotSelected,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Selected => "selected",
            Selection::Ignored => "ignored",
            Selection::NotSelected => "not-selected",
        }
    }
}

/// Select/ignore state over a catalog of known codes
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    select: RuleSet,
    ignore: RuleSet,
    catalog: RuleCatalog,
}

impl RuleRegistry {
    /// Create a registry from explicit lists
    pub fn new(select: RuleSet, ignore: RuleSet, catalog: RuleCatalog) -> Self {
        Self {
            select,
            ignore,
            catalog,
        }
    }

    /// Create a registry from configuration
    ///
    /// `extend-select` and `extend-ignore` are folded into their base lists.
    pub fn from_config(config: &Config, catalog: RuleCatalog) -> Self {
        Self::new(
            config.select.union(&config.extend_select),
            config.ignore.union(&config.extend_ignore),
            catalog,
        )
    }

    /// True iff `code` is covered by `select` and by nothing in `ignore`
    ///
    /// Malformed codes are never selected.
    pub fn is_selected(&self, code: &str) -> bool {
        self.explain(code) == Selection::Selected
    }

    /// The selection decision for `code`, with its reason
    pub fn explain(&self, code: &str) -> Selection {
        if RuleCode::new(code).is_none() {
            debug!("'{}' is not a valid rule code", code);
            return Selection::NotSelected;
        }
        if self.ignore.matches(code) {
            return Selection::Ignored;
        }
        if self.select.matches(code) {
            Selection::Selected
        } else {
            Selection::NotSelected
        }
    }

    /// Every catalogued code that is selected
    pub fn active(&self) -> RuleSet {
        self.catalog
            .codes()
            .filter(|code| self.is_selected(code.as_str()))
            .cloned()
            .collect()
    }

    pub fn select(&self) -> &RuleSet {
        &self.select
    }

    pub fn ignore(&self) -> &RuleSet {
        &self.ignore
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::from_config(&Config::default(), RuleCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(select: &[&str], ignore: &[&str]) -> RuleRegistry {
        RuleRegistry::new(
            RuleSet::from_codes(select.iter().copied()),
            RuleSet::from_codes(ignore.iter().copied()),
            RuleCatalog::builtin(),
        )
    }

    #[test]
    fn test_prefix_selection() {
        let registry = registry(&["D1"], &[]);
        assert!(registry.is_selected("D100"));
        assert!(registry.is_selected("D105"));
        assert!(!registry.is_selected("D200"));
        assert!(!registry.is_selected("E501"));
    }

    #[test]
    fn test_ignore_beats_select() {
        let registry = registry(&["E", "E203"], &["E203"]);
        assert!(!registry.is_selected("E203"));
        assert_eq!(registry.explain("E203"), Selection::Ignored);
        assert!(registry.is_selected("E201"));
    }

    #[test]
    fn test_broad_ignore_beats_narrow_select() {
        let registry = registry(&["N812"], &["N8"]);
        assert!(!registry.is_selected("N812"));
    }

    #[test]
    fn test_unknown_and_malformed_codes() {
        let registry = registry(&["E"], &[]);
        assert!(!registry.is_selected("X100"));
        assert!(!registry.is_selected("not a code"));
        assert_eq!(registry.explain(""), Selection::NotSelected);
        // Uncatalogued but covered by a selected prefix
        assert!(registry.is_selected("E999"));
    }

    #[test]
    fn test_active_is_select_minus_ignore() {
        let registry = registry(&["E", "W"], &["E2", "W5"]);
        let active = registry.active();

        assert!(active.contains("E101"));
        assert!(active.contains("W291"));
        assert!(!active.contains("E203"));
        assert!(!active.contains("W503"));
        assert!(!active.contains("F401"));
        assert!(active.iter().all(|c| c.as_str().starts_with('E') || c.as_str().starts_with('W')));
    }

    #[test]
    fn test_from_config_folds_extend_lists() {
        let config = Config::parse(
            "[flake8]\nselect = E\nextend-select = N8\nextend-ignore = E501\n",
        )
        .unwrap();
        let registry = RuleRegistry::from_config(&config, RuleCatalog::builtin());

        assert!(registry.is_selected("N801"));
        assert!(!registry.is_selected("E501"));
        // The default ignore list still applies
        assert!(!registry.is_selected("E121"));
    }

    #[test]
    fn test_default_registry_uses_flake8_defaults() {
        let registry = RuleRegistry::default();
        assert!(registry.is_selected("E501"));
        assert!(registry.is_selected("C901"));
        assert!(!registry.is_selected("W503"));
        assert!(!registry.is_selected("D100"));
    }

    #[test]
    fn test_selection_as_str() {
        assert_eq!(Selection::Selected.as_str(), "selected");
        assert_eq!(Selection::Ignored.as_str(), "ignored");
        assert_eq!(Selection::NotSelected.as_str(), "not-selected");
    }
}
