#![forbid(unsafe_code)]

//! The universe of known concrete rule codes
//!
//! Selection works on prefixes; the catalog is what turns a prefix decision
//! such as "E but not E2" into a concrete list of codes.

use crate::error::RuleError;
use crate::types::RuleCode;
use std::collections::BTreeMap;

/// Codes shipped with flake8 and the plugins its configuration usually names
const BUILTIN: &[(&str, &str)] = &[
    // pycodestyle
    ("E101", "indentation contains mixed spaces and tabs"),
    ("E111", "indentation is not a multiple of four"),
    ("E112", "expected an indented block"),
    ("E113", "unexpected indentation"),
    ("E114", "indentation is not a multiple of four (comment)"),
    ("E115", "expected an indented block (comment)"),
    ("E116", "unexpected indentation (comment)"),
    ("E117", "over-indented"),
    ("E121", "continuation line under-indented for hanging indent"),
    ("E122", "continuation line missing indentation or outdented"),
    ("E123", "closing bracket does not match indentation of opening bracket's line"),
    ("E124", "closing bracket does not match visual indentation"),
    ("E125", "continuation line with same indent as next logical line"),
    ("E126", "continuation line over-indented for hanging indent"),
    ("E127", "continuation line over-indented for visual indent"),
    ("E128", "continuation line under-indented for visual indent"),
    ("E129", "visually indented line with same indent as next logical line"),
    ("E131", "continuation line unaligned for hanging indent"),
    ("E133", "closing bracket is missing indentation"),
    ("E201", "whitespace after '('"),
    ("E202", "whitespace before ')'"),
    ("E203", "whitespace before ':'"),
    ("E211", "whitespace before '('"),
    ("E221", "multiple spaces before operator"),
    ("E222", "multiple spaces after operator"),
    ("E223", "tab before operator"),
    ("E224", "tab after operator"),
    ("E225", "missing whitespace around operator"),
    ("E226", "missing whitespace around arithmetic operator"),
    ("E227", "missing whitespace around bitwise or shift operator"),
    ("E228", "missing whitespace around modulo operator"),
    ("E231", "missing whitespace after ','"),
    ("E241", "multiple spaces after ','"),
    ("E242", "tab after ','"),
    ("E251", "unexpected spaces around keyword / parameter equals"),
    ("E252", "missing whitespace around parameter equals"),
    ("E261", "at least two spaces before inline comment"),
    ("E262", "inline comment should start with '# '"),
    ("E265", "block comment should start with '# '"),
    ("E266", "too many leading '#' for block comment"),
    ("E271", "multiple spaces after keyword"),
    ("E272", "multiple spaces before keyword"),
    ("E273", "tab after keyword"),
    ("E274", "tab before keyword"),
    ("E275", "missing whitespace after keyword"),
    ("E301", "expected 1 blank line, found 0"),
    ("E302", "expected 2 blank lines, found 0"),
    ("E303", "too many blank lines"),
    ("E304", "blank lines found after function decorator"),
    ("E305", "expected 2 blank lines after end of function or class"),
    ("E306", "expected 1 blank line before a nested definition"),
    ("E401", "multiple imports on one line"),
    ("E402", "module level import not at top of file"),
    ("E501", "line too long"),
    ("E502", "the backslash is redundant between brackets"),
    ("E701", "multiple statements on one line (colon)"),
    ("E702", "multiple statements on one line (semicolon)"),
    ("E703", "statement ends with a semicolon"),
    ("E704", "multiple statements on one line (def)"),
    ("E711", "comparison to None should be 'if cond is None:'"),
    ("E712", "comparison to True should be 'if cond is True:' or 'if cond:'"),
    ("E713", "test for membership should be 'not in'"),
    ("E714", "test for object identity should be 'is not'"),
    ("E721", "do not compare types, use 'isinstance()'"),
    ("E722", "do not use bare 'except'"),
    ("E731", "do not assign a lambda expression, use a def"),
    ("E741", "ambiguous variable name 'l', 'O', or 'I'"),
    ("E742", "ambiguous class definition 'l', 'O', or 'I'"),
    ("E743", "ambiguous function definition 'l', 'O', or 'I'"),
    ("E901", "SyntaxError or IndentationError"),
    ("E902", "IOError"),
    ("W191", "indentation contains tabs"),
    ("W291", "trailing whitespace"),
    ("W292", "no newline at end of file"),
    ("W293", "blank line contains whitespace"),
    ("W391", "blank line at end of file"),
    ("W503", "line break before binary operator"),
    ("W504", "line break after binary operator"),
    ("W505", "doc line too long"),
    ("W605", "invalid escape sequence"),
    // pyflakes
    ("F401", "module imported but unused"),
    ("F402", "import shadowed by loop variable"),
    ("F403", "'from module import *' used; unable to detect undefined names"),
    ("F404", "late __future__ import"),
    ("F405", "name may be undefined, or defined from star imports"),
    ("F541", "f-string is missing placeholders"),
    ("F601", "dictionary key repeated with different values"),
    ("F632", "use ==/!= to compare constant literals"),
    ("F811", "redefinition of unused name"),
    ("F821", "undefined name"),
    ("F841", "local variable is assigned to but never used"),
    ("F901", "'raise NotImplemented' should be 'raise NotImplementedError'"),
    // mccabe
    ("C901", "function is too complex"),
    // flake8-copyright
    ("C801", "copyright notice not present"),
    // pep8-naming
    ("N801", "class names should use CapWords convention"),
    ("N802", "function name should be lowercase"),
    ("N803", "argument name should be lowercase"),
    ("N804", "first argument of a classmethod should be named 'cls'"),
    ("N805", "first argument of a method should be named 'self'"),
    ("N806", "variable in function should be lowercase"),
    ("N807", "function name should not start and end with '__'"),
    ("N811", "constant imported as non constant"),
    ("N812", "lowercase imported as non lowercase"),
    ("N813", "camelcase imported as lowercase"),
    ("N814", "camelcase imported as constant"),
    ("N815", "mixedCase variable in class scope"),
    ("N816", "mixedCase variable in global scope"),
    ("N817", "camelcase imported as acronym"),
    ("N818", "exception name should be named with an Error suffix"),
    // pydocstyle
    ("D100", "Missing docstring in public module"),
    ("D101", "Missing docstring in public class"),
    ("D102", "Missing docstring in public method"),
    ("D103", "Missing docstring in public function"),
    ("D104", "Missing docstring in public package"),
    ("D105", "Missing docstring in magic method"),
    ("D106", "Missing docstring in public nested class"),
    ("D107", "Missing docstring in __init__"),
    ("D200", "One-line docstring should fit on one line with quotes"),
    ("D201", "No blank lines allowed before function docstring"),
    ("D202", "No blank lines allowed after function docstring"),
    ("D203", "1 blank line required before class docstring"),
    ("D204", "1 blank line required after class docstring"),
    ("D205", "1 blank line required between summary line and description"),
    ("D206", "Docstring should be indented with spaces, not tabs"),
    ("D207", "Docstring is under-indented"),
    ("D208", "Docstring is over-indented"),
    ("D209", "Multi-line docstring closing quotes should be on a separate line"),
    ("D210", "No whitespaces allowed surrounding docstring text"),
    ("D211", "No blank lines allowed before class docstring"),
    ("D212", "Multi-line docstring summary should start at the first line"),
    ("D213", "Multi-line docstring summary should start at the second line"),
    ("D300", "Use \"\"\"triple double quotes\"\"\""),
    ("D301", "Use r\"\"\" if any backslashes in a docstring"),
    ("D400", "First line should end with a period"),
    ("D401", "First line should be in imperative mood"),
    ("D402", "First line should not be the function's signature"),
    ("D403", "First word of the first line should be properly capitalized"),
    ("D404", "First word of the docstring should not be 'This'"),
    ("D412", "No blank lines allowed between a section header and its content"),
    ("D415", "First line should end with a period, question mark, or exclamation point"),
    ("D417", "Missing argument descriptions in the docstring"),
    // flake8-quotes
    ("Q000", "Remove bad quotes"),
    ("Q001", "Remove bad quotes from multiline string"),
    ("Q002", "Remove bad quotes from docstring"),
    ("Q003", "Change outer quotes to avoid escaping inner quotes"),
    // flake8-bugbear
    ("B001", "Do not use bare 'except:'"),
    ("B002", "Python does not support the unary prefix increment"),
    ("B003", "Assigning to os.environ does not clear the environment"),
    ("B004", "Using hasattr(x, '__call__') to test if x is callable is unreliable"),
    ("B005", "Using .strip() with multi-character strings is misleading"),
    ("B006", "Do not use mutable data structures for argument defaults"),
    ("B007", "Loop control variable not used within the loop body"),
    ("B008", "Do not perform function calls in argument defaults"),
    ("B009", "Do not call getattr with a constant attribute value"),
    ("B010", "Do not call setattr with a constant attribute value"),
    ("B011", "Do not call assert False"),
    ("B012", "return/continue/break inside finally blocks cause exceptions to be silenced"),
    ("B013", "A length-one tuple literal is redundant in an except clause"),
    ("B014", "Redundant exception types in except clause"),
    ("B015", "Pointless comparison"),
    ("B016", "Cannot raise a literal"),
    ("B017", "assertRaises(Exception) should be considered evil"),
    ("B018", "Found useless expression"),
    ("B901", "Using 'return x' in a generator function"),
    ("B902", "Invalid first argument used for method"),
    ("B903", "Data class should be immutable or use __slots__"),
    ("B950", "Line too long"),
];

/// Registry of concrete codes and their descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: BTreeMap<RuleCode, String>,
}

impl RuleCatalog {
    /// A catalog with no codes
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The built-in catalog
    pub fn builtin() -> Self {
        let rules = BUILTIN
            .iter()
            .map(|(code, description)| (RuleCode::known(code), description.to_string()))
            .collect();
        Self { rules }
    }

    /// Add a code (or replace its description)
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidCode` if `code` is malformed.
    pub fn register(
        &mut self,
        code: &str,
        description: impl Into<String>,
    ) -> Result<(), RuleError> {
        let code = RuleCode::new(code).ok_or_else(|| RuleError::InvalidCode(code.to_string()))?;
        self.rules.insert(code, description.into());
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rules.keys().any(|c| c.as_str() == code)
    }

    /// Description of a catalogued code
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NotFound` for codes outside the catalog.
    pub fn describe(&self, code: &str) -> Result<&str, RuleError> {
        self.rules
            .iter()
            .find(|(c, _)| c.as_str() == code)
            .map(|(_, description)| description.as_str())
            .ok_or_else(|| RuleError::NotFound(code.to_string()))
    }

    /// All codes, sorted
    pub fn codes(&self) -> impl Iterator<Item = &RuleCode> {
        self.rules.keys()
    }

    /// Codes paired with their descriptions, sorted by code
    pub fn iter(&self) -> impl Iterator<Item = (&RuleCode, &str)> {
        self.rules.iter().map(|(code, d)| (code, d.as_str()))
    }

    /// Codes that `prefix` covers
    pub fn matching<'a>(&'a self, prefix: &'a RuleCode) -> impl Iterator<Item = &'a RuleCode> {
        self.rules.keys().filter(move |code| prefix.covers(code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes_are_well_formed_and_unique() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.len(), BUILTIN.len());
        for (code, _) in BUILTIN {
            assert!(RuleCode::new(*code).is_some(), "bad builtin code {}", code);
        }
    }

    #[test]
    fn test_describe() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.describe("E501").unwrap(), "line too long");
        assert!(matches!(catalog.describe("X999"), Err(RuleError::NotFound(_))));
    }

    #[test]
    fn test_matching_prefix() {
        let catalog = RuleCatalog::builtin();
        let prefix = RuleCode::new("D1").unwrap();
        let codes: Vec<&str> = catalog.matching(&prefix).map(|c| c.as_str()).collect();
        assert_eq!(
            codes,
            vec!["D100", "D101", "D102", "D103", "D104", "D105", "D106", "D107"]
        );
    }

    #[test]
    fn test_register() {
        let mut catalog = RuleCatalog::empty();
        assert!(catalog.is_empty());

        catalog.register("ABC123", "plugin check").unwrap();
        assert!(catalog.contains("ABC123"));
        assert_eq!(catalog.describe("ABC123").unwrap(), "plugin check");

        let err = catalog.register("abc", "nope").unwrap_err();
        assert!(matches!(err, RuleError::InvalidCode(_)));
    }
}
