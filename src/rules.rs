#![forbid(unsafe_code)]

//! Rule definitions, the code catalog and global selection

mod builtin;
mod catalog;
mod copyright;
mod noqa;
mod registry;
mod rule;

// Re-export core types
pub use builtin::{LineLengthRule, TrailingWhitespaceRule, builtin_rules};
pub use catalog::RuleCatalog;
pub use copyright::CopyrightRule;
pub use noqa::{NoqaMap, Suppression};
pub use registry::{RuleRegistry, Selection};
pub use rule::{ExecutionContext, Rule, Violation};
