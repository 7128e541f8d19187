//! Path matching, per-file resolution and the check engine

pub mod executor;
pub mod file_walker;
pub mod path_matcher;
pub mod resolver;

pub use executor::{ExecutionEngine, ExecutionResult};
pub use path_matcher::PathMatcher;
pub use resolver::{EffectiveConfig, Resolver};
