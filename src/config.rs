//! Configuration file parsing and discovery

pub mod discovery;
pub mod ini;
pub mod options;
pub mod settings;

pub use discovery::{discover, load_or_discover};
pub use settings::{Config, CopyrightSettings, PerFileOverride, QuoteStyle};
