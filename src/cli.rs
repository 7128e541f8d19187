//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub mod common;
pub mod init;
pub mod list;
pub mod resolve;
pub mod show_config;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
