#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Violations are printed one per line as `path:line:col: CODE message`, the
//! format editors and CI annotators already understand. Colour goes through
//! termcolor so the same code writes plain text to pipes and files.

use crate::engine::{EffectiveConfig, ExecutionResult};
use crate::rules::Violation;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// One line per violation
    pub fn write_violations<W: WriteColor>(
        &self,
        out: &mut W,
        violations: &[Violation],
    ) -> io::Result<()> {
        for violation in violations {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", violation.file.display())?;
            out.reset()?;
            write!(out, ":{}:{}: ", violation.line, violation.column)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{}", violation.code)?;
            out.reset()?;
            writeln!(out, " {}", violation.message)?;
        }
        Ok(())
    }

    /// Closing line of a check run
    pub fn write_summary<W: WriteColor>(
        &self,
        out: &mut W,
        result: &ExecutionResult,
    ) -> io::Result<()> {
        let files = plural(result.files_checked, "file");
        if result.is_clean() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "✓")?;
            out.reset()?;
            writeln!(out, " Checked {}: no violations", files)?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, "✗")?;
            out.reset()?;
            writeln!(
                out,
                " Checked {}: {}",
                files,
                plural(result.violations.len(), "violation")
            )?;
        }
        if result.files_skipped > 0 {
            writeln!(out, "  {} could not be read", plural(result.files_skipped, "file"))?;
        }
        Ok(())
    }

    /// The active codes for one path
    pub fn write_resolution<W: WriteColor>(
        &self,
        out: &mut W,
        effective: &EffectiveConfig,
    ) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", effective.path)?;
        out.reset()?;
        if effective.excluded {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, " (excluded)")?;
            out.reset()?;
        }
        writeln!(out)?;

        if effective.overrides.is_empty() {
            writeln!(out, "  overrides: none")?;
        } else {
            let globs: Vec<String> = effective.overrides.iter().map(|g| g.to_string()).collect();
            writeln!(out, "  overrides: {}", globs.join(", "))?;
        }
        writeln!(out, "  max-line-length: {}", effective.max_line_length)?;
        writeln!(out, "  active ({}): {}", effective.active.len(), effective.active)?;
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
