//! Terminal output formatting for the tilegen CLI.
//!
//! Status lines and diagnostics go to stderr; stdout is reserved for the
//! generated level.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::types::Level;
use crate::validation::{Diagnostic, Severity, ValidationResult};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Progress line, e.g. "  Generating castle (5x5 tiles, seed 42)".
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Print every diagnostic, then a one-line verdict.
    pub fn diagnostics(&self, result: &ValidationResult) {
        let mut stderr = io::stderr().lock();
        for d in result.iter() {
            let _ = writeln!(stderr, "{}", self.diagnostic_line(d));
            if let Some(help) = &d.help {
                let _ = writeln!(stderr, "    {} {}", self.dim("help:"), help);
            }
        }
        drop(stderr);

        let counts = format!(
            "{} and {}",
            plural(result.error_count(), "error", "errors"),
            plural(result.warning_count(), "warning", "warnings")
        );
        if result.has_errors() {
            self.print_line(RED, "Failed", &counts);
        } else if result.has_warnings() {
            self.print_line(YELLOW, "Passed", &counts);
        } else {
            self.success("Passed", "no problems found");
        }
    }

    fn diagnostic_line(&self, d: &Diagnostic) -> String {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        let label = self.paint(color, &format!("{}[{}]", d.severity, d.code));
        match d.slot {
            Some((x, y)) => format!("  {}: {} at slot ({}, {})", label, d.message, x, y),
            None => format!("  {}: {}", label, d.message),
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "tile", "tiles")` → "1 tile".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// One-line description of a finished level, e.g. "castle 35x35 with 4 actors and 1 item".
pub fn level_summary(level: &Level) -> String {
    format!(
        "{} {}x{} with {} and {}",
        level.name,
        level.width(),
        level.height(),
        plural(level.actors().len(), "actor", "actors"),
        plural(level.items().len(), "item", "items")
    )
}

/// Path relative to the working directory when possible, as given otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            return if s.is_empty() { ".".to_string() } else { s };
        }
    }
    path.display().to_string()
}
