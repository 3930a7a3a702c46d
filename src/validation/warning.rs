//! Diagnostic types for validation results.

use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code (e.g. "tilegen::validate::exit-coverage").
    pub code: String,
    pub message: String,
    /// Grid slot the diagnostic refers to, for grid checks.
    pub slot: Option<(usize, usize)>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            slot: None,
            help: None,
        }
    }

    /// Attach the grid slot this diagnostic is about.
    pub fn at(mut self, x: usize, y: usize) -> Self {
        self.slot = Some((x, y));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some((x, y)) = self.slot {
            write!(f, " at slot ({}, {})", x, y)?;
        }
        Ok(())
    }
}

/// Diagnostics collected from one or more checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }

    /// True when there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics with the given code.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_counts_and_merge() {
        let mut a = ValidationResult::new();
        a.push(Diagnostic::error("tilegen::a", "broken"));

        let mut b = ValidationResult::new();
        b.push(Diagnostic::warning("tilegen::b", "odd"));
        b.push(Diagnostic::warning("tilegen::b", "odd again"));

        a.merge(b);
        assert_eq!(a.error_count(), 1);
        assert_eq!(a.warning_count(), 2);
        assert_eq!(a.with_code("tilegen::b").count(), 2);
    }

    #[test]
    fn test_display_with_slot() {
        let d = Diagnostic::error("tilegen::validate::edge-mismatch", "exits disagree").at(2, 3);
        assert_eq!(
            d.to_string(),
            "error[tilegen::validate::edge-mismatch]: exits disagree at slot (2, 3)"
        );
    }

    #[test]
    fn test_diagnostic_with_help() {
        let d = Diagnostic::warning("tilegen::test", "no piece").with_help("Add a tile with these exits");
        assert_eq!(d.help.as_deref(), Some("Add a tile with these exits"));
        assert_eq!(d.slot, None);
    }
}
