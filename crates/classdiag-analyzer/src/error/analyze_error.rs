//! The AnalyzeError type for wrapping build diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for loading and analyzing a source set.
///
/// Wraps one or more diagnostics. Any error aborts the whole build; no
/// partial model is produced.
#[derive(Debug)]
pub struct AnalyzeError {
    diagnostics: Vec<Diagnostic>,
}

impl AnalyzeError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for AnalyzeError {}

impl From<Diagnostic> for AnalyzeError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for AnalyzeError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single() {
        let err: AnalyzeError = Diagnostic::error("unnamed type declaration").into();

        assert_eq!(err.to_string(), "error: unnamed type declaration");
    }

    #[test]
    fn test_display_multiple() {
        let err: AnalyzeError = vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first (+2 more)");
    }
}
