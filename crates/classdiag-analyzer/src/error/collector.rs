//! Collector for accumulating diagnostics during a build.
//!
//! The [`DiagnosticCollector`] lets the builder report every invalid
//! declaration in a source set instead of stopping at the first one. The build
//! still fails as a whole if any error was emitted.

use log::warn;

use crate::error::{AnalyzeError, Diagnostic};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(AnalyzeError)` with all diagnostics.
    /// - Otherwise logs the warnings and returns `Ok(())`.
    pub fn finish(self) -> Result<(), AnalyzeError> {
        if self.has_errors {
            return Err(AnalyzeError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!("{diagnostic}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_ok() {
        assert!(DiagnosticCollector::default().finish().is_ok());
    }

    #[test]
    fn test_collector_warning_only_is_ok() {
        let mut collector = DiagnosticCollector::default();
        collector.emit(Diagnostic::warning("conflicting declaration"));

        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_every_diagnostic_on_error() {
        let mut collector = DiagnosticCollector::default();
        collector.emit(Diagnostic::error("first").with_code(ErrorCode::E101));
        collector.emit(Diagnostic::warning("second"));
        collector.emit(Diagnostic::error("third").with_code(ErrorCode::E102));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].message(), "first");
    }
}
