//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, labeled spans, and help text. Problems found in a syntax tree
//! have no span; they name the source unit in their message instead.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with optional source location information.
///
/// # Example
///
/// ```text
/// error[E002]: missing field `path` at line 3 column 5
///   |
/// 3 |     }
///   |     ^ here
///   |
///   = help: every package needs a `path`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("bad tree");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "bad tree");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("empty namespace path").with_code(ErrorCode::E100);

        assert_eq!(diag.to_string(), "error[E100]: empty namespace path");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("unsupported expression");

        assert_eq!(diag.to_string(), "warning: unsupported expression");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("expected `,`")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(4..5), "here")
            .with_help("check the document syntax");

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.labels()[0].message(), "here");
        assert_eq!(diag.help(), Some("check the document syntax"));
    }
}
