//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the source set document, marking where a problem is.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
