//! Error types for classdiag operations.
//!
//! This module provides the main error type [`ClassdiagError`] which wraps
//! the error conditions that can occur while loading, analyzing and
//! configuring. Rendering itself never fails.

use std::io;

use thiserror::Error;

use classdiag_analyzer::AnalyzeError;

use crate::config::OptionError;

/// The main error type for classdiag operations.
///
/// # Diagnostic Variants
///
/// The `Analyze` variant keeps the source document next to the diagnostics so
/// their spans can be shown as snippets.
#[derive(Debug, Error)]
pub enum ClassdiagError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Analyze { err: AnalyzeError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Option(#[from] OptionError),
}

impl ClassdiagError {
    /// Create a new `Analyze` error with the associated source document.
    pub fn new_analyze_error(err: AnalyzeError, src: impl Into<String>) -> Self {
        Self::Analyze {
            err,
            src: src.into(),
        }
    }
}
