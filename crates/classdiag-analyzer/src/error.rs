//! Error and diagnostic system for the classdiag analyzer.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the source set document
//! - Severity levels
//! - A diagnostic collector for accumulating problems across source units
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, source locations,
//! and help text. Diagnostics that abort a build are wrapped in
//! [`AnalyzeError`].
//!
//! # Example
//!
//! ```
//! # use classdiag_analyzer::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("method `Close` has a receiver that does not name a type")
//!     .with_code(ErrorCode::E102)
//!     .with_help("receivers must be `T`, `*T` or `T[P]`");
//! ```

mod analyze_error;
mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use analyze_error::AnalyzeError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
