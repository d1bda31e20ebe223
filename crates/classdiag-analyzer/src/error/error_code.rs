//! Error codes for the classdiag diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors
//! - `E1xx` - Syntax tree validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The source set document is not well-formed JSON.
    E001,

    /// Invalid document structure.
    ///
    /// The document is well-formed but does not match the source set schema,
    /// e.g. a required field is missing or has the wrong type.
    E002,

    // =========================================================================
    // Validation Errors (E1xx)
    // =========================================================================
    /// Empty namespace path.
    ///
    /// A package has an empty path, so its classifiers cannot be qualified.
    E100,

    /// Unnamed type declaration.
    ///
    /// A type declaration has an empty name.
    E101,

    /// Receiver does not name a type.
    ///
    /// A method receiver is not `T`, `*T` or an instantiation of `T`.
    E102,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
