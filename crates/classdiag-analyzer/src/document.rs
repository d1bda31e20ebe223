//! Loading source set documents.

use log::debug;
use serde_json::error::Category;

use classdiag_core::syntax::SourceSet;

use crate::{
    error::{AnalyzeError, Diagnostic, ErrorCode},
    span::Span,
};

/// Parses a JSON source set document.
///
/// # Errors
///
/// Returns an [`AnalyzeError`] with an `E001` diagnostic when the text is not
/// well-formed JSON, or `E002` when it does not match the source set schema.
/// The diagnostic's label points at the offending position.
pub fn parse_source_set(src: &str) -> Result<SourceSet, AnalyzeError> {
    match serde_json::from_str::<SourceSet>(src) {
        Ok(set) => {
            debug!(packages = set.packages.len(); "Source set document parsed");
            Ok(set)
        }
        Err(err) => Err(document_diagnostic(src, &err).into()),
    }
}

fn document_diagnostic(src: &str, err: &serde_json::Error) -> Diagnostic {
    let span = Span::at_line_column(src, err.line(), err.column());
    let (code, message, label) = match err.classify() {
        Category::Data => (
            ErrorCode::E002,
            "source set document does not match the expected structure",
            "invalid value",
        ),
        Category::Eof => (
            ErrorCode::E001,
            "source set document ends unexpectedly",
            "document ends here",
        ),
        Category::Syntax | Category::Io => (
            ErrorCode::E001,
            "source set document is not valid JSON",
            "unexpected input",
        ),
    };

    Diagnostic::error(message)
        .with_code(code)
        .with_label(span, label)
        .with_help(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let set = parse_source_set(r#"{ "packages": [ { "path": "p", "units": [] } ] }"#).unwrap();

        assert_eq!(set.packages.len(), 1);
        assert_eq!(set.packages[0].path, "p");
    }

    #[test]
    fn test_syntax_error() {
        let src = "{ \"packages\": [ }";
        let err = parse_source_set(src).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        let span = diag.labels()[0].span();
        assert!(span.end() <= src.len());
        assert!(src[..span.start()].starts_with("{ \"packages\""));
    }

    #[test]
    fn test_truncated_document() {
        let err = parse_source_set("{ \"packages\": [").unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_structure_error() {
        let src = "{\n  \"packages\": [ { \"units\": [] } ]\n}";
        let err = parse_source_set(src).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E002));
        assert!(diag.help().unwrap().contains("path"));
    }
}
