//! # classdiag analyzer
//!
//! Turns scanned syntax trees into the classifier model.
//!
//! The pipeline has two passes over a [`SourceSet`]:
//!
//! 1. **Build** - [`ModelBuilder`] visits every declaration, creating
//!    classifiers, members, composition and aggregation edges, and aliases.
//! 2. **Resolve** - [`relations`] adds an extension edge from each record to
//!    each interface it structurally satisfies.
//!
//! Any invalid tree aborts the whole run with an [`AnalyzeError`].
//!
//! ## Usage
//!
//! ```
//! # use classdiag_analyzer::{analyze_str, AnalyzeError};
//! fn main() -> Result<(), AnalyzeError> {
//!     let src = r#"{ "packages": [ { "path": "geo", "units": [ { "name": "shape.go", "decls": [
//!         { "kind": "type", "name": "Shape", "type": { "kind": "interface", "members": [
//!             { "kind": "method", "name": "Area",
//!               "signature": { "results": [ { "type": { "kind": "ident", "name": "float64" } } ] } } ] } },
//!         { "kind": "type", "name": "Square", "type": { "kind": "struct" } },
//!         { "kind": "func", "name": "Area",
//!           "receiver": { "type": { "kind": "ident", "name": "Square" } },
//!           "signature": { "results": [ { "type": { "kind": "ident", "name": "float64" } } ] } }
//!     ] } ] } ] }"#;
//!
//!     let registry = analyze_str(src)?;
//!     let square = registry.get("geo.Square").unwrap();
//!     assert!(square.extensions().contains("geo.Shape"));
//!     Ok(())
//! }
//! ```

mod builder;
mod document;
pub mod error;
mod imports;
pub mod relations;
mod resolve;
mod span;

pub use builder::ModelBuilder;
pub use document::parse_source_set;
pub use error::{AnalyzeError, Diagnostic, ErrorCode, Severity};
pub use imports::ImportTable;
pub use resolve::{NAMESPACE_PLACEHOLDER, ResolvedType, TypeResolver};
pub use span::Span;

use log::info;

use classdiag_core::{model::Registry, syntax::SourceSet};

/// Builds the classifier model for a source set.
///
/// # Errors
///
/// Returns an [`AnalyzeError`] carrying every diagnostic if any tree is
/// invalid. No partial model is returned.
pub fn analyze(set: &SourceSet) -> Result<Registry, AnalyzeError> {
    info!(packages = set.packages.len(); "Analyzing source set");
    let mut builder = ModelBuilder::new();
    builder.add_source_set(set);
    builder.build()
}

/// Parses a JSON source set document and builds its model.
///
/// # Errors
///
/// Returns an [`AnalyzeError`] if the document is malformed or any tree in it
/// is invalid.
pub fn analyze_str(src: &str) -> Result<Registry, AnalyzeError> {
    let set = parse_source_set(src)?;
    analyze(&set)
}
