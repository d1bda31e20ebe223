//! classdiag - class diagrams from scanned source trees.
//!
//! Analysis and rendering for class diagrams. A scanner hands over syntax
//! trees as a JSON source set document; classdiag builds a classifier model
//! from them and renders it as PlantUML or Mermaid text.

pub mod config;
pub mod render;

mod error;
mod model;

pub use classdiag_core::syntax;

pub use error::ClassdiagError;
pub use model::Model;
pub use render::Format;

use log::{debug, info};

use classdiag_core::syntax::SourceSet;

use config::AppConfig;

/// Builder for analyzing source sets and rendering class diagrams.
///
/// # Examples
///
/// ```
/// use classdiag::{DiagramBuilder, Format, config::AppConfig};
///
/// let source = r#"{ "packages": [ { "path": "shop", "units": [ { "name": "cart.go", "decls": [
///     { "kind": "type", "name": "Cart", "type": { "kind": "struct" } }
/// ] } ] } ] }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let model = builder.analyze(source).expect("Failed to analyze");
///
/// let puml = builder.render(&model);
/// assert!(puml.contains("class Cart"));
///
/// let mermaid = builder.render_as(&model, Format::Mermaid);
/// assert!(mermaid.contains("class shop_Cart"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Output format and rendering options
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON source set document and build its model.
    ///
    /// # Arguments
    ///
    /// * `source` - The source set document
    ///
    /// # Errors
    ///
    /// Returns `ClassdiagError::Analyze` if the document is malformed or any
    /// syntax tree in it is invalid.
    pub fn analyze(&self, source: &str) -> Result<Model, ClassdiagError> {
        info!(bytes = source.len(); "Analyzing source set document");

        let registry = classdiag_analyzer::analyze_str(source)
            .map_err(|err| ClassdiagError::new_analyze_error(err, source))?;

        debug!(classifiers = registry.len(); "Source set analyzed");
        Ok(Model::new(registry))
    }

    /// Build the model of an already deserialized source set.
    ///
    /// # Errors
    ///
    /// Returns `ClassdiagError::Analyze` if any syntax tree is invalid. The
    /// error carries no source text.
    pub fn analyze_source_set(&self, set: &SourceSet) -> Result<Model, ClassdiagError> {
        let registry = classdiag_analyzer::analyze(set)
            .map_err(|err| ClassdiagError::new_analyze_error(err, String::new()))?;
        Ok(Model::new(registry))
    }

    /// Render a model in the configured format.
    pub fn render(&self, model: &Model) -> String {
        self.render_as(model, self.config.format())
    }

    /// Render a model in `format`, with the configured rendering options.
    pub fn render_as(&self, model: &Model, format: Format) -> String {
        info!(format:%; "Rendering diagram");
        let text = format.render(model, self.config.render());
        debug!(bytes = text.len(); "Diagram rendered");
        text
    }
}
