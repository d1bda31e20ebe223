//! Rendering of the classifier model into diagram text.
//!
//! This module provides the [`Renderer`] trait. Implementors only emit the
//! tokens of their diagram language; the provided [`Renderer::render`] method
//! decides what is emitted and in which order, so every backend shares the
//! same gating rules and the same deterministic ordering.
//!
//! # Pipeline Position
//!
//! ```text
//! Source set document
//!     ↓ analyze
//! Model (Registry)
//!     ↓ render (this module)
//! Diagram text
//! ```
//!
//! # Available Backends
//!
//! - [`plantuml`] - PlantUML class diagrams
//! - [`mermaid`] - Mermaid class diagrams
//!
//! # Ordering
//!
//! Namespaces are emitted sorted by name, classifiers sorted by name within
//! their namespace, members sorted by name within their visibility group and
//! edges sorted by owner, then target.

pub mod mermaid;
pub mod plantuml;

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use classdiag_core::{
    model::{Classifier, ClassifierKind, Field, Method, Registry},
    name,
    primitive::BUILTIN_NAMESPACE,
};

use crate::{Model, config::RenderOptions};

const INDENT: &str = "    ";

/// Available output formats.
///
/// The names match external configuration strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// PlantUML (default)
    #[default]
    PlantUml,
    /// Mermaid
    Mermaid,
}

impl Format {
    /// Renders `model` in this format.
    pub fn render(self, model: &Model, options: &RenderOptions) -> String {
        match self {
            Format::PlantUml => plantuml::PlantUml.render(model, options),
            Format::Mermaid => mermaid::Mermaid.render(model, options),
        }
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plantuml" => Ok(Self::PlantUml),
            "mermaid" => Ok(Self::Mermaid),
            _ => Err("Unsupported output format"),
        }
    }
}

impl From<Format> for &'static str {
    fn from(val: Format) -> Self {
        match val {
            Format::PlantUml => "plantuml",
            Format::Mermaid => "mermaid",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// The kind of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A record embeds the target.
    Composition,
    /// An interface embeds the target interface.
    Extension,
    /// A record structurally satisfies the target interface.
    Implementation,
    /// A field of the owner references the target.
    Aggregation,
    /// The owner alias is defined as the target type.
    Alias,
}

impl EdgeKind {
    /// The text shown on the edge when connection labels are enabled.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Composition => "embeds",
            EdgeKind::Extension => "extends",
            EdgeKind::Implementation => "implements",
            EdgeKind::Aggregation => "uses",
            EdgeKind::Alias => "alias of",
        }
    }
}

/// A relationship between two qualified names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    kind: EdgeKind,
    owner: String,
    target: String,
}

impl Edge {
    pub fn new(kind: EdgeKind, owner: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            target: target.into(),
        }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// The classifier or alias the edge was recorded on.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Accumulates indented output lines.
#[derive(Debug, Default)]
pub struct LineWriter {
    buf: String,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `text` on its own line, indented `depth` levels.
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// A diagram language backend.
///
/// Required methods write the tokens of one construct; [`Renderer::render`]
/// drives them.
pub trait Renderer {
    /// Writes the document preamble.
    fn begin(&self, out: &mut LineWriter, options: &RenderOptions);

    /// Writes the document epilogue.
    fn end(&self, out: &mut LineWriter, options: &RenderOptions);

    fn open_namespace(&self, _out: &mut LineWriter, _namespace: &str) {}

    fn close_namespace(&self, _out: &mut LineWriter, _namespace: &str) {}

    fn open_classifier(&self, out: &mut LineWriter, classifier: &Classifier);

    fn close_classifier(&self, out: &mut LineWriter, classifier: &Classifier);

    fn field(&self, out: &mut LineWriter, field: &Field);

    fn method(&self, out: &mut LineWriter, method: &Method);

    /// Writes a placeholder class that shows `original` under the identifier
    /// `synthetic`.
    fn renamed_stub(&self, out: &mut LineWriter, namespace: &str, synthetic: &str, original: &str);

    fn edge(&self, out: &mut LineWriter, edge: &Edge, labeled: bool);

    /// Renders the whole model.
    ///
    /// Never fails; rendering the same model with the same options always
    /// yields the same text.
    fn render(&self, model: &Model, options: &RenderOptions) -> String {
        let registry = model.registry();
        let mut out = LineWriter::new();
        self.begin(&mut out, options);

        for namespace in namespace_order(registry) {
            let classifiers = sorted_classifiers(registry, namespace);
            let stubs = sorted_stubs(registry, namespace);
            if classifiers.is_empty() && stubs.is_empty() {
                continue;
            }

            self.open_namespace(&mut out, namespace);
            for classifier in &classifiers {
                render_classifier(self, &mut out, classifier, options);
            }
            for (synthetic, original) in stubs {
                self.renamed_stub(&mut out, namespace, synthetic, original);
            }
            self.close_namespace(&mut out, namespace);

            for edge in namespace_edges(&classifiers, options) {
                self.edge(&mut out, &edge, options.connection_labels());
            }
        }

        if options.aliases() {
            for edge in alias_edges(registry) {
                self.edge(&mut out, &edge, options.connection_labels());
            }
        }

        self.end(&mut out, options);
        out.finish()
    }
}

/// `+` for exported members, `-` otherwise.
pub(crate) fn visibility(exported: bool) -> char {
    if exported { '+' } else { '-' }
}

/// `Name(p T, U) R` with every type passed through `ty`.
pub(crate) fn method_signature(method: &Method, ty: impl Fn(&str) -> String) -> String {
    let params: Vec<String> = method
        .params()
        .iter()
        .map(|param| {
            if param.name().is_empty() {
                ty(param.ty().display())
            } else {
                format!("{} {}", param.name(), ty(param.ty().display()))
            }
        })
        .collect();
    let results: Vec<String> = method
        .results()
        .iter()
        .map(|result| ty(result.display()))
        .collect();

    let clause = name::result_clause(&results);
    if clause.is_empty() {
        format!("{}({})", method.name(), params.join(", "))
    } else {
        format!("{}({}) {clause}", method.name(), params.join(", "))
    }
}

fn render_classifier<R: Renderer + ?Sized>(
    renderer: &R,
    out: &mut LineWriter,
    classifier: &Classifier,
    options: &RenderOptions,
) {
    renderer.open_classifier(out, classifier);

    if options.fields() {
        let (public, private): (Vec<&Field>, Vec<&Field>) =
            classifier.fields().iter().partition(|field| field.is_exported());
        if options.private_members() {
            for field in sorted_by_name(private, Field::name) {
                renderer.field(out, field);
            }
        }
        for field in sorted_by_name(public, Field::name) {
            renderer.field(out, field);
        }
    }

    if options.methods() {
        let (public, private): (Vec<&Method>, Vec<&Method>) = classifier
            .methods()
            .iter()
            .partition(|method| method.is_exported());
        if options.private_members() {
            for method in sorted_by_name(private, Method::name) {
                renderer.method(out, method);
            }
        }
        for method in sorted_by_name(public, Method::name) {
            renderer.method(out, method);
        }
    }

    renderer.close_classifier(out, classifier);
}

fn sorted_by_name<'a, T>(mut items: Vec<&'a T>, name: fn(&T) -> &str) -> Vec<&'a T> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

/// Registry namespaces plus pseudo-namespaces that only hold renamed targets.
fn namespace_order(registry: &Registry) -> BTreeSet<&str> {
    registry
        .namespaces()
        .map(|(namespace, _)| namespace)
        .chain(registry.renamed_namespaces().map(|(namespace, _)| namespace))
        .collect()
}

fn sorted_classifiers<'a>(registry: &'a Registry, namespace: &str) -> Vec<&'a Classifier> {
    let mut classifiers: Vec<&Classifier> = registry
        .namespaces()
        .filter(|(name, _)| *name == namespace)
        .flat_map(|(_, classifiers)| classifiers.values())
        .collect();
    classifiers.sort_by(|a, b| a.name().cmp(b.name()));
    classifiers
}

fn sorted_stubs<'a>(registry: &'a Registry, namespace: &str) -> Vec<(&'a str, &'a str)> {
    let mut stubs: Vec<(&str, &str)> = registry
        .renamed(namespace)
        .into_iter()
        .flat_map(|names| {
            names
                .iter()
                .map(|(synthetic, original)| (synthetic.as_str(), original.as_str()))
        })
        .collect();
    stubs.sort();
    stubs
}

/// Composition, implementation and aggregation edges of one namespace, each
/// group sorted and gated by its option.
fn namespace_edges(classifiers: &[&Classifier], options: &RenderOptions) -> Vec<Edge> {
    let mut edges = Vec::new();

    if options.compositions() {
        for classifier in classifiers {
            let kind = if classifier.kind() == Some(ClassifierKind::Interface) {
                EdgeKind::Extension
            } else {
                EdgeKind::Composition
            };
            let targets: BTreeSet<&String> = classifier.compositions().iter().collect();
            edges.extend(
                targets
                    .into_iter()
                    .map(|target| Edge::new(kind, classifier.qualified_name(), target.as_str())),
            );
        }
    }

    if options.implementations() {
        for classifier in classifiers {
            let targets: BTreeSet<&String> = classifier.extensions().iter().collect();
            edges.extend(targets.into_iter().map(|target| {
                Edge::new(
                    EdgeKind::Implementation,
                    classifier.qualified_name(),
                    target.as_str(),
                )
            }));
        }
    }

    if options.aggregations() {
        for classifier in classifiers {
            let mut targets: BTreeSet<&String> = classifier.aggregations().iter().collect();
            if options.aggregate_private_members() {
                targets.extend(classifier.private_aggregations());
            }
            edges.extend(
                targets
                    .into_iter()
                    .filter(|target| name::split_qualified(target).0 != BUILTIN_NAMESPACE)
                    .map(|target| {
                        Edge::new(
                            EdgeKind::Aggregation,
                            classifier.qualified_name(),
                            target.as_str(),
                        )
                    }),
            );
        }
    }

    edges
}

/// One edge per alias, sorted by alias name, pointing at the synthetic
/// identifier when the target was renamed.
fn alias_edges(registry: &Registry) -> Vec<Edge> {
    let mut aliases: Vec<_> = registry.aliases().collect();
    aliases.sort_by_key(|alias| alias.qualified_name());

    aliases
        .into_iter()
        .map(|alias| {
            let target = match alias.synthetic_target() {
                Some(synthetic) => name::qualify(alias.target_namespace_name(), synthetic),
                None => alias.qualified_target(),
            };
            Edge::new(EdgeKind::Alias, alias.qualified_name(), target)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classdiag_core::model::{Parameter, TypeRef};

    #[test]
    fn test_format_from_str() {
        assert_eq!("plantuml".parse::<Format>(), Ok(Format::PlantUml));
        assert_eq!("mermaid".parse::<Format>(), Ok(Format::Mermaid));
        assert!("svg".parse::<Format>().is_err());
        assert_eq!(Format::Mermaid.to_string(), "mermaid");
    }

    #[test]
    fn test_line_writer_indents() {
        let mut out = LineWriter::new();
        out.line(0, "a");
        out.line(2, "b");

        assert_eq!(out.finish(), "a\n        b\n");
    }

    #[test]
    fn test_method_signature() {
        let int = TypeRef::new("int", "int");
        let method = Method::new(
            "Split",
            vec![
                Parameter::new("n", int.clone()),
                Parameter::new("", TypeRef::new("string", "string")),
            ],
            vec![int.clone(), TypeRef::new("error", "error")],
        );

        assert_eq!(
            method_signature(&method, str::to_string),
            "Split(n int, string) (int, error)"
        );
        assert_eq!(
            method_signature(&Method::new("Reset", vec![], vec![]), str::to_string),
            "Reset()"
        );
    }

    #[test]
    fn test_alias_edge_uses_synthetic_identifier() {
        use classdiag_core::model::{Alias, TargetNamespace};

        let mut registry = Registry::new();
        let synthetic = registry.rename("shop", "time.Time");
        registry.add_alias(
            Alias::new("shop", "Stamp", "time.Time", TargetNamespace::Modeled)
                .with_synthetic_target(synthetic),
        );
        registry.add_alias(Alias::new("shop", "Id", "int", TargetNamespace::Builtin));

        let edges = alias_edges(&registry);

        assert_eq!(
            edges,
            vec![
                Edge::new(EdgeKind::Alias, "shop.Id", "builtin.int"),
                Edge::new(EdgeKind::Alias, "shop.Stamp", "shop.timeTime"),
            ]
        );
    }

    #[test]
    fn test_colliding_alias_targets_get_distinct_edges() {
        use classdiag_core::model::{Alias, TargetNamespace};

        let mut registry = Registry::new();
        for (name, target) in [("A", "[]q.Foo"), ("B", "q.Foo")] {
            let synthetic = registry.rename("p", target);
            registry.add_alias(
                Alias::new("p", name, target, TargetNamespace::Modeled)
                    .with_synthetic_target(synthetic),
            );
        }

        assert_eq!(
            alias_edges(&registry),
            vec![
                Edge::new(EdgeKind::Alias, "p.A", "p.qFoo"),
                Edge::new(EdgeKind::Alias, "p.B", "p.qFoo2"),
            ]
        );
    }
}
