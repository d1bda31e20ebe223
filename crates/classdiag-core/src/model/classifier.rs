//! Classifiers and their members.

use std::fmt;

use indexmap::IndexSet;

use crate::name;

/// The kind of a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKind {
    /// A struct-like type with fields.
    Record,
    /// A type made of method signatures.
    Interface,
    /// A type defined as another type expression.
    Alias,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Record => write!(f, "record"),
            ClassifierKind::Interface => write!(f, "interface"),
            ClassifierKind::Alias => write!(f, "alias"),
        }
    }
}

/// A resolved type: its display form and its canonical form.
///
/// The display form leaves names from the declaring namespace unqualified
/// (`[]Item`); the canonical form qualifies every named type
/// (`[]shop.Item`) and is what signatures are compared on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    display: String,
    canonical: String,
}

impl TypeRef {
    pub fn new(display: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            canonical: canonical.into(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// A named field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: TypeRef,
    dependencies: Vec<String>,
}

impl Field {
    /// Creates a field.
    ///
    /// # Arguments
    ///
    /// * `name` - Field name as declared.
    /// * `ty` - Resolved field type.
    /// * `dependencies` - Qualified names of the named types referenced by `ty`.
    pub fn new(name: impl Into<String>, ty: TypeRef, dependencies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn is_exported(&self) -> bool {
        name::is_exported(&self.name)
    }
}

/// A method parameter. Unnamed parameters have an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}

/// A method of a record, or a method signature of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    params: Vec<Parameter>,
    results: Vec<TypeRef>,
}

impl Method {
    pub fn new(name: impl Into<String>, params: Vec<Parameter>, results: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn results(&self) -> &[TypeRef] {
        &self.results
    }

    pub fn is_exported(&self) -> bool {
        name::is_exported(&self.name)
    }

    /// Returns `true` if both methods have the same name and the same ordered
    /// canonical parameter and result types. Parameter names are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdiag_core::model::{Method, Parameter, TypeRef};
    ///
    /// let string = TypeRef::new("string", "string");
    /// let a = Method::new("Greet", vec![Parameter::new("name", string.clone())], vec![]);
    /// let b = Method::new("Greet", vec![Parameter::new("who", string)], vec![]);
    /// assert!(a.signature_matches(&b));
    /// ```
    pub fn signature_matches(&self, other: &Method) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self.results.len() == other.results.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty.canonical == b.ty.canonical)
            && self
                .results
                .iter()
                .zip(&other.results)
                .all(|(a, b)| a.canonical == b.canonical)
    }
}

/// A named type declared in a namespace.
///
/// A classifier is created the first time its name is seen, either through its
/// own declaration or as a method receiver. Its kind is then filled in:
/// a kind inferred from a receiver is provisional, a declared kind is final.
#[derive(Debug, Clone)]
pub struct Classifier {
    namespace: String,
    name: String,
    kind: Option<ClassifierKind>,
    kind_declared: bool,
    fields: Vec<Field>,
    methods: Vec<Method>,
    compositions: IndexSet<String>,
    extensions: IndexSet<String>,
    aggregations: IndexSet<String>,
    private_aggregations: IndexSet<String>,
}

impl Classifier {
    /// Creates a classifier without kind, members or edges.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind: None,
            kind_declared: false,
            fields: Vec::new(),
            methods: Vec::new(),
            compositions: IndexSet::new(),
            extensions: IndexSet::new(),
            aggregations: IndexSet::new(),
            private_aggregations: IndexSet::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local name within the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<namespace>.<name>`
    pub fn qualified_name(&self) -> String {
        name::qualify(&self.namespace, &self.name)
    }

    pub fn kind(&self) -> Option<ClassifierKind> {
        self.kind
    }

    /// Returns `true` once a declaration has fixed the kind.
    pub fn is_declared(&self) -> bool {
        self.kind_declared
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Qualified names of anonymously embedded types.
    pub fn compositions(&self) -> &IndexSet<String> {
        &self.compositions
    }

    /// Qualified names of the interfaces this classifier structurally satisfies.
    pub fn extensions(&self) -> &IndexSet<String> {
        &self.extensions
    }

    /// Qualified names referenced through exported fields.
    pub fn aggregations(&self) -> &IndexSet<String> {
        &self.aggregations
    }

    /// Qualified names referenced only through non-exported fields.
    pub fn private_aggregations(&self) -> &IndexSet<String> {
        &self.private_aggregations
    }

    /// Sets a provisional kind if none is known yet.
    ///
    /// Used for classifiers first seen as method receivers.
    pub fn infer_kind(&mut self, kind: ClassifierKind) {
        if self.kind.is_none() {
            self.kind = Some(kind);
        }
    }

    /// Fixes the kind from a declaration.
    ///
    /// The first declaration wins, replacing any inferred kind. Later
    /// declarations never overwrite it.
    ///
    /// # Errors
    ///
    /// Returns the kind already declared when a later declaration asks for a
    /// different one.
    pub fn declare_kind(&mut self, kind: ClassifierKind) -> Result<(), ClassifierKind> {
        match self.kind {
            Some(existing) if self.kind_declared => {
                if existing == kind {
                    Ok(())
                } else {
                    Err(existing)
                }
            }
            _ => {
                self.kind = Some(kind);
                self.kind_declared = true;
                Ok(())
            }
        }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    /// Records an anonymously embedded type. A leading pointer marker is
    /// dropped; empty names are ignored.
    pub fn add_composition(&mut self, target: &str) {
        if let Some(target) = normalize_target(target) {
            self.compositions.insert(target.to_string());
        }
    }

    pub fn add_extension(&mut self, target: &str) {
        if let Some(target) = normalize_target(target) {
            self.extensions.insert(target.to_string());
        }
    }

    pub fn add_aggregation(&mut self, target: &str) {
        if let Some(target) = normalize_target(target) {
            self.aggregations.insert(target.to_string());
        }
    }

    pub fn add_private_aggregation(&mut self, target: &str) {
        if let Some(target) = normalize_target(target) {
            self.private_aggregations.insert(target.to_string());
        }
    }
}

fn normalize_target(target: &str) -> Option<&str> {
    let target = target.strip_prefix('*').unwrap_or(target);
    (!target.is_empty()).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(name: &str) -> TypeRef {
        TypeRef::new(name, name)
    }

    #[test]
    fn test_declared_kind_is_never_overwritten() {
        let mut classifier = Classifier::new("pkg", "Foo");

        assert!(classifier.declare_kind(ClassifierKind::Interface).is_ok());
        assert_eq!(
            classifier.declare_kind(ClassifierKind::Record),
            Err(ClassifierKind::Interface)
        );
        classifier.infer_kind(ClassifierKind::Record);

        assert_eq!(classifier.kind(), Some(ClassifierKind::Interface));
    }

    #[test]
    fn test_redeclaring_same_kind_is_ok() {
        let mut classifier = Classifier::new("pkg", "Foo");
        classifier.declare_kind(ClassifierKind::Record).unwrap();
        assert!(classifier.declare_kind(ClassifierKind::Record).is_ok());
    }

    #[test]
    fn test_declaration_replaces_inferred_kind() {
        let mut classifier = Classifier::new("pkg", "Status");

        classifier.infer_kind(ClassifierKind::Record);
        assert_eq!(classifier.kind(), Some(ClassifierKind::Record));
        assert!(!classifier.is_declared());

        classifier.declare_kind(ClassifierKind::Alias).unwrap();
        assert_eq!(classifier.kind(), Some(ClassifierKind::Alias));
        assert!(classifier.is_declared());
    }

    #[test]
    fn test_new_classifier_has_no_kind() {
        let classifier = Classifier::new("pkg.a", "Foo");
        assert_eq!(classifier.kind(), None);
        assert_eq!(classifier.qualified_name(), "pkg.a.Foo");
    }

    #[test]
    fn test_edge_targets_drop_pointer_and_empty() {
        let mut classifier = Classifier::new("pkg", "Foo");

        classifier.add_composition("*pkg.Bar");
        classifier.add_composition("pkg.Bar");
        classifier.add_composition("");
        classifier.add_aggregation("*");

        assert_eq!(classifier.compositions().len(), 1);
        assert!(classifier.compositions().contains("pkg.Bar"));
        assert!(classifier.aggregations().is_empty());
    }

    #[test]
    fn test_signature_mismatch_on_parameter_types() {
        let a = Method::new("B", vec![Parameter::new("s", ty("string"))], vec![ty("error")]);
        let b = Method::new("B", vec![], vec![ty("error")]);
        let c = Method::new("B", vec![Parameter::new("s", ty("int"))], vec![ty("error")]);

        assert!(!a.signature_matches(&b));
        assert!(!a.signature_matches(&c));
        assert!(a.signature_matches(&a.clone()));
    }

    #[test]
    fn test_signature_compares_canonical_not_display() {
        let local = TypeRef::new("Item", "shop.Item");
        let foreign = TypeRef::new("Item", "other.Item");

        let a = Method::new("Get", vec![], vec![local]);
        let b = Method::new("Get", vec![], vec![foreign]);

        assert!(!a.signature_matches(&b));
    }

    #[test]
    fn test_exported_members() {
        let field = Field::new("count", ty("int"), vec![]);
        let method = Method::new("Count", vec![], vec![ty("int")]);

        assert!(!field.is_exported());
        assert!(method.is_exported());
    }
}
