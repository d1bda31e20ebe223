//! The model builder.
//!
//! Walks the declarations of every source unit and fills a [`Registry`]:
//! classifiers and their kinds, fields, methods, composition and aggregation
//! edges, and aliases. Structural extension edges are added afterwards by
//! [`crate::relations`].

use log::{debug, info, trace};

use classdiag_core::{
    model::{Alias, ClassifierKind, Field, Method, Parameter, Registry, TypeRef},
    name,
    primitive::BUILTIN_NAMESPACE,
    syntax::{Decl, Expr, FieldDecl, FuncType, InterfaceMember, Package, SourceSet, SourceUnit},
};

use crate::{
    error::{AnalyzeError, Diagnostic, DiagnosticCollector, ErrorCode},
    imports::ImportTable,
    relations,
    resolve::TypeResolver,
};

/// Builds a [`Registry`] from syntax trees.
///
/// Invalid trees are reported as diagnostics; the build keeps going so every
/// problem in the source set is reported at once, then fails as a whole.
///
/// # Examples
///
/// ```
/// use classdiag_analyzer::ModelBuilder;
/// use classdiag_core::syntax::{Decl, Expr, Package, SourceUnit};
///
/// let package = Package {
///     path: "shop".to_string(),
///     units: vec![SourceUnit {
///         name: "id.go".to_string(),
///         imports: vec![],
///         decls: vec![Decl::Type { name: "Id".to_string(), ty: Expr::ident("int") }],
///     }],
/// };
///
/// let mut builder = ModelBuilder::new();
/// builder.add_package(&package);
/// let registry = builder.build().unwrap();
/// assert_eq!(registry.aliases().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    registry: Registry,
    diagnostics: DiagnosticCollector,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every package of `set`, in order.
    pub fn add_source_set(&mut self, set: &SourceSet) {
        for package in &set.packages {
            self.add_package(package);
        }
    }

    /// Adds one package. Its units are visited sorted by name.
    pub fn add_package(&mut self, package: &Package) {
        let namespace = name::namespace_from_path(&package.path);
        if namespace.is_empty() {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "package `{}` has an empty namespace path",
                    package.path
                ))
                .with_code(ErrorCode::E100)
                .with_help("give every package a path such as `pkg/a`"),
            );
            return;
        }

        debug!(namespace, units = package.units.len(); "Adding package");
        self.registry.ensure_namespace(&namespace);

        let mut units: Vec<&SourceUnit> = package.units.iter().collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));
        for unit in units {
            self.add_unit(&namespace, unit);
        }
    }

    /// Finishes the build: fails if any error was reported, otherwise resolves
    /// structural extension edges and returns the registry.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyzeError`] carrying every diagnostic when at least one
    /// of them is an error.
    pub fn build(self) -> Result<Registry, AnalyzeError> {
        self.diagnostics.finish()?;

        let mut registry = self.registry;
        let edges = relations::resolve_extensions(&mut registry);
        info!(
            classifiers = registry.len(),
            extensions = edges;
            "Model built"
        );
        Ok(registry)
    }

    fn add_unit(&mut self, namespace: &str, unit: &SourceUnit) {
        debug!(namespace, unit = unit.name; "Adding source unit");
        let imports = ImportTable::from_specs(&unit.imports);
        let mut visitor = UnitVisitor {
            namespace,
            unit: &unit.name,
            resolver: TypeResolver::new(&imports),
            registry: &mut self.registry,
            diagnostics: &mut self.diagnostics,
        };
        for decl in &unit.decls {
            visitor.visit(decl);
        }
    }
}

/// Visits the declarations of one source unit.
struct UnitVisitor<'a> {
    namespace: &'a str,
    unit: &'a str,
    resolver: TypeResolver<'a>,
    registry: &'a mut Registry,
    diagnostics: &'a mut DiagnosticCollector,
}

impl UnitVisitor<'_> {
    fn visit(&mut self, decl: &Decl) {
        match decl {
            Decl::Type { name, .. } if name.is_empty() => {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "type declaration without a name in `{}`",
                        self.unit
                    ))
                    .with_code(ErrorCode::E101),
                );
            }
            Decl::Type {
                name,
                ty: Expr::Struct { fields },
            } => self.visit_record(name, fields),
            Decl::Type {
                name,
                ty: Expr::Interface { members },
            } => self.visit_interface(name, members),
            Decl::Type { name, ty } => self.visit_alias(name, ty),
            Decl::Func {
                name,
                receiver: Some(receiver),
                signature,
            } => self.visit_method(name, receiver, signature),
            Decl::Func { name, .. } => trace!(name; "Skipping plain function"),
            Decl::Other => {}
        }
    }

    fn visit_method(&mut self, name: &str, receiver: &FieldDecl, signature: &FuncType) {
        let Some(owner) = receiver.ty.receiver_name() else {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "method `{name}` in `{}` has a receiver that does not name a type",
                    self.unit
                ))
                .with_code(ErrorCode::E102)
                .with_help("receivers must be `T`, `*T` or `T[P]`"),
            );
            return;
        };

        trace!(owner, method = name; "Adding method");
        let method = self.method(name, signature);
        let classifier = self.registry.get_or_create(self.namespace, owner);
        classifier.infer_kind(ClassifierKind::Record);
        classifier.add_method(method);
    }

    fn visit_record(&mut self, name: &str, fields: &[FieldDecl]) {
        trace!(name; "Adding record");
        if !self.declare(name, ClassifierKind::Record) {
            return;
        }

        for field in fields {
            if field.names.is_empty() {
                let target = self.embedded_target(&field.ty);
                self.registry
                    .get_or_create(self.namespace, name)
                    .add_composition(&target);
                continue;
            }

            let resolved = self.resolver.resolve(&field.ty);
            let ty = resolved.to_type_ref(self.namespace);
            let dependencies = resolved.qualified_dependencies(self.namespace);
            let classifier = self.registry.get_or_create(self.namespace, name);
            for field_name in &field.names {
                let field = Field::new(field_name.as_str(), ty.clone(), dependencies.clone());
                for dependency in &dependencies {
                    if field.is_exported() {
                        classifier.add_aggregation(dependency);
                    } else {
                        classifier.add_private_aggregation(dependency);
                    }
                }
                classifier.add_field(field);
            }
        }
    }

    fn visit_interface(&mut self, name: &str, members: &[InterfaceMember]) {
        trace!(name; "Adding interface");
        if !self.declare(name, ClassifierKind::Interface) {
            return;
        }

        for member in members {
            match member {
                InterfaceMember::Method {
                    name: method_name,
                    signature,
                } => {
                    let method = self.method(method_name, signature);
                    self.registry
                        .get_or_create(self.namespace, name)
                        .add_method(method);
                }
                InterfaceMember::Embedded {
                    ty: ty @ (Expr::Ident { .. } | Expr::Selector { .. }),
                } => {
                    let target = self.embedded_target(ty);
                    self.registry
                        .get_or_create(self.namespace, name)
                        .add_composition(&target);
                }
                InterfaceMember::Embedded { .. } => {
                    trace!(name; "Ignoring embedded type constraint");
                }
            }
        }
    }

    fn visit_alias(&mut self, name: &str, ty: &Expr) {
        trace!(name; "Adding alias");
        if !self.declare(name, ClassifierKind::Alias) {
            return;
        }

        let target = self.resolver.resolve(ty).display();
        let mut alias = Alias::new(
            self.namespace,
            name,
            target,
            self.resolver.alias_target_namespace(ty),
        );
        if alias.needs_synthetic_target() {
            let synthetic = self
                .registry
                .rename(alias.target_namespace_name(), alias.target());
            debug!(alias = alias.qualified_name(), synthetic:%; "Renaming alias target");
            alias = alias.with_synthetic_target(synthetic);
        }
        self.registry.add_alias(alias);
    }

    /// Declares the kind of `name`, reporting a conflict as a warning.
    /// Returns `false` when the declaration lost to an earlier one.
    fn declare(&mut self, name: &str, kind: ClassifierKind) -> bool {
        let classifier = self.registry.get_or_create(self.namespace, name);
        match classifier.declare_kind(kind) {
            Ok(()) => true,
            Err(existing) => {
                self.diagnostics.emit(Diagnostic::warning(format!(
                    "`{}` is declared as {kind} in `{}` but was already declared as {existing}; keeping {existing}",
                    classifier.qualified_name(),
                    self.unit
                )));
                false
            }
        }
    }

    /// Qualified name of an embedded type, without pointer or type arguments.
    fn embedded_target(&self, ty: &Expr) -> String {
        let resolved = self.resolver.resolve(strip_embedding(ty));
        if resolved.dependencies().is_empty() {
            name::qualify(BUILTIN_NAMESPACE, &resolved.display())
        } else {
            resolved.canonical(self.namespace)
        }
    }

    fn method(&self, name: &str, signature: &FuncType) -> Method {
        let mut params = Vec::new();
        for param in &signature.params {
            let ty = self.type_ref(&param.ty);
            if param.names.is_empty() {
                params.push(Parameter::new("", ty));
            } else {
                params.extend(
                    param
                        .names
                        .iter()
                        .map(|param_name| Parameter::new(param_name.as_str(), ty.clone())),
                );
            }
        }

        let mut results = Vec::new();
        for result in &signature.results {
            let ty = self.type_ref(&result.ty);
            results.extend(std::iter::repeat_n(ty, result.names.len().max(1)));
        }

        Method::new(name, params, results)
    }

    fn type_ref(&self, ty: &Expr) -> TypeRef {
        self.resolver.resolve(ty).to_type_ref(self.namespace)
    }
}

fn strip_embedding(ty: &Expr) -> &Expr {
    match ty {
        Expr::Pointer { elem } => strip_embedding(elem),
        Expr::Instance { base, .. } => strip_embedding(base),
        _ => ty,
    }
}
