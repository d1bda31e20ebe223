//! Type expression resolution.
//!
//! Turns a syntax tree [`Expr`] into its textual form plus the set of named
//! types it references. Names from the declaring namespace are written with a
//! [`NAMESPACE_PLACEHOLDER`] prefix, so the same resolution can be read both as
//! a short display form and as a fully qualified canonical form.
//!
//! | Expression         | Text                  | Dependencies        |
//! |--------------------|-----------------------|---------------------|
//! | `int`              | `int`                 | -                   |
//! | `Foo`              | `{namespace}.Foo`     | `{namespace}.Foo`   |
//! | `b.Bar`            | `pkg.b.Bar`           | `pkg.b.Bar`         |
//! | `map[string]*Foo`  | `map[string]*{namespace}.Foo` | `{namespace}.Foo` |
//! | `func(int) error`  | `func(int) error`     | -                   |

use indexmap::IndexSet;
use log::warn;

use classdiag_core::{
    model::{TargetNamespace, TypeRef},
    name, primitive,
    syntax::{ChanDir, Expr, FieldDecl, FuncType, InterfaceMember},
};

use crate::imports::ImportTable;

/// Stands in for the declaring namespace in resolved text.
pub const NAMESPACE_PLACEHOLDER: &str = "{namespace}";

/// The result of resolving a type expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedType {
    text: String,
    dependencies: IndexSet<String>,
}

impl ResolvedType {
    fn opaque(text: &str) -> Self {
        Self {
            text: text.to_string(),
            dependencies: IndexSet::new(),
        }
    }

    fn named(qualified: String) -> Self {
        let mut dependencies = IndexSet::new();
        dependencies.insert(qualified.clone());
        Self {
            text: qualified,
            dependencies,
        }
    }

    fn wrap(prefix: &str, inner: Self) -> Self {
        Self {
            text: format!("{prefix}{}", inner.text),
            dependencies: inner.dependencies,
        }
    }

    /// Resolved text, still carrying the namespace placeholder.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Referenced named types, still carrying the namespace placeholder.
    pub fn dependencies(&self) -> &IndexSet<String> {
        &self.dependencies
    }

    /// Text with names from the declaring namespace left unqualified.
    pub fn display(&self) -> String {
        self.text.replace(&format!("{NAMESPACE_PLACEHOLDER}."), "")
    }

    /// Text with every name qualified by `namespace`.
    pub fn canonical(&self, namespace: &str) -> String {
        self.text.replace(NAMESPACE_PLACEHOLDER, namespace)
    }

    /// Both forms as a [`TypeRef`].
    pub fn to_type_ref(&self, namespace: &str) -> TypeRef {
        TypeRef::new(self.display(), self.canonical(namespace))
    }

    /// Dependencies qualified by `namespace`, in first-seen order.
    pub fn qualified_dependencies(&self, namespace: &str) -> Vec<String> {
        self.dependencies
            .iter()
            .map(|dep| dep.replace(NAMESPACE_PLACEHOLDER, namespace))
            .collect()
    }

    fn absorb(&mut self, other: &Self) {
        self.dependencies.extend(other.dependencies.iter().cloned());
    }
}

/// Resolves type expressions for one source unit.
pub struct TypeResolver<'a> {
    imports: &'a ImportTable,
}

impl<'a> TypeResolver<'a> {
    pub fn new(imports: &'a ImportTable) -> Self {
        Self { imports }
    }

    /// Resolves `expr` into its text and dependencies.
    ///
    /// Unsupported expressions resolve to empty text and are logged.
    pub fn resolve(&self, expr: &Expr) -> ResolvedType {
        match expr {
            Expr::Ident { name } if primitive::is_primitive(name) => ResolvedType::opaque(name),
            Expr::Ident { name } => ResolvedType::named(format!("{NAMESPACE_PLACEHOLDER}.{name}")),
            Expr::Selector { package, name } => {
                let namespace = self.imports.namespace_of(package).unwrap_or(package.as_str());
                ResolvedType::named(name::qualify(namespace, name))
            }
            Expr::Pointer { elem } => ResolvedType::wrap("*", self.resolve(elem)),
            Expr::Array { len: None, elem } => ResolvedType::wrap("[]", self.resolve(elem)),
            Expr::Array {
                len: Some(len),
                elem,
            } => ResolvedType::wrap(&format!("[{len}]"), self.resolve(elem)),
            Expr::Ellipsis { elem } => ResolvedType::wrap("...", self.resolve(elem)),
            Expr::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                };
                ResolvedType::wrap(prefix, self.resolve(elem))
            }
            Expr::Map { key, value } => {
                let key = self.resolve(key);
                let value = self.resolve(value);
                let mut resolved = ResolvedType {
                    text: format!("map[{}]{}", key.text, value.text),
                    dependencies: key.dependencies.clone(),
                };
                resolved.absorb(&value);
                resolved
            }
            Expr::Instance { base, args } => {
                let mut resolved = self.resolve(base);
                let args: Vec<ResolvedType> = args.iter().map(|arg| self.resolve(arg)).collect();
                for arg in &args {
                    resolved.absorb(arg);
                }
                let texts: Vec<&str> = args.iter().map(|arg| arg.text.as_str()).collect();
                resolved.text = format!("{}[{}]", resolved.text, texts.join(", "));
                resolved
            }
            // Inline composites only contribute text.
            Expr::Struct { fields } => ResolvedType::opaque(&self.struct_text(fields)),
            Expr::Interface { members } => ResolvedType::opaque(&self.interface_text(members)),
            Expr::Func { signature } => {
                ResolvedType::opaque(&format!("func{}", self.signature_text(signature)))
            }
            Expr::Unsupported => {
                warn!("Unsupported type expression, leaving it blank");
                ResolvedType::default()
            }
        }
    }

    /// Where an alias of `expr` points: into the builtin namespace when the
    /// innermost element type is primitive, into its own namespace otherwise.
    pub fn alias_target_namespace(&self, expr: &Expr) -> TargetNamespace {
        let basic = self.resolve(expr.basic_type());
        if primitive::is_primitive(&basic.display()) {
            TargetNamespace::Builtin
        } else {
            TargetNamespace::Modeled
        }
    }

    fn struct_text(&self, fields: &[FieldDecl]) -> String {
        let mut parts = Vec::new();
        for field in fields {
            let ty = self.resolve(&field.ty).text;
            if field.names.is_empty() {
                parts.push(ty);
            } else {
                parts.extend(field.names.iter().map(|name| format!("{name} {ty}")));
            }
        }
        format!("struct{{{}}}", parts.join("; "))
    }

    fn interface_text(&self, members: &[InterfaceMember]) -> String {
        let parts: Vec<String> = members
            .iter()
            .map(|member| match member {
                InterfaceMember::Method { name, signature } => {
                    format!("{name}{}", self.signature_text(signature))
                }
                InterfaceMember::Embedded { ty } => self.resolve(ty).text,
            })
            .collect();
        format!("interface{{{}}}", parts.join("; "))
    }

    /// `(P1, P2) R` with one entry per declared name.
    fn signature_text(&self, signature: &FuncType) -> String {
        let params = self.expand(&signature.params);
        let results = self.expand(&signature.results);
        let clause = name::result_clause(&results);
        if clause.is_empty() {
            format!("({})", params.join(", "))
        } else {
            format!("({}) {clause}", params.join(", "))
        }
    }

    fn expand(&self, decls: &[FieldDecl]) -> Vec<String> {
        decls
            .iter()
            .flat_map(|decl| {
                let text = self.resolve(&decl.ty).text;
                std::iter::repeat_n(text, decl.names.len().max(1))
            })
            .collect()
    }
}
