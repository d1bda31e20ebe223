//! Syntax tree types handed over by the source scanner.
//!
//! The scanner that turns source text into these trees is an external
//! collaborator. It produces a [`SourceSet`], usually serialized as JSON, made
//! of [`Package`]s (one per namespace), each holding [`SourceUnit`]s (one per
//! file) with their imports and top-level declarations.
//!
//! # Expression shapes
//!
//! [`Expr`] is a closed set of type expression shapes. Shapes the scanner could
//! not classify are carried as [`Expr::Unsupported`] instead of failing the
//! whole document.
//!
//! # Example
//!
//! ```
//! # use classdiag_core::syntax::{Expr, SourceSet};
//! let json = r#"{ "packages": [ { "path": "pkg/a", "units": [ {
//!     "name": "a.go",
//!     "decls": [ { "kind": "type", "name": "Id", "type": { "kind": "ident", "name": "int" } } ]
//! } ] } ] }"#;
//!
//! let set: SourceSet = serde_json::from_str(json).unwrap();
//! assert_eq!(set.packages[0].units[0].decls.len(), 1);
//! ```

use serde::Deserialize;

/// Root of a scanned source tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceSet {
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One namespace grouping, e.g. a directory of source files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    /// Slash or dot separated namespace path, e.g. `pkg/a`.
    pub path: String,
    #[serde(default)]
    pub units: Vec<SourceUnit>,
}

/// A single parsed source file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceUnit {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

/// An import declaration: `import name "path"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportSpec {
    /// Explicit local name, `_` or `.` when present.
    #[serde(default)]
    pub name: Option<String>,
    pub path: String,
}

/// Top-level declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    /// `type Name <expr>`.
    Type {
        name: String,
        #[serde(rename = "type")]
        ty: Expr,
    },
    /// A function, or a method when `receiver` is set.
    Func {
        name: String,
        #[serde(default)]
        receiver: Option<FieldDecl>,
        #[serde(default)]
        signature: FuncType,
    },
    /// Variables, constants and anything else a class diagram does not need.
    #[serde(other)]
    Other,
}

/// A field, parameter or result entry. Several names may share one type;
/// no names means an embedded field or an unnamed parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: Expr,
}

impl FieldDecl {
    /// An unnamed entry of the given type.
    pub fn anonymous(ty: Expr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    /// An entry with a single name.
    pub fn named(name: impl Into<String>, ty: Expr) -> Self {
        Self {
            names: vec![name.into()],
            ty,
        }
    }
}

/// Parameter and result lists of a function signature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FuncType {
    #[serde(default)]
    pub params: Vec<FieldDecl>,
    #[serde(default)]
    pub results: Vec<FieldDecl>,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// An element of an interface body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterfaceMember {
    /// A method signature.
    Method {
        name: String,
        #[serde(default)]
        signature: FuncType,
    },
    /// An embedded element: another interface, or a type constraint.
    Embedded {
        #[serde(rename = "type")]
        ty: Expr,
    },
}

/// Type expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// `Name`
    Ident { name: String },
    /// `package.Name`
    Selector { package: String, name: String },
    /// `*T`
    Pointer { elem: Box<Expr> },
    /// `[]T` or `[N]T`
    Array {
        #[serde(default)]
        len: Option<String>,
        elem: Box<Expr>,
    },
    /// `map[K]V`
    Map { key: Box<Expr>, value: Box<Expr> },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<Expr>,
    },
    /// `...T`
    Ellipsis { elem: Box<Expr> },
    /// `struct { ... }`
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    /// `interface { ... }`
    Interface {
        #[serde(default)]
        members: Vec<InterfaceMember>,
    },
    /// `func(...) ...`
    Func {
        #[serde(flatten)]
        signature: FuncType,
    },
    /// `Base[A, B]`
    Instance { base: Box<Expr>, args: Vec<Expr> },
    #[serde(other)]
    Unsupported,
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident { name: name.into() }
    }

    pub fn selector(package: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Selector {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: Expr) -> Self {
        Expr::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: Expr) -> Self {
        Expr::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Expr, value: Expr) -> Self {
        Expr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(elem: Expr) -> Self {
        Expr::Chan {
            dir: ChanDir::Both,
            elem: Box::new(elem),
        }
    }

    pub fn ellipsis(elem: Expr) -> Self {
        Expr::Ellipsis {
            elem: Box::new(elem),
        }
    }

    /// Strips array, pointer, map, channel and variadic wrappers down to the
    /// innermost element type. Maps unwrap to their value type.
    ///
    /// ```
    /// # use classdiag_core::syntax::Expr;
    /// let expr = Expr::pointer(Expr::slice(Expr::map(Expr::ident("string"), Expr::ident("Foo"))));
    /// assert_eq!(expr.basic_type(), &Expr::ident("Foo"));
    /// ```
    pub fn basic_type(&self) -> &Expr {
        match self {
            Expr::Pointer { elem }
            | Expr::Array { elem, .. }
            | Expr::Chan { elem, .. }
            | Expr::Ellipsis { elem } => elem.basic_type(),
            Expr::Map { value, .. } => value.basic_type(),
            _ => self,
        }
    }

    /// The bare type name behind pointer and generic instantiation wrappers,
    /// as written on a method receiver.
    pub fn receiver_name(&self) -> Option<&str> {
        match self {
            Expr::Ident { name } => Some(name),
            Expr::Pointer { elem } => elem.receiver_name(),
            Expr::Instance { base, .. } => base.receiver_name(),
            _ => None,
        }
    }
}
