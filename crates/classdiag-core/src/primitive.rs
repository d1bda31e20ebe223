//! Built-in primitive types.
//!
//! Primitive types never become classifiers and never produce dependency
//! edges. Aliases whose underlying type bottoms out in a primitive are tagged
//! with the [`BUILTIN_NAMESPACE`] pseudo-namespace.

/// Pseudo-namespace for aliases of built-in primitive types.
pub const BUILTIN_NAMESPACE: &str = "builtin";

const PRIMITIVES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
    "any",
];

/// Returns `true` if `name` is a built-in primitive type name.
///
/// A single leading pointer marker is accepted, so `*int` is primitive too.
///
/// # Examples
///
/// ```
/// use classdiag_core::primitive::is_primitive;
///
/// assert!(is_primitive("string"));
/// assert!(is_primitive("*error"));
/// assert!(!is_primitive("Foo"));
/// ```
pub fn is_primitive(name: &str) -> bool {
    let name = name.strip_prefix('*').unwrap_or(name);
    PRIMITIVES.contains(&name)
}
