//! Naming rules shared by the builder and the renderers.
//!
//! Namespaces are dotted paths (`pkg.a`). A qualified classifier name joins a
//! namespace and a local name with [`SEPARATOR`]; the local name never contains
//! a separator, so the last one splits the two halves apart again.

/// Separator between namespace segments and between a namespace and a local name.
pub const SEPARATOR: char = '.';

/// Canonicalizes a package or import path into a dotted namespace.
///
/// # Examples
///
/// ```
/// use classdiag_core::name::namespace_from_path;
///
/// assert_eq!(namespace_from_path("github.com/acme/shop"), "github.com.acme.shop");
/// assert_eq!(namespace_from_path("/pkg/a/"), "pkg.a");
/// ```
pub fn namespace_from_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// The last segment of an import path, used as its default local name.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

/// Joins a namespace and a local name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{SEPARATOR}{name}")
    }
}

/// Splits a qualified name at its last separator into `(namespace, local)`.
///
/// Names without a separator have an empty namespace.
///
/// # Examples
///
/// ```
/// use classdiag_core::name::split_qualified;
///
/// assert_eq!(split_qualified("pkg.a.Foo"), ("pkg.a", "Foo"));
/// assert_eq!(split_qualified("Foo"), ("", "Foo"));
/// ```
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rfind(SEPARATOR) {
        Some(idx) => (&qualified[..idx], &qualified[idx + 1..]),
        None => ("", qualified),
    }
}

/// Returns `true` if the member name is exported, i.e. starts with an
/// uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Builds an identifier containing only ASCII letters and digits.
///
/// Used in place of names whose separators would collide with namespace
/// syntax in the rendered diagram.
///
/// # Examples
///
/// ```
/// use classdiag_core::name::synthetic_identifier;
///
/// assert_eq!(synthetic_identifier("github.com.acme.Item"), "githubcomacmeItem");
/// assert_eq!(synthetic_identifier("[]shop.Item"), "shopItem");
/// ```
pub fn synthetic_identifier(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Formats a result list the way a signature writes it: nothing for no
/// results, the bare type for one, a parenthesized list otherwise.
///
/// # Examples
///
/// ```
/// use classdiag_core::name::result_clause;
///
/// assert_eq!(result_clause::<&str>(&[]), "");
/// assert_eq!(result_clause(&["error"]), "error");
/// assert_eq!(result_clause(&["int", "error"]), "(int, error)");
/// ```
pub fn result_clause<S: AsRef<str>>(results: &[S]) -> String {
    match results {
        [] => String::new(),
        [single] => single.as_ref().to_string(),
        many => {
            let joined: Vec<&str> = many.iter().map(AsRef::as_ref).collect();
            format!("({})", joined.join(", "))
        }
    }
}
