//! Per-unit import alias tables.

use indexmap::IndexMap;
use log::trace;

use classdiag_core::{name, syntax::ImportSpec};

/// Maps the local package names visible in one source unit to the dotted
/// namespaces they import.
///
/// An explicit import name wins; otherwise the last segment of the import
/// path is used. Blank (`_`) and dot (`.`) imports introduce no name and are
/// left out.
#[derive(Debug, Default)]
pub struct ImportTable {
    entries: IndexMap<String, String>,
}

impl ImportTable {
    pub fn from_specs(specs: &[ImportSpec]) -> Self {
        let mut entries = IndexMap::new();
        for spec in specs {
            let local = match spec.name.as_deref() {
                Some("_") | Some(".") => {
                    trace!(path = spec.path; "Skipping import without a local name");
                    continue;
                }
                Some(explicit) => explicit.to_string(),
                None => name::last_segment(&spec.path).to_string(),
            };
            if local.is_empty() {
                continue;
            }
            entries.insert(local, name::namespace_from_path(&spec.path));
        }
        Self { entries }
    }

    /// The namespace a local package name refers to, if it was imported.
    pub fn namespace_of(&self, local: &str) -> Option<&str> {
        self.entries.get(local).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            name: name.map(str::to_string),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_default_name_is_last_segment() {
        let table = ImportTable::from_specs(&[spec(None, "github.com/acme/store")]);

        assert_eq!(table.namespace_of("store"), Some("github.com.acme.store"));
        assert_eq!(table.namespace_of("acme"), None);
    }

    #[test]
    fn test_explicit_name_wins() {
        let table = ImportTable::from_specs(&[spec(Some("db"), "pkg/storage")]);

        assert_eq!(table.namespace_of("db"), Some("pkg.storage"));
        assert_eq!(table.namespace_of("storage"), None);
    }

    #[test]
    fn test_blank_and_dot_imports_are_skipped() {
        let table = ImportTable::from_specs(&[
            spec(Some("_"), "pkg/driver"),
            spec(Some("."), "pkg/dsl"),
        ]);

        assert!(table.is_empty());
    }
}
