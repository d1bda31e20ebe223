//! The classifier registry.
//!
//! [`Registry`] owns every classifier discovered during a build, grouped by
//! namespace, along with the alias table and the table of synthetic names
//! registered for alias targets. One registry belongs to one build.
//!
//! Collections keep insertion order. Consumers that produce output must sort
//! what they emit rather than rely on that order.

use indexmap::IndexMap;

use super::{Alias, Classifier, ClassifierKind};
use crate::name;

/// Classifiers keyed by local name.
pub type ClassifierMap = IndexMap<String, Classifier>;

/// Namespace → classifier name → [`Classifier`], plus the alias tables.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    namespaces: IndexMap<String, ClassifierMap>,
    aliases: IndexMap<String, Alias>,
    renamed: IndexMap<String, IndexMap<String, String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a namespace, even if it ends up declaring nothing.
    pub fn ensure_namespace(&mut self, namespace: &str) {
        if !self.namespaces.contains_key(namespace) {
            self.namespaces
                .insert(namespace.to_string(), ClassifierMap::new());
        }
    }

    /// Returns the classifier `name` in `namespace`, creating an empty one on
    /// first use.
    pub fn get_or_create(&mut self, namespace: &str, name: &str) -> &mut Classifier {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .entry(name.to_string())
            .or_insert_with(|| Classifier::new(namespace, name))
    }

    /// Looks up a classifier by qualified name.
    pub fn get(&self, qualified: &str) -> Option<&Classifier> {
        let (namespace, local) = name::split_qualified(qualified);
        self.namespaces.get(namespace)?.get(local)
    }

    /// Looks up a classifier by qualified name for mutation.
    pub fn get_mut(&mut self, qualified: &str) -> Option<&mut Classifier> {
        let (namespace, local) = name::split_qualified(qualified);
        self.namespaces.get_mut(namespace)?.get_mut(local)
    }

    /// Iterates over namespaces and their classifiers in insertion order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &ClassifierMap)> {
        self.namespaces
            .iter()
            .map(|(namespace, classifiers)| (namespace.as_str(), classifiers))
    }

    /// Iterates over every classifier in insertion order.
    pub fn classifiers(&self) -> impl Iterator<Item = &Classifier> {
        self.namespaces.values().flat_map(|classifiers| classifiers.values())
    }

    /// Iterates over the classifiers currently holding `kind`.
    pub fn classifiers_of(&self, kind: ClassifierKind) -> impl Iterator<Item = &Classifier> {
        self.classifiers()
            .filter(move |classifier| classifier.kind() == Some(kind))
    }

    /// Total number of classifiers.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records an alias, keyed by its qualified name. A later alias with the
    /// same qualified name replaces the earlier one.
    pub fn add_alias(&mut self, alias: Alias) {
        self.aliases.insert(alias.qualified_name(), alias);
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    /// Returns the synthetic identifier that stands for `original` within
    /// `namespace`, registering one on first use.
    ///
    /// The identifier keeps only the ASCII letters and digits of `original`.
    /// When that is already taken by a different original, a numeric suffix
    /// is appended, so distinct originals never share an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdiag_core::model::Registry;
    ///
    /// let mut registry = Registry::new();
    /// assert_eq!(registry.rename("p", "q.Foo"), "qFoo");
    /// assert_eq!(registry.rename("p", "[]q.Foo"), "qFoo2");
    /// assert_eq!(registry.rename("p", "q.Foo"), "qFoo");
    /// assert_eq!(registry.original_name("p", "qFoo2"), Some("[]q.Foo"));
    /// ```
    pub fn rename(&mut self, namespace: &str, original: &str) -> String {
        let names = self.renamed.entry(namespace.to_string()).or_default();
        if let Some((synthetic, _)) = names.iter().find(|(_, known)| *known == original) {
            return synthetic.clone();
        }

        let base = name::synthetic_identifier(original);
        let mut synthetic = base.clone();
        let mut suffix = 2;
        while names.contains_key(&synthetic) {
            synthetic = format!("{base}{suffix}");
            suffix += 1;
        }
        names.insert(synthetic.clone(), original.to_string());
        synthetic
    }

    /// Synthetic → original names registered for `namespace`.
    pub fn renamed(&self, namespace: &str) -> Option<&IndexMap<String, String>> {
        self.renamed.get(namespace)
    }

    /// Iterates over every namespace that has synthetic identifiers, including
    /// pseudo-namespaces that hold no classifiers.
    pub fn renamed_namespaces(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.renamed
            .iter()
            .map(|(namespace, names)| (namespace.as_str(), names))
    }

    /// The original name a synthetic identifier stands for.
    pub fn original_name(&self, namespace: &str, synthetic: &str) -> Option<&str> {
        self.renamed
            .get(namespace)?
            .get(synthetic)
            .map(String::as_str)
    }
}
