//! Type aliases and their targets.

use crate::{
    name::{self, SEPARATOR},
    primitive::BUILTIN_NAMESPACE,
};

/// Which namespace an alias target lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetNamespace {
    /// The target bottoms out in a built-in primitive.
    Builtin,
    /// The target is a modeled type; it is qualified by the alias's namespace.
    Modeled,
}

/// A type defined as another type expression, e.g. `type Status int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    namespace: String,
    name: String,
    target: String,
    target_namespace: TargetNamespace,
    synthetic_target: Option<String>,
}

impl Alias {
    /// Creates an alias.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Namespace the alias is declared in.
    /// * `name` - Local name of the alias.
    /// * `target` - Display form of the underlying type.
    /// * `target_namespace` - Whether the underlying type is a built-in primitive.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
        target_namespace: TargetNamespace,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            target: target.into(),
            target_namespace,
            synthetic_target: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        name::qualify(&self.namespace, &self.name)
    }

    /// Display form of the underlying type.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn target_namespace(&self) -> TargetNamespace {
        self.target_namespace
    }

    /// The namespace prefix used for the target: [`BUILTIN_NAMESPACE`] or the
    /// alias's own namespace.
    pub fn target_namespace_name(&self) -> &str {
        match self.target_namespace {
            TargetNamespace::Builtin => BUILTIN_NAMESPACE,
            TargetNamespace::Modeled => &self.namespace,
        }
    }

    /// `<target namespace>.<target>`
    pub fn qualified_target(&self) -> String {
        name::qualify(self.target_namespace_name(), &self.target)
    }

    /// Whether the target carries separators that would break namespace
    /// syntax, so it has to be drawn under a synthetic identifier.
    pub fn needs_synthetic_target(&self) -> bool {
        self.target.contains(SEPARATOR)
    }

    /// Draws the target under `synthetic`, an identifier registered with
    /// [`Registry::rename`](super::Registry::rename).
    ///
    /// # Examples
    ///
    /// ```
    /// use classdiag_core::model::{Alias, Registry, TargetNamespace};
    ///
    /// let mut registry = Registry::new();
    /// let alias = Alias::new("main", "Clock", "time.Time", TargetNamespace::Modeled);
    /// assert!(alias.needs_synthetic_target());
    ///
    /// let synthetic = registry.rename(alias.target_namespace_name(), alias.target());
    /// let alias = alias.with_synthetic_target(synthetic);
    /// assert_eq!(alias.qualified_target(), "main.time.Time");
    /// assert_eq!(alias.synthetic_target(), Some("timeTime"));
    /// ```
    pub fn with_synthetic_target(mut self, synthetic: impl Into<String>) -> Self {
        self.synthetic_target = Some(synthetic.into());
        self
    }

    /// The identifier the target is drawn under, if it was renamed.
    pub fn synthetic_target(&self) -> Option<&str> {
        self.synthetic_target.as_deref()
    }
}
