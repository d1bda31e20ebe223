//! The finished classifier model.

use classdiag_core::model::Registry;

/// A fully analyzed source set, ready to render.
///
/// Only shared access to the underlying [`Registry`] is handed out, so a model
/// can be rendered any number of times, in any format, with the same result.
#[derive(Debug)]
pub struct Model {
    registry: Registry,
}

impl Model {
    /// Wraps a registry whose relationships are already resolved.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
