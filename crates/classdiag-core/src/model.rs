//! The classifier object model.
//!
//! This module contains the normalized representation produced by the model
//! builder and consumed by the renderers.
//!
//! # Pipeline Position
//!
//! ```text
//! Syntax trees (syntax)
//!     ↓ model builder + relationship resolver
//! Registry (these types) - classifiers, members, edges, aliases
//!     ↓ render
//! Diagram text
//! ```
//!
//! # Organization
//!
//! - [`classifier`] - [`Classifier`], [`ClassifierKind`], [`Field`], [`Method`], [`TypeRef`]
//! - [`alias`] - [`Alias`] and its [`TargetNamespace`] tag
//! - [`registry`] - [`Registry`], the namespace → name → classifier map

pub mod alias;
pub mod classifier;
pub mod registry;

pub use alias::*;
pub use classifier::*;
pub use registry::*;
