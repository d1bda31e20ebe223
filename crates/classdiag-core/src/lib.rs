//! classdiag Core Types and Definitions
//!
//! This crate provides the foundational types shared by the classdiag crates:
//!
//! - **Syntax**: Syntax tree types handed over by an external scanner ([`syntax`] module)
//! - **Model**: The classifier object model and its registry ([`model`] module)
//! - **Names**: Namespace and qualified name rules ([`name`] module)
//! - **Primitives**: The built-in primitive type table ([`primitive`] module)

pub mod model;
pub mod name;
pub mod primitive;
pub mod syntax;
