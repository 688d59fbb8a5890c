//! Symbolic manipulation of expression trees.
//!
//! - [`pattern`] matches trees against patterns and instantiates templates.
//! - [`transform`] is the rewriting engine: transformations, groups and pipelines.
//! - [`derivative`] builds derivatives from the operators' derivative templates.
//! - [`rules`] holds the standard rule sets, groups and pipelines.

pub mod derivative;
pub mod pattern;
pub mod rules;
pub mod step_collector;
pub mod transform;

pub use derivative::{derivative, derivative_with_table, DerivativeError};
pub use rules::{differentiate, normalization};
pub use transform::{Fixpoint, Pipeline, Transformation, TransformationGroup};
