//! The rewriting engine.
//!
//! Every rewrite, whether a structural pass like [`Flattening`] or a [`PatternRule`], implements
//! the [`Transformation`] trait. Transformations are grouped into [`TransformationGroup`]s that
//! apply them to a tree, bottom-up, until a full pass changes nothing. Groups can be chained into
//! a [`Pipeline`] of sequential phases.

mod differentiate;
mod evaluate;
mod flatten;
mod order;
mod rule;
mod simplify;

use sprig_parser::Expr;
use std::fmt;
use super::step_collector::StepCollector;

pub use differentiate::TemplateDifferentiation;
pub use evaluate::Evaluation;
pub use flatten::Flattening;
pub use order::{canonical_cmp, CanonicalOrdering};
pub use rule::{PatternRule, RuleError};
pub use simplify::Simplification;

/// The default maximum number of passes a [`TransformationGroup`] makes before giving up.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// A single rewrite operation on an expression tree.
pub trait Transformation: Send + Sync {
    /// Returns a short name for the transformation, used in logs and steps.
    fn name(&self) -> &str;

    /// Applies the transformation to the given node only, replacing it in place. Returns true if
    /// the node was changed.
    fn apply_at_root(&self, node: &mut Expr) -> bool;

    /// Applies the transformation to every node of the tree, children before their parent.
    /// Returns true if any node was changed.
    fn apply_recursively(&self, tree: &mut Expr) -> bool {
        let mut changed = false;
        tree.visit_post_order_mut(&mut |node| changed |= self.apply_at_root(node));
        changed
    }
}

impl fmt::Debug for dyn Transformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Transformation({})", self.name())
    }
}

/// A transformation that changed the tree during a pass of a [`TransformationGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// The name of the group the transformation belongs to.
    pub group: String,

    /// The pass, starting at 1, in which the transformation changed the tree.
    pub pass: usize,

    /// The name of the transformation.
    pub transformation: String,
}

/// The outcome of running a [`TransformationGroup`] or [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fixpoint {
    /// A full pass changed nothing.
    Converged {
        /// The number of passes made, including the final pass that changed nothing.
        passes: usize,

        /// Whether any pass changed the tree.
        changed: bool,
    },

    /// The maximum number of passes was reached while the tree was still changing.
    NonConvergent {
        /// The number of passes made.
        passes: usize,
    },
}

impl Fixpoint {
    /// Returns true if the tree was changed.
    pub fn changed(&self) -> bool {
        match self {
            Self::Converged { changed, .. } => *changed,
            Self::NonConvergent { .. } => true,
        }
    }

    /// Returns true if a fixpoint was reached.
    pub fn converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Returns the number of passes made.
    pub fn passes(&self) -> usize {
        match self {
            Self::Converged { passes, .. } | Self::NonConvergent { passes } => *passes,
        }
    }

    /// Combines the outcomes of two phases run one after the other.
    pub fn then(self, next: Fixpoint) -> Fixpoint {
        let passes = self.passes() + next.passes();
        if self.converged() && next.converged() {
            Self::Converged { passes, changed: self.changed() || next.changed() }
        } else {
            Self::NonConvergent { passes }
        }
    }
}

/// An ordered list of transformations, applied to a tree until it stops changing.
#[derive(Debug)]
pub struct TransformationGroup {
    name: String,
    transformations: Vec<Box<dyn Transformation>>,
    max_passes: usize,
}

impl TransformationGroup {
    /// Creates an empty group with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transformations: Vec::new(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Appends a transformation to the group.
    pub fn with(mut self, transformation: impl Transformation + 'static) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    /// Appends every transformation of the iterator to the group.
    pub fn with_all<T: Transformation + 'static>(mut self, transformations: impl IntoIterator<Item = T>) -> Self {
        self.transformations.extend(
            transformations
                .into_iter()
                .map(|t| Box::new(t) as Box<dyn Transformation>),
        );
        self
    }

    /// Sets the maximum number of passes to make before reporting
    /// [`Fixpoint::NonConvergent`].
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Returns the name of the group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the transformations of the group, in the order they are applied.
    pub fn transformations(&self) -> &[Box<dyn Transformation>] {
        &self.transformations
    }

    /// Returns the maximum number of passes the group makes.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Applies the group to the tree until a full pass changes nothing, or the maximum number of
    /// passes is reached.
    pub fn run(&self, tree: &mut Expr) -> Fixpoint {
        self.run_with_steps(tree, &mut ())
    }

    /// Applies the group like [`TransformationGroup::run`], recording a [`Step`] for every
    /// transformation that changes the tree.
    pub fn run_with_steps(&self, tree: &mut Expr, steps: &mut dyn StepCollector<Step>) -> Fixpoint {
        let mut changed = false;

        for pass in 1..=self.max_passes {
            let mut pass_changed = false;
            for transformation in &self.transformations {
                if transformation.apply_recursively(tree) {
                    tracing::trace!(
                        target: "sprig::transform",
                        group = %self.name,
                        pass,
                        transformation = transformation.name(),
                        "transformation applied"
                    );
                    steps.push(Step {
                        group: self.name.clone(),
                        pass,
                        transformation: transformation.name().to_string(),
                    });
                    pass_changed = true;
                }
            }

            if !pass_changed {
                tracing::debug!(target: "sprig::transform", group = %self.name, passes = pass, "reached fixpoint");
                return Fixpoint::Converged { passes: pass, changed };
            }
            changed = true;
        }

        tracing::warn!(
            target: "sprig::transform",
            group = %self.name,
            max_passes = self.max_passes,
            "no fixpoint within the maximum number of passes"
        );
        Fixpoint::NonConvergent { passes: self.max_passes }
    }

    /// Applies the group and returns true if the tree was changed.
    pub fn apply(&self, tree: &mut Expr) -> bool {
        self.run(tree).changed()
    }
}

/// A sequence of groups, each run to its own fixpoint before the next one starts.
#[derive(Debug, Default)]
pub struct Pipeline {
    phases: Vec<TransformationGroup>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a phase to the pipeline.
    pub fn then(mut self, phase: TransformationGroup) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the phases of the pipeline, in order.
    pub fn phases(&self) -> &[TransformationGroup] {
        &self.phases
    }

    /// Runs every phase in order.
    pub fn run(&self, tree: &mut Expr) -> Fixpoint {
        self.run_with_steps(tree, &mut ())
    }

    /// Runs every phase in order, recording the steps of each.
    pub fn run_with_steps(&self, tree: &mut Expr, steps: &mut dyn StepCollector<Step>) -> Fixpoint {
        self.phases
            .iter()
            .fold(Fixpoint::Converged { passes: 0, changed: false }, |outcome, phase| {
                outcome.then(phase.run_with_steps(tree, steps))
            })
    }
}
