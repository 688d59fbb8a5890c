//! Numerical evaluation of expression trees.
//!
//! An expression is evaluated with [`Eval::eval`] against a [`Ctxt`], which supplies the values of
//! its variables. Operators are evaluated with the [`Evaluator`](sprig_parser::Evaluator) they were
//! registered with.

pub mod consts;
pub mod ctxt;
pub mod error;
pub mod eval;

pub use ctxt::Ctxt;
pub use error::EvalError;
pub use eval::Eval;
