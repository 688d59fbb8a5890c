//! Errors that can occur while lexing or parsing an expression.
//!
//! Every error is a [`sprig_error::Error`] carrying one of the kinds in [`kind`] and the spans of
//! source text it points at.

pub mod kind;

pub use sprig_error::Error;
