//! Term rewriting over `sprig` expression trees.
//!
//! [`symbolic`] provides pattern matching, rewrite rules grouped into fixpoint-driven
//! transformation groups, and symbolic differentiation. [`numerical`] evaluates trees to numbers,
//! which is mostly useful to check the results of symbolic manipulation.
//!
//! ```
//! use sprig_compute::symbolic::rules;
//! use sprig_parser::parse;
//!
//! let mut expr = parse("x D ( 3 * sq ( x ) - x )").unwrap();
//! rules::differentiate().unwrap().run(&mut expr);
//! assert_eq!(expr.to_string(), "-1 + 6 * x");
//! ```
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for the plain data types of this crate.

pub mod numerical;
pub mod symbolic;
