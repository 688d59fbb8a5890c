//! Expression trees and the parser that builds them.
//!
//! Expressions are N-ary [`Tree`]s of [`Value`]s. Source text is parsed with [`parse`] (infix)
//! or [`parse_postfix`] (reverse-Polish), using the operators registered in the process-wide
//! [`SymbolTable`]:
//!
//! ```
//! use sprig_parser::parse;
//!
//! let expr = parse("x ^ 2 + 3 * x - 5").unwrap();
//! assert!(expr.is_operator("-"));
//! assert_eq!(expr.to_string(), "x ^ 2 + 3 * x - 5");
//! ```

pub mod parser;
pub mod symbol;
pub mod tokenizer;
pub mod tree;
pub mod value;

pub use parser::{parse, parse_postfix, Parser};
pub use symbol::{Associativity, Evaluator, Operator, SymbolTable};
pub use tree::Tree;
pub use value::{Expr, MatchClass, Value, Variable};
