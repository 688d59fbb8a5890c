//! Rendering of expression trees back into source text.

use crate::{symbol::{Associativity, Operator}, value::{Expr, Value}};
use std::fmt::{Display, Formatter, Result};

/// Returns true if `child`, the `index`-th operand of an operator node `parent`, must be wrapped
/// in parentheses to be read back as the same tree.
fn needs_parens(parent: &Operator, child: &Expr, index: usize) -> bool {
    let Some(child_op) = child.op() else {
        return false;
    };

    // function-like operators carry their own parentheses
    if child_op.arity == 1 {
        return false;
    }

    match child_op.precedence.cmp(&parent.precedence) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => match parent.associativity {
            Associativity::Right => index == 0,
            _ => index > 0,
        },
    }
}

/// Writes the operand, wrapped in parentheses if needed.
fn fmt_operand(f: &mut Formatter, parent: &Operator, child: &Expr, index: usize) -> Result {
    if needs_parens(parent, child, index) {
        write!(f, "( {} )", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Formats the expression in infix notation, with spaces between tokens. Operators of one operand
/// are written as `name ( operand )`.
///
/// Any tree produced by the parser is formatted as text that parses back into an equal tree.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let op = match &self.value {
            Value::Operator(op) if !self.is_leaf() => op,
            value => return write!(f, "{}", value),
        };

        if op.arity == 1 {
            write!(f, "{} (", op.name)?;
            for child in &self.children {
                write!(f, " {}", child)?;
            }
            return write!(f, " )");
        }

        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", op.name)?;
            }
            fmt_operand(f, op, child, i)?;
        }
        Ok(())
    }
}

/// A wrapper type that formats an expression in postfix notation. Created by
/// [`Expr::as_postfix`].
pub struct PostfixFormatter<'a>(&'a Expr);

impl Display for PostfixFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let mut first = true;
        for node in self.0.post_order() {
            if !first {
                write!(f, " ")?;
            }
            first = false;

            // flattened nodes are written as a chain of binary operations
            let repeats = match &node.value {
                Value::Operator(op) if op.arity == 2 && node.child_count() > 2 => node.child_count() - 1,
                _ => 1,
            };
            for i in 0..repeats {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", node.value)?;
            }
        }
        Ok(())
    }
}

impl Expr {
    /// Wraps the expression in a [`PostfixFormatter`], which implements [`Display`].
    pub fn as_postfix(&self) -> PostfixFormatter<'_> {
        PostfixFormatter(self)
    }
}
