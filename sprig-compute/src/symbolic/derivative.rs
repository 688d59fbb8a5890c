//! Template-driven symbolic differentiation.
//!
//! Each operator that can be differentiated carries a postfix template describing its derivative
//! (see [`Operator::derivative`](sprig_parser::Operator)). In a template, `#n` stands for a copy
//! of the `n`-th operand and `##n` for the derivative of the `n`-th operand. For example, the
//! product rule is `##0 #1 * #0 ##1 * +`.
//!
//! To build a derivative, the template is lexed, each reference is replaced by the tree it
//! stands for, and the symbols are reduced by the same postfix reducer the parser uses.

use sprig_parser::{
    parser::{from_postfix, lex, SymbolKind},
    symbol,
    Expr,
    SymbolTable,
    Value,
};
use std::{borrow::Cow, fmt};
use super::transform::{Simplification, Transformation};

/// An error that can occur while building a derivative.
#[derive(Debug)]
pub enum DerivativeError {
    /// The operator's template refers to an operand the node does not have.
    ArityMismatch {
        /// The name of the operator.
        operator: String,

        /// The operand index used by the template.
        index: usize,

        /// The number of operands the node has.
        operands: usize,
    },

    /// The operator has no derivative template.
    NotDifferentiable {
        /// The name of the operator.
        operator: String,
    },

    /// The operator's template is not a valid postfix expression.
    Template {
        /// The name of the operator.
        operator: String,

        /// The error produced while lexing or reducing the template.
        error: sprig_error::Error,
    },
}

impl fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ArityMismatch { operator, index, operands } => write!(
                f,
                "the derivative template of `{}` uses operand {}, but the node has {} operand(s)",
                operator,
                index,
                operands,
            ),
            Self::NotDifferentiable { operator } => {
                write!(f, "`{}` has no derivative template", operator)
            },
            Self::Template { operator, error } => {
                write!(f, "the derivative template of `{}` is invalid: {}", operator, error)
            },
        }
    }
}

impl std::error::Error for DerivativeError {}

/// A reference to an operand inside a derivative template.
enum Reference {
    /// `#n`: a copy of the operand.
    Operand(usize),

    /// `##n`: the derivative of the operand.
    Derivative(usize),
}

impl Reference {
    /// Parses a template word as a reference.
    fn parse(word: &str) -> Option<Self> {
        if let Some(index) = word.strip_prefix("##") {
            index.parse().ok().map(Self::Derivative)
        } else {
            word.strip_prefix('#')?.parse().ok().map(Self::Operand)
        }
    }

    /// Returns the index of the operand referred to.
    fn index(&self) -> usize {
        match self {
            Self::Operand(index) | Self::Derivative(index) => *index,
        }
    }
}

/// Returns the derivative of `node` with respect to the variable named `wrt`.
///
/// Leaves differentiate to `1` if they are the variable `wrt`, and `0` otherwise. Operator nodes
/// are differentiated with their operator's template. A fully-associative node with more than two
/// operands `a, b, c, ...` is treated as `a op (b op c op ...)`.
///
/// The result is cleaned of the trivial identities the templates introduce, such as factors of
/// `1` and terms multiplied by `0`.
///
/// Templates are read with the process-wide symbol table. Use [`derivative_with_table`] for trees
/// built with a caller-owned table.
pub fn derivative(node: &Expr, wrt: &str) -> Result<Expr, DerivativeError> {
    derivative_with_table(node, wrt, &symbol::global())
}

/// Returns the derivative of `node` with respect to the variable named `wrt`, reading derivative
/// templates with the given symbol table.
pub fn derivative_with_table(node: &Expr, wrt: &str, table: &SymbolTable) -> Result<Expr, DerivativeError> {
    let mut result = build(node, wrt, table)?;
    while Simplification.apply_recursively(&mut result) {}
    Ok(result)
}

/// Builds the derivative of `node` without cleaning it up.
fn build(node: &Expr, wrt: &str, table: &SymbolTable) -> Result<Expr, DerivativeError> {
    let op = match &node.value {
        Value::Operator(op) if !node.is_leaf() => op,
        Value::Variable(var) if var.name == wrt => return Ok(Expr::scalar(1.0)),
        _ => return Ok(Expr::scalar(0.0)),
    };

    let template = op.derivative.as_deref().ok_or_else(|| DerivativeError::NotDifferentiable {
        operator: op.name.clone(),
    })?;

    let operands: Cow<[Expr]> = if op.arity == 2 && node.child_count() > 2 {
        let rest = Expr::operator(op.clone(), node.children[1..].to_vec());
        Cow::Owned(vec![node.children[0].clone(), rest])
    } else {
        Cow::Borrowed(&node.children)
    };

    let template_error = |error| DerivativeError::Template { operator: op.name.clone(), error };
    let mut symbols = lex(template, table).map_err(template_error)?;

    for symbol in &mut symbols {
        let SymbolKind::Variable(word) = &symbol.kind else {
            continue;
        };
        let Some(reference) = Reference::parse(word) else {
            continue;
        };

        let index = reference.index();
        let operand = operands.get(index).ok_or_else(|| DerivativeError::ArityMismatch {
            operator: op.name.clone(),
            index,
            operands: operands.len(),
        })?;

        let subtree = match reference {
            Reference::Operand(_) => operand.copy(),
            Reference::Derivative(_) => build(operand, wrt, table)?,
        };
        symbol.kind = SymbolKind::Subtree(subtree);
    }

    from_postfix(symbols).map_err(template_error)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use sprig_parser::{parse, parse_postfix, symbol::Operator, Parser};
    use crate::numerical::Eval;
    use super::*;

    /// Asserts that `d/dx f` and `g` agree at 200 points in `[-10, 10)`.
    fn assert_derivative(f: &str, g: &str) {
        let d = derivative(&parse(f).unwrap(), "x").unwrap();
        let g = parse(g).unwrap();
        for i in -100..100 {
            let x = i as f64 / 10.0;
            assert_float_absolute_eq!(d.eval_at(x).unwrap(), g.eval_at(x).unwrap(), 1e-4);
        }
    }

    #[test]
    fn leaves() {
        assert_eq!(derivative(&parse("x").unwrap(), "x").unwrap(), Expr::scalar(1.0));
        assert_eq!(derivative(&parse("y").unwrap(), "x").unwrap(), Expr::scalar(0.0));
        assert_eq!(derivative(&parse("4").unwrap(), "x").unwrap(), Expr::scalar(0.0));
    }

    #[test]
    fn polynomial() {
        assert_derivative("x ^ 2 + 3 * x - 5", "2 * x + 3");
    }

    #[test]
    fn polynomial_postfix_form() {
        let f = parse_postfix("x sq 3 x * + 5 -").unwrap();
        let d = derivative(&f, "x").unwrap();
        let g = parse_postfix("2 x * 3 +").unwrap();
        for i in -100..100 {
            let x = i as f64 / 10.0;
            assert_float_absolute_eq!(d.eval_at(x).unwrap(), g.eval_at(x).unwrap(), 1e-4);
        }
    }

    #[test]
    fn chain_rule() {
        assert_derivative("sin ( x ^ 2 )", "cos ( x ^ 2 ) * 2 * x");
        assert_derivative("exp ( 3 * x )", "3 * exp ( 3 * x )");
        assert_derivative("cos ( sq ( x ) ) + ln ( sq ( x ) + 1 )", "-2 * x * sin ( sq ( x ) ) + 2 * x / ( sq ( x ) + 1 )");
    }

    #[test]
    fn quotient() {
        assert_derivative("x / ( sq ( x ) + 1 )", "( 1 - sq ( x ) ) / sq ( sq ( x ) + 1 )");
    }

    #[test]
    fn identities_are_removed() {
        let d = derivative(&parse("3 * x").unwrap(), "x").unwrap();
        assert_eq!(d, Expr::scalar(3.0));

        let d = derivative(&parse("y * x").unwrap(), "x").unwrap();
        assert_eq!(d, parse("y").unwrap());
    }

    #[test]
    fn flattened_operands() {
        let mut tree = parse("x * x * x").unwrap();
        crate::symbolic::transform::Flattening.apply_recursively(&mut tree);
        assert_eq!(tree.child_count(), 3);

        let d = derivative(&tree, "x").unwrap();
        for i in -20..20 {
            let x = i as f64 / 4.0;
            assert_float_absolute_eq!(d.eval_at(x).unwrap(), 3.0 * x * x, 1e-9);
        }
    }

    #[test]
    fn other_variables_are_constants() {
        let d = derivative(&parse("y ^ 2 + x * y").unwrap(), "y").unwrap();
        let mut ctxt = crate::numerical::Ctxt::new();
        ctxt.add_var("x", 3.0);
        ctxt.add_var("y", 2.0);
        assert_float_absolute_eq!(d.eval(&ctxt).unwrap(), 7.0, 1e-9);
    }

    #[test]
    fn missing_template() {
        let err = derivative(&parse("x D x").unwrap(), "x").unwrap_err();
        assert!(matches!(err, DerivativeError::NotDifferentiable { ref operator } if operator == "D"));
    }

    #[test]
    fn arity_mismatch() {
        let mut table = SymbolTable::standard();
        let bad = table
            .register(Operator::new("twice", 1, 4).unary(|a| 2.0 * a).derivative("2 ##1 *"))
            .unwrap();
        let node = Expr::operator(bad, vec![Expr::variable("x")]);

        let err = derivative(&node, "x").unwrap_err();
        assert!(matches!(
            err,
            DerivativeError::ArityMismatch { index: 1, operands: 1, .. },
        ));
    }

    #[test]
    fn caller_owned_table() {
        let mut table = SymbolTable::standard();
        table.register(Operator::new("sec2", 1, 4).unary(|a| 1.0 / (a.cos() * a.cos()))).unwrap();
        table
            .register(Operator::new("tan", 1, 4).unary(f64::tan).derivative("#0 sec2 ##0 *"))
            .unwrap();

        let f = Parser::with_table("tan ( 2 * x )", &table).parse_infix().unwrap();
        let d = derivative_with_table(&f, "x", &table).unwrap();
        let expected = Parser::with_table("sec2 ( 2 * x ) * 2", &table).parse_infix().unwrap();
        assert_eq!(d, expected);
    }
}
