use sprig_parser::{Evaluator, Expr};
use super::Transformation;

/// Folds scalar operands of operator nodes that have an evaluator.
///
/// A node is folded when it has at least as many scalar operands as its operator's arity. Unary
/// operators replace their single scalar operand with the result. Binary operators reduce all of
/// their scalar operands from left to right, and the result takes the place of the first one. A
/// node left with the result as its only operand collapses into a scalar leaf.
///
/// Non-finite results, like the result of dividing by zero, are kept as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluation;

impl Transformation for Evaluation {
    fn name(&self) -> &str {
        "evaluate"
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        let Some(op) = node.op() else {
            return false;
        };
        let Some(evaluator) = op.evaluator else {
            return false;
        };

        let scalars = node.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| Some((i, child.as_scalar()?)))
            .collect::<Vec<_>>();
        if scalars.len() < op.arity {
            return false;
        }

        let result = match evaluator {
            Evaluator::Unary(f) if node.child_count() == 1 => f(scalars[0].1),
            Evaluator::Unary(_) => return false,
            Evaluator::Binary(f) => {
                // only operands of a commutative operator may be gathered across other operands
                if !op.commutative && scalars.len() != node.child_count() {
                    return false;
                }
                scalars[1..].iter().fold(scalars[0].1, |acc, &(_, n)| f(acc, n))
            },
        };

        let first = scalars[0].0;
        let mut index = 0;
        node.children.retain(|_| {
            let keep = index == first || scalars.iter().all(|&(i, _)| i != index);
            index += 1;
            keep
        });
        node.children[first] = Expr::scalar(result);

        if node.child_count() == 1 {
            *node = Expr::scalar(result);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprig_parser::parse;
    use crate::symbolic::transform::{Flattening, TransformationGroup};
    use super::*;

    fn evaluate(source: &str) -> Expr {
        let mut tree = parse(source).unwrap();
        TransformationGroup::new("evaluate").with(Evaluation).run(&mut tree);
        tree
    }

    #[test]
    fn adds_scalars() {
        assert_eq!(evaluate("1 + 2"), Expr::scalar(3.0));
    }

    #[test]
    fn nested() {
        assert_eq!(evaluate("5 * (4 - 1)"), Expr::scalar(15.0));
        assert_eq!(evaluate("2 ^ 3 ^ 2"), Expr::scalar(512.0));
        assert_eq!(evaluate("sq ( 3 ) - 10 / 4"), Expr::scalar(6.5));
    }

    #[test]
    fn unary_functions() {
        assert_eq!(evaluate("exp ( 0 ) + cos ( 0 )"), Expr::scalar(2.0));
        assert_eq!(evaluate("ln ( 1 )"), Expr::scalar(0.0));
    }

    #[test]
    fn partial_folding() {
        let mut tree = parse("2 + x + 3").unwrap();
        Flattening.apply_recursively(&mut tree);
        assert!(Evaluation.apply_at_root(&mut tree));
        assert_eq!(tree.to_string(), "5 + x");
    }

    #[test]
    fn keeps_non_commutative_order() {
        assert_eq!(evaluate("x - 2").to_string(), "x - 2");
        assert_eq!(evaluate("x ^ ( 1 + 1 )").to_string(), "x ^ 2");
    }

    #[test]
    fn division_by_zero_is_a_value() {
        let tree = evaluate("1 / 0");
        assert_eq!(tree.as_scalar(), Some(f64::INFINITY));
    }

    #[test]
    fn operator_without_evaluator() {
        let tree = evaluate("x D 2");
        assert!(tree.is_operator("D"));
    }
}
