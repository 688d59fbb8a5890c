use sprig_parser::Expr;
use super::Transformation;

/// Removes the identities of addition and multiplication.
///
/// - `+`: scalar `0` operands are dropped.
/// - `*`: a scalar `0` operand turns the whole node into `0`, and scalar `1` operands are
///   dropped.
///
/// A node left without operands becomes the identity of its operator, and a node left with a
/// single operand is replaced by it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplification;

impl Simplification {
    /// Drops operands equal to `identity`, then collapses the node if it has fewer than two
    /// operands left.
    fn remove_identity(node: &mut Expr, identity: f64) -> bool {
        let before = node.child_count();
        node.children.retain(|child| !(child.is_leaf() && child.value.is_scalar(identity)));

        match node.child_count() {
            0 => *node = Expr::scalar(identity),
            1 => {
                if let Some(only) = node.children.pop() {
                    *node = only;
                }
            },
            count => return count != before,
        }
        true
    }
}

impl Transformation for Simplification {
    fn name(&self) -> &str {
        "simplify"
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        if node.is_leaf() {
            return false;
        }

        if node.is_operator("+") {
            Self::remove_identity(node, 0.0)
        } else if node.is_operator("*") {
            if node.children.iter().any(|child| child.is_leaf() && child.value.is_scalar(0.0)) {
                *node = Expr::scalar(0.0);
                return true;
            }
            Self::remove_identity(node, 1.0)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprig_parser::parse;
    use crate::symbolic::transform::{PatternRule, TransformationGroup};
    use super::*;

    fn simplify(source: &str) -> Expr {
        let mut tree = parse(source).unwrap();
        TransformationGroup::new("simplify").with(Simplification).run(&mut tree);
        tree
    }

    #[test]
    fn additive_identity() {
        assert_eq!(simplify("x + 0"), parse("x").unwrap());
        assert_eq!(simplify("0 + 0"), Expr::scalar(0.0));
    }

    #[test]
    fn multiplicative_identity() {
        assert_eq!(simplify("1 * y"), parse("y").unwrap());
        assert_eq!(simplify("1 * 1"), Expr::scalar(1.0));
    }

    #[test]
    fn zero_absorbs() {
        assert_eq!(simplify("( x + y ) * 0"), Expr::scalar(0.0));
        assert_eq!(simplify("sin ( x ) + 2 * 0"), parse("sin ( x )").unwrap());
    }

    #[test]
    fn nothing_to_do() {
        let mut tree = parse("x * 2 + y").unwrap();
        assert!(!Simplification.apply_recursively(&mut tree));
    }

    #[test]
    fn subtraction_then_simplification() {
        let group = || TransformationGroup::new("simplify")
            .with(PatternRule::infix("subtract", "f - g", "f + -1 * g").unwrap())
            .with(Simplification);

        let mut tree = parse("(x + 0) - (1 * 7)").unwrap();
        group().run(&mut tree);

        let mut expected = parse("x + (-1 * 7)").unwrap();
        group().run(&mut expected);

        assert_eq!(tree, expected);
        assert_eq!(tree.to_string(), "x + -1 * 7");
    }
}
