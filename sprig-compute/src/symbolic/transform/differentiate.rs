use sprig_parser::{Expr, Value};
use crate::symbolic::derivative::derivative;
use super::Transformation;

/// Replaces `x D f` nodes, where `x` is a variable, with the derivative of `f` with respect to
/// `x`, built from the operators' derivative templates.
///
/// A node whose derivative cannot be built is left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDifferentiation;

impl Transformation for TemplateDifferentiation {
    fn name(&self) -> &str {
        "differentiate"
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        if !node.is_operator("D") || node.child_count() != 2 {
            return false;
        }
        let Value::Variable(wrt) = &node.children[0].value else {
            return false;
        };

        match derivative(&node.children[1], &wrt.name) {
            Ok(result) => {
                *node = result;
                true
            },
            Err(err) => {
                tracing::debug!(target: "sprig::derivative", %err, "cannot differentiate");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprig_parser::parse;
    use super::*;

    #[test]
    fn replaces_derivative_nodes() {
        let mut tree = parse("1 + x D ( 3 * x )").unwrap();
        assert!(TemplateDifferentiation.apply_recursively(&mut tree));
        assert_eq!(tree, parse("1 + 3").unwrap());
    }

    #[test]
    fn nested_derivatives() {
        let mut tree = parse("x D ( x D ( x * y ) )").unwrap();
        assert!(TemplateDifferentiation.apply_recursively(&mut tree));
        assert_eq!(tree, Expr::scalar(0.0));
    }

    #[test]
    fn non_variable_left_operand() {
        let mut tree = parse("2 D x").unwrap();
        assert!(!TemplateDifferentiation.apply_recursively(&mut tree));
    }
}
