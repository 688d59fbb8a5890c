use sprig_parser::{Expr, Value};
use std::cmp::Ordering;
use super::Transformation;

/// The rank of a node's kind in the canonical order.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Scalar(_) => 0,
        Value::Variable(_) => 1,
        Value::Operator(_) => 2,
    }
}

/// Compares two nodes in the canonical order: scalars first, by numeric value, then variables, by
/// name, then operator nodes, by precedence.
///
/// Nodes of the same kind and the same key compare equal, so sorting with a stable sort keeps
/// their relative order.
pub fn canonical_cmp(a: &Expr, b: &Expr) -> Ordering {
    match (&a.value, &b.value) {
        (Value::Scalar(x), Value::Scalar(y)) => x.total_cmp(y),
        (Value::Variable(x), Value::Variable(y)) => x.name.cmp(&y.name),
        (Value::Operator(x), Value::Operator(y)) => x.precedence.cmp(&y.precedence),
        (x, y) => kind_rank(x).cmp(&kind_rank(y)),
    }
}

/// Sorts the operands of commutative operator nodes into the canonical order (see
/// [`canonical_cmp`]).
///
/// Reports a change only if the operands were out of order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalOrdering;

impl Transformation for CanonicalOrdering {
    fn name(&self) -> &str {
        "canonical order"
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        if !node.op().map_or(false, |op| op.commutative) {
            return false;
        }

        let sorted = node.children
            .windows(2)
            .all(|pair| canonical_cmp(&pair[0], &pair[1]) != Ordering::Greater);
        if sorted {
            return false;
        }

        node.children.sort_by(canonical_cmp);
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprig_parser::parse;
    use super::*;

    #[test]
    fn scalars_then_variables_then_operators() {
        let mut tree = parse("sin ( x ) * y * 3 * b * -2").unwrap();
        super::super::Flattening.apply_recursively(&mut tree);
        assert!(CanonicalOrdering.apply_recursively(&mut tree));
        assert_eq!(tree.to_string(), "-2 * 3 * b * y * sin ( x )");
    }

    #[test]
    fn idempotent() {
        let mut tree = parse("( z + 2 ) * ( y * 1 ) + x").unwrap();
        CanonicalOrdering.apply_recursively(&mut tree);
        let once = tree.clone();
        assert!(!CanonicalOrdering.apply_recursively(&mut tree));
        assert_eq!(tree, once);
    }

    #[test]
    fn non_commutative_untouched() {
        let mut tree = parse("x - 2").unwrap();
        assert!(!CanonicalOrdering.apply_recursively(&mut tree));
        assert_eq!(tree.to_string(), "x - 2");
    }

    #[test]
    fn operators_by_precedence() {
        let mut tree = parse("a ^ 2 + b * c").unwrap();
        assert!(CanonicalOrdering.apply_at_root(&mut tree));
        assert_eq!(tree.to_string(), "b * c + a ^ 2");
    }

    #[test]
    fn total_order_is_consistent() {
        let mut nodes = vec![
            parse("x ^ 2").unwrap(),
            parse("b").unwrap(),
            parse("2").unwrap(),
            parse("a * b").unwrap(),
            parse("-1").unwrap(),
            parse("a").unwrap(),
        ];
        nodes.sort_by(canonical_cmp);
        for pair in nodes.windows(2) {
            assert_ne!(canonical_cmp(&pair[0], &pair[1]), Ordering::Greater);
            assert_ne!(canonical_cmp(&pair[1], &pair[0]), Ordering::Less);
        }
        let rendered = nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["-1", "2", "a", "b", "a * b", "x ^ 2"]);
    }
}
