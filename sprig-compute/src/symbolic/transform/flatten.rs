use sprig_parser::Expr;
use super::Transformation;

/// Merges same-operator children of a fully-associative operator node into the node itself.
///
/// `(a + b) + (c + d)` becomes a single `+` node with the operands `a b c d`, in that order. Only
/// the immediate children are merged; deeper nodes are merged by the bottom-up driver before
/// their parent is visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattening;

impl Transformation for Flattening {
    fn name(&self) -> &str {
        "flatten"
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        let Some(op) = node.op().filter(|op| op.is_flattenable()).cloned() else {
            return false;
        };

        let mergeable = |child: &Expr| !child.is_leaf() && child.op() == Some(&op);
        if !node.children.iter().any(mergeable) {
            return false;
        }

        let children = std::mem::take(&mut node.children);
        for child in children {
            if mergeable(&child) {
                node.children.extend(child.children);
            } else {
                node.children.push(child);
            }
        }
        true
    }
}
