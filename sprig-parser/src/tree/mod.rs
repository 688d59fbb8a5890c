//! A generic N-ary tree, the backbone of every expression in sprig.

pub mod iter;

use std::fmt::{self, Display, Formatter};
pub use iter::PostOrder;

/// A node of an N-ary tree: a value plus an ordered list of owned children.
///
/// A node exclusively owns its children, so no two locations of a tree (or of two different
/// trees) can alias the same subtree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree<T> {
    /// The value stored in this node.
    pub value: T,

    /// The children of this node, in order.
    pub children: Vec<Tree<T>>,
}

impl<T> Tree<T> {
    /// Creates a node with no children.
    pub fn leaf(value: T) -> Self {
        Self { value, children: Vec::new() }
    }

    /// Creates a node with the given children.
    pub fn join(value: T, children: Vec<Tree<T>>) -> Self {
        Self { value, children }
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of children of this node.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the length of the longest path from this node down to a leaf. A leaf has height 0.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the total number of nodes in this tree, including this one.
    pub fn size(&self) -> usize {
        self.post_order().count()
    }

    /// Compares two trees structurally, using the given function to compare node values.
    ///
    /// Returns false as soon as a pair of nodes disagrees on being a leaf, on their number of
    /// children, or on their values.
    pub fn equals<U>(&self, other: &Tree<U>, cmp: impl Fn(&T, &U) -> bool + Copy) -> bool {
        if self.is_leaf() != other.is_leaf() || self.child_count() != other.child_count() {
            return false;
        }

        cmp(&self.value, &other.value)
            && self.children
                .iter()
                .zip(&other.children)
                .all(|(lhs, rhs)| lhs.equals(rhs, cmp))
    }

    /// Returns an iterator over every node of the tree in left-to-right post-order.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    /// Calls `f` on every node of the tree, children before their parent. `f` may replace the
    /// node it is given wholesale.
    pub fn visit_post_order_mut(&mut self, f: &mut impl FnMut(&mut Tree<T>)) {
        for child in &mut self.children {
            child.visit_post_order_mut(f);
        }
        f(self);
    }

    /// Applies `f` to every value in the tree, producing a tree of the same shape.
    pub fn map<U>(self, f: &mut impl FnMut(T) -> U) -> Tree<U> {
        let value = f(self.value);
        let children = self.children
            .into_iter()
            .map(|child| child.map(f))
            .collect();
        Tree { value, children }
    }
}

impl<T: Clone> Tree<T> {
    /// Creates a deep copy of the tree. Every node of the copy is newly owned.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl<T: Display> Tree<T> {
    /// Returns a value that displays the tree as an indented branch diagram, for debugging.
    ///
    /// ```text
    /// +
    /// ├── x
    /// └── *
    ///     ├── 2
    ///     └── y
    /// ```
    pub fn branches(&self) -> Branches<'_, T> {
        Branches(self)
    }
}

/// Displays a tree as an indented branch diagram. Created by [`Tree::branches`].
pub struct Branches<'a, T>(&'a Tree<T>);

impl<T: Display> Branches<'_, T> {
    fn fmt_node(node: &Tree<T>, prefix: &str, f: &mut Formatter) -> fmt::Result {
        for (i, child) in node.children.iter().enumerate() {
            let last = i + 1 == node.children.len();
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{}{}{}", prefix, branch, child.value)?;
            Self::fmt_node(child, &format!("{}{}", prefix, indent), f)?;
        }
        Ok(())
    }
}

impl<T: Display> Display for Branches<'_, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{}", self.0.value)?;
        Self::fmt_node(self.0, "", f)
    }
}
