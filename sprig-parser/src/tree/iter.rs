use super::Tree;

/// An iterator that iteratively traverses a [`Tree`] in left-to-right post-order (i.e.
/// depth-first, children before their parent, root last).
///
/// This iterator is created by [`Tree::post_order`]. Calling [`Tree::post_order`] again restarts
/// the traversal from the root.
pub struct PostOrder<'a, T> {
    stack: Vec<&'a Tree<T>>,
    last_visited: Option<&'a Tree<T>>,
}

impl<'a, T> PostOrder<'a, T> {
    /// Creates a new iterator that traverses the given tree in left-to-right post-order.
    pub fn new(tree: &'a Tree<T>) -> Self {
        Self {
            stack: vec![tree],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Tree<T>> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node is the last visited node.
    fn is_last_visited(&self, node: &'a Tree<T>) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, node),
            None => false,
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a Tree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.stack.last()?;
            match node.children.last() {
                None => return self.visit(),
                // the rightmost child is visited last, so the node's subtree is done
                Some(last) if self.is_last_visited(last) => return self.visit(),
                Some(_) => {
                    for child in node.children.iter().rev() {
                        self.stack.push(child);
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn children_before_parent() {
        // 1 ( 2 ( 4 5 ) 3 )
        let tree = Tree::join(1, vec![
            Tree::join(2, vec![Tree::leaf(4), Tree::leaf(5)]),
            Tree::leaf(3),
        ]);
        let order = tree.post_order().map(|node| node.value).collect::<Vec<_>>();
        assert_eq!(order, vec![4, 5, 2, 3, 1]);
    }

    #[test]
    fn restartable() {
        let tree = Tree::join('a', vec![Tree::leaf('b'), Tree::leaf('c')]);
        let first = tree.post_order().count();
        let second = tree.post_order().count();
        assert_eq!(first, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn single_leaf() {
        let tree = Tree::leaf(7);
        assert_eq!(tree.post_order().map(|node| node.value).collect::<Vec<_>>(), vec![7]);
    }
}
