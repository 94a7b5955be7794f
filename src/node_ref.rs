use core::fmt;

use crate::Alpha;
use crate::raw::utils::{self, Nodes};
use crate::raw::{Handle, Node};

/// A borrowed, read-only view of one node of a leaf tree.
///
/// Handed to the visitor of [`LeafTree::traverse`] and
/// [`MultiLeafTree::traverse`], and returned by [`LeafTree::root`]. Interior
/// nodes carry only a separator key, the largest key of their left subtree;
/// values live at the leaves.
///
/// Two views compare equal when the subtrees below them have the same shape,
/// the same keys and the same leaf values.
///
/// [`LeafTree::traverse`]: crate::LeafTree::traverse
/// [`MultiLeafTree::traverse`]: crate::MultiLeafTree::traverse
/// [`LeafTree::root`]: crate::LeafTree::root
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::LeafTree;
///
/// let tree = LeafTree::from([(1, "a"), (2, "b"), (3, "c")]);
/// let root = tree.root().unwrap();
/// assert!(!root.is_leaf());
/// assert_eq!(root.weight(), 3);
///
/// let (left, _) = root.children().unwrap();
/// assert_eq!(left.key(), &1);
/// assert_eq!(left.value(), Some(&"a"));
/// ```
pub struct NodeRef<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    handle: Handle,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, handle: Handle) -> Self {
        NodeRef { nodes, handle }
    }

    fn node(&self) -> &'a Node<K, V> {
        self.nodes.get(self.handle)
    }

    /// The leaf's key, or the separator of an interior node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// The stored value; `None` for interior nodes.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        match self.node() {
            Node::Leaf(leaf) => Some(&leaf.value),
            Node::Interior(_) => None,
        }
    }

    #[must_use]
    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.children().map(|(left, _)| left)
    }

    #[must_use]
    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.children().map(|(_, right)| right)
    }

    /// Both children of an interior node; `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<(NodeRef<'a, K, V>, NodeRef<'a, K, V>)> {
        match self.node() {
            Node::Interior(interior) => Some((
                NodeRef::new(self.nodes, interior.left),
                NodeRef::new(self.nodes, interior.right),
            )),
            Node::Leaf(_) => None,
        }
    }

    /// Number of leaves in this subtree; 1 for a leaf.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.node().weight().get()
    }

    /// Length of the longest path down to a leaf; 0 for a leaf.
    ///
    /// # Complexity
    ///
    /// O(n) in the size of the subtree.
    #[must_use]
    pub fn height(&self) -> usize {
        utils::height(self.nodes, self.handle)
    }

    /// Whether each child holds at least `alpha` of this node's leaves.
    /// Leaves are always balanced.
    #[must_use]
    pub fn is_balanced(&self, alpha: Alpha) -> bool {
        match self.node() {
            Node::Interior(interior) => [interior.left, interior.right]
                .into_iter()
                .all(|child| utils::weight(self.nodes, child).is_share_of(interior.weight, alpha.get())),
            Node::Leaf(_) => true,
        }
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K: PartialEq, V: PartialEq> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.key() != other.key() {
            return false;
        }
        match (self.children(), other.children()) {
            (Some((a_left, a_right)), Some((b_left, b_right))) => a_left == b_left && a_right == b_right,
            (None, None) => self.value() == other.value(),
            _ => false,
        }
    }
}

impl<K: Eq, V: Eq> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Interior(interior) => f
                .debug_struct("Interior")
                .field("key", &interior.key)
                .field("weight", &interior.weight.get())
                .field("left", &NodeRef::new(self.nodes, interior.left))
                .field("right", &NodeRef::new(self.nodes, interior.right))
                .finish(),
            Node::Leaf(leaf) => f
                .debug_struct("Leaf")
                .field("key", &leaf.key)
                .field("value", &leaf.value)
                .finish(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::LeafTree;
    use alloc::format;

    #[test]
    fn leaf_view() {
        let tree = LeafTree::from([(4, 'd')]);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.key(), &4);
        assert_eq!(root.value(), Some(&'d'));
        assert_eq!(root.weight(), 1);
        assert_eq!(root.height(), 0);
        assert!(root.children().is_none());
        assert!(root.left().is_none() && root.right().is_none());
        assert!(root.is_balanced(Alpha::default()));
    }

    #[test]
    fn interior_view() {
        let tree = LeafTree::from([(1, ()), (2, ()), (3, ()), (4, ())]);
        let root = tree.root().unwrap();
        assert_eq!(root.key(), &2);
        assert_eq!(root.value(), None);
        assert_eq!(root.weight(), 4);
        assert_eq!(root.height(), 2);
        assert_eq!(root.left().unwrap().key(), &1);
        assert_eq!(root.right().unwrap().key(), &3);
        assert!(root.is_balanced(Alpha::MAX.try_into().unwrap()));
    }

    #[test]
    fn equality_is_structural() {
        let a = LeafTree::from([(1, 'a'), (2, 'b'), (3, 'c')]);
        let mut b = LeafTree::new();
        for (key, value) in [(1, 'a'), (2, 'b'), (3, 'c')] {
            b.insert(key, value);
        }
        let mut c = LeafTree::new();
        for (key, value) in [(1, 'a'), (2, 'b'), (3, 'x')] {
            c.insert(key, value);
        }
        assert_eq!(a.root(), b.root());
        assert_ne!(a.root(), c.root());
        // Built differently, same final shape.
        let d = LeafTree::from([(1, 'a'), (2, 'b')]);
        let mut e = LeafTree::from([(1, 'a'), (2, 'b'), (0, 'z')]);
        e.remove(&0);
        assert_eq!(d.root(), e.root());
    }

    #[test]
    fn debug_shows_the_subtree() {
        let tree = LeafTree::from([(1, 'a'), (2, 'b')]);
        assert_eq!(
            format!("{:?}", tree.root().unwrap()),
            "Interior { key: 1, weight: 2, left: Leaf { key: 1, value: 'a' }, \
             right: Leaf { key: 2, value: 'b' } }"
        );
    }
}
