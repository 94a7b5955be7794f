use core::borrow::Borrow;
use core::ops::Bound;

use smallvec::SmallVec;

use super::handle::Handle;
use super::node::{LeafNode, Node};
use super::utils::{self, Nodes};

type Stack = SmallVec<[Handle; 32]>;

/// Double-ended in-order walk over a contiguous run of leaves.
///
/// Each end keeps a stack of subtrees it has not entered yet. The number of
/// leaves in the run is known up front from subtree weights, so the two ends
/// never need to compare positions to know when they have met.
pub(crate) struct Cursor<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    // Pending subtrees for the front; the top holds the next leaf.
    front: Stack,
    // Pending subtrees for the back; the top holds the previous leaf.
    back: Stack,
    remaining: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn empty(nodes: &'a Nodes<K, V>) -> Self {
        Self {
            nodes,
            front: Stack::new(),
            back: Stack::new(),
            remaining: 0,
        }
    }

    /// Every leaf below `root`.
    pub(crate) fn full(nodes: &'a Nodes<K, V>, root: Option<Handle>) -> Self {
        let mut cursor = Self::empty(nodes);
        if let Some(root) = root {
            cursor.front.push(root);
            cursor.back.push(root);
            cursor.remaining = utils::leaf_count(nodes, Some(root));
        }
        cursor
    }

    /// Leaves not yet yielded from either end.
    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next_leaf(&mut self) -> Option<&'a LeafNode<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let mut current = self.front.pop()?;
        while let Node::Interior(interior) = nodes.get(current) {
            self.front.push(interior.right);
            current = interior.left;
        }
        self.remaining -= 1;
        Some(nodes.get(current).as_leaf())
    }

    pub(crate) fn next_leaf_back(&mut self) -> Option<&'a LeafNode<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let mut current = self.back.pop()?;
        while let Node::Interior(interior) = nodes.get(current) {
            self.back.push(interior.left);
            current = interior.right;
        }
        self.remaining -= 1;
        Some(nodes.get(current).as_leaf())
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// The leaves below `root` whose keys lie within `lower` and `upper`.
    pub(crate) fn bounded<Q>(nodes: &'a Nodes<K, V>, root: Option<Handle>, lower: Bound<&Q>, upper: Bound<&Q>) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = Self::empty(nodes);
        if let Some(root) = root {
            let before = cursor.seek_front(root, lower);
            let through = cursor.seek_back(root, upper);
            cursor.remaining = through.saturating_sub(before);
        }
        cursor
    }

    /// Positions the front on the first leaf not below `lower` and returns
    /// how many leaves are below it.
    fn seek_front<Q>(&mut self, root: Handle, lower: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let nodes = self.nodes;
        let mut skipped = 0;
        let mut current = root;
        loop {
            match nodes.get(current) {
                Node::Interior(interior) => {
                    // The separator is the largest key on the left.
                    if below(interior.key.borrow(), lower) {
                        skipped += utils::weight(nodes, interior.left).get();
                        current = interior.right;
                    } else {
                        self.front.push(interior.right);
                        current = interior.left;
                    }
                }
                Node::Leaf(leaf) => {
                    if below(leaf.key.borrow(), lower) {
                        skipped += 1;
                    } else {
                        self.front.push(current);
                    }
                    return skipped;
                }
            }
        }
    }

    /// Positions the back on the last leaf not above `upper` and returns how
    /// many leaves are not above it.
    fn seek_back<Q>(&mut self, root: Handle, upper: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let nodes = self.nodes;
        let mut counted = 0;
        let mut current = root;
        loop {
            match nodes.get(current) {
                Node::Interior(interior) => {
                    // Everything on the right is larger than the separator.
                    if above(interior.key.borrow(), upper) {
                        current = interior.left;
                    } else {
                        counted += utils::weight(nodes, interior.left).get();
                        self.back.push(interior.left);
                        current = interior.right;
                    }
                }
                Node::Leaf(leaf) => {
                    if !above(leaf.key.borrow(), upper) {
                        counted += 1;
                        self.back.push(current);
                    }
                    return counted;
                }
            }
        }
    }
}

fn below<Q: ?Sized + Ord>(key: &Q, lower: Bound<&Q>) -> bool {
    match lower {
        Bound::Included(start) => key < start,
        Bound::Excluded(start) => key <= start,
        Bound::Unbounded => false,
    }
}

fn above<Q: ?Sized + Ord>(key: &Q, upper: Bound<&Q>) -> bool {
    match upper {
        Bound::Included(end) => key > end,
        Bound::Excluded(end) => key >= end,
        Bound::Unbounded => false,
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}
