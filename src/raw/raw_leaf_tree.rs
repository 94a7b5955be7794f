use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::Bound;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::cursor::Cursor;
use super::handle::Handle;
use super::node::{LeafNode, Node, Side};
use super::utils::{self, Nodes};
use super::weight::Weight;
use crate::Alpha;

/// The BB[α] leaf tree backing `LeafTree` and `MultiLeafTree`.
pub(crate) struct RawLeafTree<K, V> {
    /// Arena storing every leaf and interior node.
    nodes: Nodes<K, V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Minimum share of a node's leaves each of its subtrees must hold.
    alpha: Alpha,
}

/// Returned by [`RawLeafTree::try_insert`] when the key is already present.
pub(crate) struct Occupied<'a, V> {
    /// The value stored under the key.
    pub(crate) existing: &'a mut V,
    /// The value that was not inserted.
    pub(crate) rejected: V,
}

/// Path element for tracking the descent during mutations.
struct PathElement {
    /// Interior node passed on the way down.
    node: Handle,
    /// Child the descent continued into.
    side: Side,
}

/// Stack of interior nodes from the root down to a leaf's parent.
type Path = SmallVec<[PathElement; 32]>;

#[derive(Clone, Copy)]
enum Change {
    Grew,
    Shrank,
}

impl<K, V> RawLeafTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(alpha: Alpha) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            alpha,
        }
    }

    /// Creates an empty tree with room for `capacity` leaves.
    pub(crate) fn with_capacity(alpha: Alpha, capacity: usize) -> Self {
        // n leaves need n - 1 interior nodes.
        Self {
            nodes: Arena::with_capacity(capacity.saturating_mul(2).saturating_sub(1)),
            root: None,
            alpha,
        }
    }

    /// Number of leaves the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().div_ceil(2)
    }

    pub(crate) const fn alpha(&self) -> Alpha {
        self.alpha
    }

    /// Number of leaves, read from the root's weight.
    pub(crate) fn leaf_count(&self) -> usize {
        utils::leaf_count(&self.nodes, self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; an empty tree and a single leaf both report 0.
    pub(crate) fn height(&self) -> usize {
        self.root.map_or(0, |root| utils::height(&self.nodes, root))
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn nodes(&self) -> &Nodes<K, V> {
        &self.nodes
    }

    pub(crate) fn leaf(&self, handle: Handle) -> &LeafNode<K, V> {
        self.nodes.get(handle).as_leaf()
    }

    pub(crate) fn leaf_mut(&mut self, handle: Handle) -> &mut LeafNode<K, V> {
        self.nodes.get_mut(handle).as_leaf_mut()
    }

    /// Visits every node once: the node itself, then its left subtree, then
    /// its right subtree.
    pub(crate) fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(Handle),
    {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[Handle; 32]> = SmallVec::new();
        stack.push(root);
        while let Some(handle) = stack.pop() {
            visit(handle);
            if let Node::Interior(interior) = self.nodes.get(handle) {
                stack.push(interior.right);
                stack.push(interior.left);
            }
        }
    }

    /// In-order cursor over every leaf.
    pub(crate) fn iter(&self) -> Cursor<'_, K, V> {
        Cursor::full(&self.nodes, self.root)
    }

    /// Follows one side all the way down.
    fn extreme(&self, side: Side) -> Option<&LeafNode<K, V>> {
        let mut current = self.root?;
        while let Node::Interior(interior) = self.nodes.get(current) {
            current = interior.child(side);
        }
        Some(self.leaf(current))
    }

    pub(crate) fn first_leaf(&self) -> Option<&LeafNode<K, V>> {
        self.extreme(Side::Left)
    }

    pub(crate) fn last_leaf(&self) -> Option<&LeafNode<K, V>> {
        self.extreme(Side::Right)
    }

    #[inline]
    fn weight(&self, handle: Handle) -> Weight {
        utils::weight(&self.nodes, handle)
    }
}

impl<K: Ord, V> RawLeafTree<K, V> {
    /// Walks from `root` to the leaf where `key` is or would be, reporting
    /// every interior node passed to `record`.
    fn descend<Q, F>(&self, root: Handle, key: &Q, mut record: F) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        F: FnMut(PathElement),
    {
        let mut current = root;
        loop {
            match self.nodes.get(current) {
                Node::Interior(interior) => {
                    let side = match key.cmp(interior.key.borrow()) {
                        Ordering::Greater => Side::Right,
                        Ordering::Less | Ordering::Equal => Side::Left,
                    };
                    record(PathElement { node: current, side });
                    current = interior.child(side);
                }
                Node::Leaf(_) => return current,
            }
        }
    }

    /// Returns the handle of the leaf holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let leaf = self.descend(self.root?, key, |_| {});
        self.holds(leaf, key).then_some(leaf)
    }

    /// Whether the leaf at `leaf` is keyed by `key`.
    fn holds<Q>(&self, leaf: Handle, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        key.cmp(self.nodes.get(leaf).key().borrow()) == Ordering::Equal
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let leaf = self.search(key)?;
        Some(&self.leaf(leaf).value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let leaf = self.search(key)?;
        Some(&mut self.leaf_mut(leaf).value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let leaf = self.leaf(self.search(key)?);
        Some((&leaf.key, &leaf.value))
    }

    /// In-order cursor over the leaves whose keys lie within the bounds.
    pub(crate) fn range<Q>(&self, lower: Bound<&Q>, upper: Bound<&Q>) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::bounded(&self.nodes, self.root, lower, upper)
    }
}

impl<K: Ord + Clone, V> RawLeafTree<K, V> {
    /// Inserts `key` unless it is already present.
    ///
    /// A new key splits the leaf position it lands on into an interior node
    /// over the old leaf and a new one, then restores balance bottom-up. An
    /// existing key leaves the tree untouched and hands back both values.
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<(), Occupied<'_, V>> {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.alloc(Node::leaf(key, value)));
            return Ok(());
        };

        let mut path = Path::new();
        let leaf = self.descend(root, &key, |element| path.push(element));

        let ordering = key.cmp(self.nodes.get(leaf).key());
        if ordering == Ordering::Equal {
            return Err(Occupied {
                existing: &mut self.leaf_mut(leaf).value,
                rejected: value,
            });
        }

        // Separator is the largest key on the left, i.e. the smaller of the two.
        let separator = if ordering == Ordering::Less {
            key.clone()
        } else {
            self.nodes.get(leaf).key().clone()
        };
        let new_leaf = self.nodes.alloc(Node::leaf(key, value));
        let (left, right) = if ordering == Ordering::Less {
            (new_leaf, leaf)
        } else {
            (leaf, new_leaf)
        };
        let split = self.nodes.alloc(Node::interior(separator, left, right, Weight::from_usize(2)));
        self.attach(path.last(), split);

        self.rebalance_along(&path, Change::Grew);
        Ok(())
    }

    /// Removes the leaf holding `key`.
    ///
    /// The sibling subtree is spliced into the parent's slot, the separator
    /// that named the removed key is repaired, and balance is restored along
    /// the remaining path.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root?;
        let mut path = Path::new();
        let leaf = self.descend(root, key, |element| path.push(element));
        if !self.holds(leaf, key) {
            return None;
        }

        let Some(parent) = path.pop() else {
            self.root = None;
            let LeafNode { key, value } = self.nodes.take(leaf).into_leaf();
            return Some((key, value));
        };

        let sibling = self.nodes.get(parent.node).as_interior().child(parent.side.opposite());
        if parent.side == Side::Right {
            // The removed key was the largest below `parent`, so the nearest
            // ancestor that went left used it as separator. Its new largest
            // key is `parent`'s separator.
            if let Some(anchor) = path.iter().rev().find(|element| element.side == Side::Left) {
                let predecessor = self.nodes.get(parent.node).key().clone();
                *self.nodes.get_mut(anchor.node).key_mut() = predecessor;
            }
        }

        let LeafNode { key, value } = self.nodes.take(leaf).into_leaf();
        utils::copy_node(&mut self.nodes, parent.node, sibling);

        self.rebalance_along(&path, Change::Shrank);
        Some((key, value))
    }

    /// Builds a perfectly balanced tree from entries in strictly increasing
    /// key order.
    pub(crate) fn from_sorted(alpha: Alpha, entries: Vec<(K, V)>) -> Self {
        let mut tree = Self::with_capacity(alpha, entries.len());
        let count = entries.len();
        if count > 0 {
            let mut entries = entries.into_iter();
            let (root, _) = tree.build(&mut entries, count);
            tree.root = Some(root);
        }
        tree
    }

    /// Builds a subtree over the next `count` entries and returns it with its
    /// largest key.
    fn build<I>(&mut self, entries: &mut I, count: usize) -> (Handle, K)
    where
        I: Iterator<Item = (K, V)>,
    {
        if count == 1 {
            let (key, value) = entries.next().expect("`RawLeafTree::build()` - ran out of entries!");
            let max = key.clone();
            return (self.nodes.alloc(Node::leaf(key, value)), max);
        }
        let (left, separator) = self.build(entries, count / 2);
        let (right, max) = self.build(entries, count - count / 2);
        let node = self.nodes.alloc(Node::interior(separator, left, right, Weight::from_usize(count)));
        (node, max)
    }

    /// Points the parent's descent side (or the root) at `child`.
    fn attach(&mut self, parent: Option<&PathElement>, child: Handle) {
        match parent {
            Some(parent) => self.nodes.get_mut(parent.node).as_interior_mut().set_child(parent.side, child),
            None => self.root = Some(child),
        }
    }

    /// Adjusts cached weights from the deepest path element up to the root,
    /// rebalancing each node after its weight is correct.
    fn rebalance_along(&mut self, path: &[PathElement], change: Change) {
        for element in path.iter().rev() {
            let interior = self.nodes.get_mut(element.node).as_interior_mut();
            interior.weight = match change {
                Change::Grew => interior.weight + Weight::ONE,
                Change::Shrank => interior.weight.decremented(),
            };
            self.rebalance(element.node);
        }
    }

    /// Restores the α-balance of `node` with one single or double rotation.
    ///
    /// The heavy child's inner grandchild decides: if it holds more than
    /// `1 / (2 - α)` of the heavy child, a single rotation would only move it
    /// across and leave the node unbalanced the other way, so it is rotated
    /// outward first.
    fn rebalance(&mut self, node: Handle) {
        let interior = self.nodes.get(node).as_interior();
        let (left, right, total) = (interior.left, interior.right, interior.weight);
        let alpha = self.alpha.get();
        let limit = self.alpha.single_rotation_limit();

        if !self.weight(left).is_share_of(total, alpha) {
            let inner = self.nodes.get(right).as_interior().left;
            if self.weight(inner).share_of(self.weight(right)) > limit {
                utils::rotate_right(&mut self.nodes, right);
            }
            utils::rotate_left(&mut self.nodes, node);
        } else if !self.weight(right).is_share_of(total, alpha) {
            let inner = self.nodes.get(left).as_interior().right;
            if self.weight(inner).share_of(self.weight(left)) > limit {
                utils::rotate_left(&mut self.nodes, left);
            }
            utils::rotate_right(&mut self.nodes, node);
        }
    }
}

impl<K: Clone, V: Clone> Clone for RawLeafTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            alpha: self.alpha,
        }
    }
}
