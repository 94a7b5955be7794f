use core::borrow::Borrow;
use core::fmt;

use alloc::vec::Vec;

use crate::leaf_tree::Iter;
use crate::raw::{Occupied, RawLeafTree};
use crate::{Alpha, NodeRef, ValueChain};

mod interval;

/// A weight-balanced leaf tree that keeps every value inserted under a key.
///
/// The tree has the same shape and balancing as [`LeafTree`]: one leaf per
/// distinct key, interior nodes as separators. Each leaf carries a
/// [`ValueChain`] holding the key's values in insertion order. Inserting a
/// key that is already present appends to its chain without touching the
/// tree's structure.
///
/// On top of point lookups the tree answers interval queries through
/// [`interval_find`](MultiLeafTree::interval_find), which only descends into
/// subtrees that overlap the interval.
///
/// [`LeafTree`]: crate::LeafTree
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::MultiLeafTree;
///
/// let mut tree = MultiLeafTree::new();
/// tree.insert(5, 'a');
/// tree.insert(5, 'b');
/// tree.insert(7, 'c');
/// assert_eq!(tree.find(&5), ['a', 'b']);
/// assert_eq!(tree.key_count(), 2);
/// assert_eq!(tree.value_count(), 3);
///
/// let removed = tree.remove(&5);
/// assert_eq!(removed, ['a', 'b']);
/// assert!(tree.remove(&5).is_empty());
///
/// tree.set(7, 'x');
/// assert_eq!(tree.find_snapshot(&7), vec!['x']);
/// ```
pub struct MultiLeafTree<K, V> {
    raw: RawLeafTree<K, ValueChain<V>>,
    // Sum of all chain lengths.
    value_count: usize,
}

impl<K, V> MultiLeafTree<K, V> {
    /// Makes a new, empty tree with the default balance factor.
    #[must_use]
    pub const fn new() -> Self {
        MultiLeafTree::with_alpha(Alpha::DEFAULT)
    }

    #[must_use]
    pub const fn with_alpha(alpha: Alpha) -> Self {
        MultiLeafTree {
            raw: RawLeafTree::new(alpha),
            value_count: 0,
        }
    }

    /// Creates an empty tree with room for at least `capacity` distinct keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MultiLeafTree {
            raw: RawLeafTree::with_capacity(Alpha::DEFAULT, capacity),
            value_count: 0,
        }
    }

    /// Returns how many distinct keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.value_count = 0;
    }

    #[must_use]
    pub const fn alpha(&self) -> Alpha {
        self.raw.alpha()
    }

    /// Length of the longest root-to-leaf path; 0 when empty.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Number of distinct keys, which is the number of leaves.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.raw.leaf_count()
    }

    /// Number of values across all keys.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn value_count(&self) -> usize {
        self.value_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// A view of the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, ValueChain<V>>> {
        self.raw.root().map(|root| NodeRef::new(self.raw.nodes(), root))
    }

    /// Calls `visit` once for every node in pre-order. Leaf views carry the
    /// key's value chain.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, K, ValueChain<V>>),
    {
        let nodes = self.raw.nodes();
        self.raw.traverse(|handle| visit(NodeRef::new(nodes, handle)));
    }

    /// Gets an iterator over every key and its chain, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, ValueChain<V>> {
        Iter::new(self.raw.iter())
    }

    /// Returns the values stored under `key`, oldest first.
    ///
    /// The slice borrows the tree. An absent key gives an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::MultiLeafTree;
    ///
    /// let mut tree = MultiLeafTree::new();
    /// assert!(tree.find(&1).is_empty());
    /// tree.insert(1, "one");
    /// tree.insert(1, "uno");
    /// assert_eq!(tree.find(&1), ["one", "uno"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).map_or(&[], ValueChain::as_slice)
    }

    /// Copies the values stored under `key` into a vector that does not
    /// borrow the tree. An absent key gives an empty vector.
    pub fn find_snapshot<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
        V: Clone,
    {
        self.find(key).to_vec()
    }

    /// Returns the chain stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&ValueChain<V>>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Adds `value` to the end of `key`'s chain, creating the key's leaf if
    /// this is its first value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Clone + Ord,
    {
        if let Err(Occupied { existing, rejected }) = self.raw.try_insert(key, ValueChain::single(value)) {
            existing.extend(rejected);
        }
        self.value_count += 1;
    }

    /// Makes `value` the only value stored under `key`, discarding any
    /// earlier values. An existing leaf is updated in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::MultiLeafTree;
    ///
    /// let mut tree = MultiLeafTree::new();
    /// tree.insert(5, 'a');
    /// tree.insert(5, 'b');
    /// tree.set(5, 'x');
    /// assert_eq!(tree.find(&5), ['x']);
    /// assert_eq!(tree.value_count(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V)
    where
        K: Clone + Ord,
    {
        if let Err(Occupied { existing, rejected }) = self.raw.try_insert(key, ValueChain::single(value)) {
            self.value_count -= existing.len();
            *existing = rejected;
        }
        self.value_count += 1;
    }

    /// Removes `key` and returns every value it held, oldest first.
    ///
    /// An absent key gives an empty chain and leaves the tree untouched.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> ValueChain<V>
    where
        K: Borrow<Q> + Clone + Ord,
        Q: ?Sized + Ord,
    {
        match self.raw.remove_entry(key) {
            Some((_, chain)) => {
                self.value_count -= chain.len();
                chain
            }
            None => ValueChain::new(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for MultiLeafTree<K, V> {
    fn clone(&self) -> Self {
        MultiLeafTree {
            raw: self.raw.clone(),
            value_count: self.value_count,
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for MultiLeafTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.value_count == other.value_count
            && self.key_count() == other.key_count()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for MultiLeafTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MultiLeafTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for MultiLeafTree<K, V> {
    fn default() -> Self {
        MultiLeafTree::new()
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for MultiLeafTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = MultiLeafTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for MultiLeafTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a MultiLeafTree<K, V> {
    type Item = (&'a K, &'a ValueChain<V>);
    type IntoIter = Iter<'a, K, ValueChain<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
