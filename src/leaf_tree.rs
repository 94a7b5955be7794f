use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use alloc::vec::Vec;

use crate::raw::{Cursor, RawLeafTree};
use crate::{Alpha, NodeRef};

mod capacity;

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
pub(crate) fn validate_range_bounds<T, R>(range: &R)
where
    T: ?Sized + Ord,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                start < end
            } else {
                start <= end
            };
        assert!(valid, "range start is greater than range end");
    }
}

/// An ordered map based on a weight-balanced ([BB\[α\]]) leaf-oriented binary
/// search tree.
///
/// Every entry lives in a leaf. Interior nodes hold no values, only a
/// separator key, the largest key of their left subtree, so a search goes
/// left whenever the key is less than or equal to the separator. Each
/// interior node also records how many leaves lie below it, and after every
/// insertion and removal each affected node is brought back within the
/// balance condition: both children hold at least `α` of its leaves. This
/// bounds the height by `log(n) / log(1 / (1 - α))`.
///
/// Keys are unique. Inserting a key that is already present leaves the tree
/// unchanged and reports `false`.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the tree. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `LeafTree` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::{Alpha, LeafTree};
///
/// let mut tree = LeafTree::with_alpha(Alpha::new(0.29).unwrap());
/// for key in 1..=100 {
///     assert!(tree.insert(key, key * 10));
/// }
///
/// // Duplicate keys are rejected and the tree is left alone.
/// assert!(!tree.insert(50, 0));
/// assert_eq!(tree.get(&50), Some(&500));
/// assert_eq!(tree.leaf_count(), 100);
///
/// // The height stays logarithmic even for sorted input.
/// assert!(tree.height() <= 14);
///
/// assert_eq!(tree.remove(&50), Some(500));
/// assert!(!tree.contains_key(&50));
///
/// let window: Vec<_> = tree.range(48..53).map(|(key, _)| *key).collect();
/// assert_eq!(window, [48, 49, 51, 52]);
/// ```
///
/// A `LeafTree` with a known list of items can be built in one pass, which
/// produces a perfectly balanced tree:
///
/// ```
/// use bb_leaf_tree::LeafTree;
///
/// let solar_distance = LeafTree::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.height(), 2);
/// ```
///
/// [BB\[α\]]: https://en.wikipedia.org/wiki/Weight-balanced_tree
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct LeafTree<K, V> {
    raw: RawLeafTree<K, V>,
}

/// An iterator over the entries of a `LeafTree`.
///
/// This `struct` is created by the [`iter`] method on [`LeafTree`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::LeafTree;
///
/// let tree = LeafTree::from([(1, "a"), (2, "b")]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: LeafTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
}

/// An iterator over the keys of a `LeafTree`.
///
/// This `struct` is created by the [`keys`] method on [`LeafTree`]. See its
/// documentation for more.
///
/// [`keys`]: LeafTree::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `LeafTree`.
///
/// This `struct` is created by the [`values`] method on [`LeafTree`]. See its
/// documentation for more.
///
/// [`values`]: LeafTree::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a sub-range of entries, in key order.
///
/// This `struct` is created by [`LeafTree::range`],
/// [`MultiLeafTree::range`] and [`MultiLeafTree::interval_find`]. Only the
/// subtrees that overlap the range are visited.
///
/// [`MultiLeafTree::range`]: crate::MultiLeafTree::range
/// [`MultiLeafTree::interval_find`]: crate::MultiLeafTree::interval_find
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    cursor: Cursor<'a, K, V>,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(crate) fn new(cursor: Cursor<'a, K, V>) -> Self {
        Range { cursor }
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(cursor: Cursor<'a, K, V>) -> Self {
        Iter { cursor }
    }
}

impl<K, V> LeafTree<K, V> {
    /// Makes a new, empty `LeafTree` with the default balance factor
    /// ([`Alpha::DEFAULT`]).
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    ///
    /// // entries can now be inserted into the empty tree
    /// tree.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> LeafTree<K, V> {
        LeafTree::with_alpha(Alpha::DEFAULT)
    }

    /// Makes a new, empty `LeafTree` that keeps every subtree within `alpha`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::{Alpha, LeafTree};
    ///
    /// let alpha = Alpha::new(0.2).unwrap();
    /// let tree: LeafTree<u8, u8> = LeafTree::with_alpha(alpha);
    /// assert_eq!(tree.alpha(), alpha);
    /// ```
    #[must_use]
    pub const fn with_alpha(alpha: Alpha) -> LeafTree<K, V> {
        LeafTree {
            raw: RawLeafTree::new(alpha),
        }
    }

    /// Clears the tree, removing all elements. The balance factor is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut a = LeafTree::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// The balance factor this tree maintains.
    #[must_use]
    pub const fn alpha(&self) -> Alpha {
        self.raw.alpha()
    }

    /// Length of the longest root-to-leaf path. Both an empty tree and a tree
    /// holding a single leaf report 0.
    ///
    /// # Complexity
    ///
    /// O(n); the height is recomputed from the nodes on every call.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Number of leaves, which is the number of entries.
    ///
    /// # Complexity
    ///
    /// O(1); read from the root's weight.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.raw.leaf_count()
    }

    /// Returns the number of elements in the tree. Same as
    /// [`leaf_count`](LeafTree::leaf_count).
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut a = LeafTree::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.leaf_count()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// A view of the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.raw.root().map(|root| NodeRef::new(self.raw.nodes(), root))
    }

    /// Calls `visit` once for every node, leaves and interior nodes alike, in
    /// pre-order: a node, then its left subtree, then its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let tree = LeafTree::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut seen = Vec::new();
    /// tree.traverse(|node| seen.push((*node.key(), node.is_leaf())));
    /// assert_eq!(seen, [(1, false), (1, true), (2, false), (2, true), (3, true)]);
    /// ```
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, K, V>),
    {
        let nodes = self.raw.nodes();
        self.raw.traverse(|handle| visit(NodeRef::new(nodes, handle)));
    }

    /// Returns the first key-value pair in the tree.
    /// The key in this pair is the minimum key in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// assert_eq!(tree.first_key_value(), None);
    /// tree.insert(1, "b");
    /// tree.insert(2, "a");
    /// assert_eq!(tree.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_leaf().map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Returns the last key-value pair in the tree.
    /// The key in this pair is the maximum key in the tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_leaf().map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// tree.insert(3, "c");
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// let (first_key, first_value) = tree.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.raw.iter())
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// tree.insert(1, "a");
    /// if let Some(x) = tree.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the tree contains a value for the specified key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair if the key is not present yet.
    ///
    /// Returns `true` if a new leaf was created. If the key is already
    /// present the tree is left unchanged, `value` is dropped and `false` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// assert!(tree.insert(37, "a"));
    /// assert!(!tree.insert(37, "b"));
    /// assert_eq!(tree[&37], "a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Clone + Ord,
    {
        self.raw.try_insert(key, value).is_ok()
    }

    /// Removes a key from the tree, returning the value at the key if the key
    /// was previously in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.remove(&1), Some("a"));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Clone + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the tree, returning the stored key and value if the
    /// key was previously in the tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Clone + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the tree.
    /// The simplest way is to use the range syntax `min..max`, thus `range(min..max)` will
    /// yield elements from min (inclusive) to max (exclusive).
    /// The range may also be entered as `(Bound<T>, Bound<T>)`, so for example
    /// `range((Excluded(4), Included(10)))` will yield a left-exclusive, right-inclusive
    /// range from 4 to 10.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound::Included;
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let mut tree = LeafTree::new();
    /// tree.insert(3, "a");
    /// tree.insert(5, "b");
    /// tree.insert(8, "c");
    /// for (&key, &value) in tree.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), tree.range(4..).next());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized + Ord,
        K: Borrow<T> + Ord,
        R: RangeBounds<T>,
    {
        validate_range_bounds(&range);
        Range::new(self.raw.range(range.start_bound(), range.end_bound()))
    }
}

impl<K: Clone, V: Clone> Clone for LeafTree<K, V> {
    fn clone(&self) -> Self {
        LeafTree { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for LeafTree<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LeafTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for LeafTree<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for LeafTree<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for LeafTree<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LeafTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for LeafTree<K, V> {
    fn default() -> Self {
        LeafTree::new()
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for LeafTree<K, V> {
    /// Builds a perfectly balanced tree in one pass.
    ///
    /// When a key occurs more than once the first occurrence is kept, the
    /// same outcome as inserting the items one by one.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut entries: Vec<(K, V)> = iter.into_iter().collect();
        // Stable, so equal keys keep their input order.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);
        LeafTree {
            raw: RawLeafTree::from_sorted(Alpha::DEFAULT, entries),
        }
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for LeafTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for LeafTree<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LeafTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for LeafTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `LeafTree`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord + Clone, V, const N: usize> From<[(K, V); N]> for LeafTree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_leaf().map(|leaf| (&leaf.key, &leaf.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.len(), Some(self.cursor.len()))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_leaf_back().map(|leaf| (&leaf.key, &leaf.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.cursor.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.cursor.len()).finish()
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.len()).finish()
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.len()).finish()
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_leaf().map(|leaf| (&leaf.key, &leaf.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Exact: the leaf count of the range is known from subtree weights.
        (self.cursor.len(), Some(self.cursor.len()))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_leaf_back().map(|leaf| (&leaf.key, &leaf.value))
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {
    fn len(&self) -> usize {
        self.cursor.len()
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range").field("remaining", &self.cursor.len()).finish()
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            cursor: self.cursor.clone(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use static_assertions::assert_impl_all;

    assert_impl_all!(LeafTree<u32, u32>: Send, Sync, Clone, Default);
    assert_impl_all!(Iter<'static, u32, u32>: Send, Sync, Clone, ExactSizeIterator, DoubleEndedIterator);
    assert_impl_all!(Range<'static, u32, u32>: Send, Sync, Clone, ExactSizeIterator, DoubleEndedIterator);

    #[test]
    fn from_iter_keeps_the_first_duplicate() {
        let tree: LeafTree<_, _> = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')].into_iter().collect();
        tree.raw.validate_invariants();
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![(&1, &'b'), (&2, &'d'), (&3, &'a')]);
    }

    #[test]
    fn extend_inserts_one_by_one() {
        let mut tree = LeafTree::from([(1, 1)]);
        tree.extend([(2, 2), (1, 100), (0, 0)]);
        tree.extend([(&5, &5)]);
        tree.raw.validate_invariants();
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 5]);
        assert_eq!(tree[&1], 1);
    }

    #[test]
    fn first_and_last() {
        let mut tree = LeafTree::new();
        assert_eq!(tree.last_key_value(), None);
        for key in [5, 9, 1, 7] {
            tree.insert(key, key * 2);
        }
        assert_eq!(tree.first_key_value(), Some((&1, &2)));
        assert_eq!(tree.last_key_value(), Some((&9, &18)));
    }

    #[test]
    fn get_through_borrowed_keys() {
        let mut tree = LeafTree::new();
        tree.insert(alloc::string::String::from("b"), 2);
        tree.insert(alloc::string::String::from("a"), 1);
        assert_eq!(tree.get("a"), Some(&1));
        assert!(tree.contains_key("b"));
        assert_eq!(tree.get_key_value("b").map(|(k, v)| (k.as_str(), *v)), Some(("b", 2)));
        assert_eq!(tree.remove("a"), Some(1));
        assert_eq!(tree.range::<str, _>((Bound::Included("a"), Bound::Excluded("c"))).count(), 1);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end")]
    fn inverted_range_panics() {
        let tree = LeafTree::from([(1, ()), (2, ())]);
        let _ = tree.range(2..1);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end")]
    fn empty_excluded_range_panics() {
        let tree = LeafTree::from([(1, ())]);
        let _ = tree.range((Bound::Excluded(1), Bound::Excluded(1)));
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_missing_key_panics() {
        let tree: LeafTree<i32, i32> = LeafTree::new();
        let _value = tree[&1];
    }

    #[test]
    fn equality_and_order_follow_entries() {
        let a = LeafTree::from([(1, 'a'), (2, 'b')]);
        let mut b = LeafTree::new();
        b.insert(2, 'b');
        b.insert(1, 'a');
        assert_eq!(a, b);
        b.insert(3, 'c');
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn debug_formats() {
        let tree = LeafTree::from([(1, "a"), (2, "b")]);
        assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b"}"#);
        assert_eq!(format!("{:?}", tree.iter()), "Iter { remaining: 2 }");
        assert_eq!(format!("{:?}", tree.range(2..)), "Range { remaining: 1 }");
    }

    #[test]
    fn clear_keeps_alpha() {
        let alpha = Alpha::new(0.2).unwrap();
        let mut tree = LeafTree::with_alpha(alpha);
        tree.extend((0..10).map(|key| (key, key)));
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.alpha(), alpha);
        assert!(tree.root().is_none());
    }
}
