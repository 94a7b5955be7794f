use core::borrow::Borrow;
use core::ops::{Bound, RangeBounds};

use super::MultiLeafTree;
use crate::ValueChain;
use crate::leaf_tree::{Range, validate_range_bounds};

impl<K, V> MultiLeafTree<K, V> {
    /// Returns every key in the half-open interval `[start, end)` together
    /// with its values, in ascending key order.
    ///
    /// Subtrees that lie entirely outside the interval are never visited. An
    /// empty or inverted interval gives an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::MultiLeafTree;
    ///
    /// let mut tree = MultiLeafTree::new();
    /// for key in 1..=100 {
    ///     tree.insert(key, key * 10);
    ///     tree.insert(key, key * 10 + 1);
    /// }
    ///
    /// let hits: Vec<_> = tree.interval_find(&10, &20).collect();
    /// assert_eq!(hits.len(), 10);
    /// assert_eq!(*hits[0].0, 10);
    /// assert_eq!(*hits[0].1, [100, 101]);
    /// assert_eq!(*hits[9].0, 19);
    ///
    /// assert_eq!(tree.interval_find(&200, &300).count(), 0);
    /// assert_eq!(tree.interval_find(&20, &10).count(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn interval_find<Q>(&self, start: &Q, end: &Q) -> Range<'_, K, ValueChain<V>>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        Range::new(self.raw.range(Bound::Included(start), Bound::Excluded(end)))
    }

    /// Constructs a double-ended iterator over the keys within `range` and
    /// their values.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::MultiLeafTree;
    ///
    /// let tree: MultiLeafTree<_, _> = [(1, 'a'), (3, 'b'), (3, 'c'), (5, 'd')].into_iter().collect();
    /// let keys: Vec<_> = tree.range(2..=5).rev().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, [5, 3]);
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, ValueChain<V>>
    where
        T: ?Sized + Ord,
        K: Borrow<T> + Ord,
        R: RangeBounds<T>,
    {
        validate_range_bounds(&range);
        Range::new(self.raw.range(range.start_bound(), range.end_bound()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn keys<K: Copy, V>(range: Range<'_, K, ValueChain<V>>) -> Vec<K> {
        range.map(|(key, _)| *key).collect()
    }

    #[test]
    fn interval_is_half_open() {
        let tree: MultiLeafTree<_, _> = (0..50).map(|key| (key * 2, ())).collect();
        assert_eq!(keys(tree.interval_find(&10, &20)), [10, 12, 14, 16, 18]);
        assert_eq!(keys(tree.interval_find(&11, &21)), [12, 14, 16, 18, 20]);
        assert_eq!(keys(tree.interval_find(&-5, &3)), [0, 2]);
        assert_eq!(keys(tree.interval_find(&97, &1000)), [98]);
    }

    #[test]
    fn degenerate_intervals_are_empty() {
        let tree: MultiLeafTree<_, _> = (0..10).map(|key| (key, key)).collect();
        assert_eq!(tree.interval_find(&4, &4).len(), 0);
        assert_eq!(tree.interval_find(&8, &2).len(), 0);
        assert_eq!(tree.interval_find(&10, &20).len(), 0);

        let empty: MultiLeafTree<i32, i32> = MultiLeafTree::new();
        assert_eq!(empty.interval_find(&0, &10).next(), None);
    }

    #[test]
    fn borrowed_interval_bounds() {
        let mut tree = MultiLeafTree::new();
        for word in ["apple", "banana", "cherry", "date"] {
            tree.insert(alloc::string::String::from(word), word.len());
        }
        let hits: Vec<&str> = tree.interval_find("b", "d").map(|(key, _)| key.as_str()).collect();
        assert_eq!(hits, ["banana", "cherry"]);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end")]
    fn inverted_range_panics() {
        let tree: MultiLeafTree<i32, ()> = MultiLeafTree::new();
        let _ = tree.range(5..1);
    }

    proptest! {
        #[test]
        fn interval_matches_filter(
            entries in prop::collection::vec((0u16..500, any::<u8>()), 0..300),
            start in 0u16..520,
            end in 0u16..520,
        ) {
            let tree: MultiLeafTree<_, _> = entries.iter().copied().collect();
            let mut expected: Vec<u16> = entries.iter().map(|&(key, _)| key).filter(|key| (start..end).contains(key)).collect();
            expected.sort_unstable();
            expected.dedup();

            let found = tree.interval_find(&start, &end);
            prop_assert_eq!(found.len(), expected.len());
            prop_assert_eq!(keys(found), expected);
        }
    }
}
