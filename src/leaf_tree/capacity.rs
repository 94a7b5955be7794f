use super::LeafTree;
use crate::Alpha;
use crate::raw::RawLeafTree;

impl<K, V> LeafTree<K, V> {
    /// Creates an empty tree with room for at least `capacity` entries
    /// before the node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use bb_leaf_tree::LeafTree;
    ///
    /// let tree: LeafTree<i32, i32> = LeafTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LeafTree {
            raw: RawLeafTree::with_capacity(Alpha::DEFAULT, capacity),
        }
    }

    /// Returns how many entries the tree can hold without reallocating.
    ///
    /// Each entry needs a leaf and, past the first, an interior node, so
    /// this is about half the number of node slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn filling_to_capacity_does_not_grow() {
        let mut tree = LeafTree::with_capacity(100);
        let capacity = tree.capacity();
        assert!(capacity >= 100);
        for key in 0..100 {
            tree.insert(key, ());
        }
        assert_eq!(tree.capacity(), capacity);
    }

    #[test]
    fn zero_capacity() {
        let tree: LeafTree<u8, u8> = LeafTree::with_capacity(0);
        assert_eq!(tree.capacity(), 0);
    }
}
