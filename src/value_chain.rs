use core::fmt;
use core::ops::Deref;
use core::slice;

use alloc::vec::Vec;
use smallvec::SmallVec;

/// The values stored under one key of a [`MultiLeafTree`], oldest first.
///
/// Values are only ever appended, so iteration always yields them in the order
/// they were inserted. The first two values are kept inline.
///
/// [`MultiLeafTree`]: crate::MultiLeafTree
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::ValueChain;
///
/// let mut chain = ValueChain::new();
/// chain.push('a');
/// chain.push('b');
/// assert_eq!(chain, ['a', 'b']);
/// assert_eq!(chain.first(), Some(&'a'));
/// assert_eq!(chain.to_vec(), vec!['a', 'b']);
/// ```
pub struct ValueChain<V> {
    values: SmallVec<[V; 2]>,
}

impl<V> ValueChain<V> {
    /// Makes a new, empty chain. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        ValueChain { values: SmallVec::new() }
    }

    pub(crate) fn single(value: V) -> Self {
        let mut chain = ValueChain::new();
        chain.push(value);
        chain
    }

    /// Appends `value` after every value already in the chain.
    pub fn push(&mut self, value: V) {
        self.values.push(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The oldest value.
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.values.first()
    }

    /// The newest value.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.values.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    /// Copies the chain into a vector that no longer borrows it.
    #[must_use]
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values.to_vec()
    }
}

impl<V> Default for ValueChain<V> {
    fn default() -> Self {
        ValueChain::new()
    }
}

impl<V> Deref for ValueChain<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        &self.values
    }
}

impl<V: Clone> Clone for ValueChain<V> {
    fn clone(&self) -> Self {
        ValueChain {
            values: self.values.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ValueChain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for ValueChain<V> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: Eq> Eq for ValueChain<V> {}

impl<V: PartialEq> PartialEq<[V]> for ValueChain<V> {
    fn eq(&self, other: &[V]) -> bool {
        self.as_slice() == other
    }
}

impl<V: PartialEq> PartialEq<&[V]> for ValueChain<V> {
    fn eq(&self, other: &&[V]) -> bool {
        self.as_slice() == *other
    }
}

impl<V: PartialEq, const N: usize> PartialEq<[V; N]> for ValueChain<V> {
    fn eq(&self, other: &[V; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: PartialEq> PartialEq<Vec<V>> for ValueChain<V> {
    fn eq(&self, other: &Vec<V>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V> FromIterator<V> for ValueChain<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        ValueChain {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V> Extend<V> for ValueChain<V> {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl<V> IntoIterator for ValueChain<V> {
    type Item = V;
    type IntoIter = smallvec::IntoIter<[V; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a ValueChain<V> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use static_assertions::assert_impl_all;

    assert_impl_all!(ValueChain<u8>: Send, Sync, Clone, Default);

    #[test]
    fn push_keeps_insertion_order() {
        let mut chain = ValueChain::new();
        for value in [3, 1, 2, 1] {
            chain.push(value);
        }
        assert_eq!(chain, [3, 1, 2, 1]);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.first(), Some(&3));
        assert_eq!(chain.last(), Some(&1));
    }

    #[test]
    fn empty_chain() {
        let chain: ValueChain<u8> = ValueChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
        assert_eq!(chain.as_slice(), &[] as &[u8]);
        assert_eq!(format!("{chain:?}"), "[]");
    }

    #[test]
    fn snapshot_is_detached() {
        let mut chain = ValueChain::single('a');
        let snapshot = chain.to_vec();
        chain.push('b');
        assert_eq!(snapshot, vec!['a']);
        assert_eq!(chain, vec!['a', 'b']);
    }

    #[test]
    fn collects_and_extends() {
        let mut chain: ValueChain<i32> = (0..3).collect();
        chain.extend([7, 8]);
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 7, 8]);
        assert_eq!(chain.into_iter().rev().collect::<Vec<_>>(), vec![8, 7, 2, 1, 0]);
    }

    #[test]
    fn derefs_to_a_slice() {
        let chain: ValueChain<i32> = [4, 5, 6].into_iter().collect();
        assert!(chain.contains(&5));
        assert_eq!(&chain[1..], &[5, 6]);
        assert_eq!(format!("{chain:?}"), "[4, 5, 6]");
    }
}
