use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use bb_leaf_tree::{Alpha, MultiLeafTree, ValueChain};

/// Deterministic pseudo-random keys using an LCG.
fn random_keys_deterministic(n: usize, modulo: u64) -> Vec<u64> {
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345; // Fixed seed for reproducibility
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) % modulo);
    }
    keys
}

fn assert_balanced<K: Ord, V>(tree: &MultiLeafTree<K, V>) {
    let alpha = tree.alpha();
    tree.traverse(|node| assert!(node.is_balanced(alpha)));
}

// ─── Duplicate keys ───────────────────────────────────────────────────────────

#[test]
fn duplicates_are_kept_in_insertion_order() {
    let mut tree = MultiLeafTree::new();
    tree.insert(5, 'a');
    tree.insert(5, 'b');
    assert_eq!(tree.find_snapshot(&5), vec!['a', 'b']);
    assert_eq!(tree.key_count(), 1);

    let removed = tree.remove(&5);
    assert_eq!(removed.to_vec(), vec!['a', 'b']);
    assert!(tree.remove(&5).is_empty());
    assert!(tree.is_empty());

    tree.set(5, 'x');
    assert_eq!(tree.find_snapshot(&5), vec!['x']);
    assert_eq!(tree.value_count(), 1);
}

#[test]
fn set_replaces_the_whole_chain() {
    let mut tree = MultiLeafTree::new();
    for value in 0..5 {
        tree.insert("key", value);
    }
    tree.insert("other", 9);
    let height = tree.height();
    tree.set("key", 42);
    assert_eq!(tree.find(&"key"), [42]);
    assert_eq!(tree.find(&"other"), [9]);
    assert_eq!(tree.value_count(), 2);
    assert_eq!(tree.height(), height);
}

#[test]
fn find_view_and_chain_agree() {
    let mut tree = MultiLeafTree::with_alpha(Alpha::new(0.25).unwrap());
    for (i, key) in random_keys_deterministic(2_000, 300).into_iter().enumerate() {
        tree.insert(key, i);
    }
    assert_balanced(&tree);
    for key in 0..300 {
        let view = tree.find(&key);
        match tree.get(&key) {
            Some(chain) => {
                assert_eq!(chain.as_slice(), view);
                assert!(view.windows(2).all(|pair| pair[0] < pair[1]), "values out of insertion order");
            }
            None => assert!(view.is_empty()),
        }
    }
    let total: usize = tree.iter().map(|(_, chain)| chain.len()).sum();
    assert_eq!(total, 2_000);
    assert_eq!(tree.value_count(), 2_000);
}

// ─── Interval queries ─────────────────────────────────────────────────────────

#[test]
fn interval_find_returns_each_key_with_its_chain() {
    let mut tree = MultiLeafTree::new();
    for key in 1..=100 {
        tree.insert(key, format!("{key}a"));
        tree.insert(key, format!("{key}b"));
    }
    assert_balanced(&tree);

    let hits: Vec<(i32, Vec<String>)> = tree
        .interval_find(&10, &20)
        .map(|(key, chain)| (*key, chain.to_vec()))
        .collect();
    let expected: Vec<(i32, Vec<String>)> = (10..20).map(|key| (key, vec![format!("{key}a"), format!("{key}b")])).collect();
    assert_eq!(hits, expected);
}

#[test]
fn interval_find_empty_cases() {
    let empty: MultiLeafTree<i32, i32> = MultiLeafTree::new();
    assert_eq!(empty.interval_find(&0, &100).count(), 0);

    let tree: MultiLeafTree<i32, i32> = (1..=100).map(|key| (key, key)).collect();
    assert_eq!(tree.interval_find(&101, &200).count(), 0);
    assert_eq!(tree.interval_find(&50, &50).count(), 0);
    assert_eq!(tree.interval_find(&60, &40).count(), 0);
    assert_eq!(tree.interval_find(&-10, &1).count(), 0);
    assert_eq!(tree.interval_find(&100, &101).map(|(key, _)| *key).collect::<Vec<_>>(), vec![100]);
}

#[test]
fn interval_find_is_double_ended() {
    let tree: MultiLeafTree<i32, i32> = (0..40).map(|key| (key, key)).collect();
    let mut hits = tree.interval_find(&5, &12);
    assert_eq!(hits.len(), 7);
    assert_eq!(hits.next().map(|(key, _)| *key), Some(5));
    assert_eq!(hits.next_back().map(|(key, _)| *key), Some(11));
    assert_eq!(hits.len(), 5);
    assert_eq!(hits.map(|(key, _)| *key).collect::<Vec<_>>(), vec![6, 7, 8, 9, 10]);
}

// ─── Randomized comparisons against BTreeMap<K, Vec<V>> ───────────────────────

#[derive(Debug, Clone)]
enum MultiOp {
    Insert(i16, u32),
    Set(i16, u32),
    Remove(i16),
    Find(i16),
    Interval(i16, i16),
}

fn multi_op_strategy() -> impl Strategy<Value = MultiOp> {
    let key = || -200i16..200;
    prop_oneof![
        6 => (key(), any::<u32>()).prop_map(|(k, v)| MultiOp::Insert(k, v)),
        1 => (key(), any::<u32>()).prop_map(|(k, v)| MultiOp::Set(k, v)),
        3 => key().prop_map(MultiOp::Remove),
        2 => key().prop_map(MultiOp::Find),
        1 => (key(), key()).prop_map(|(a, b)| MultiOp::Interval(a, b)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn multi_ops_match_btreemap(ops in proptest::collection::vec(multi_op_strategy(), 1_000)) {
        let mut tree: MultiLeafTree<i16, u32> = MultiLeafTree::new();
        let mut model: BTreeMap<i16, Vec<u32>> = BTreeMap::new();

        for op in &ops {
            match *op {
                MultiOp::Insert(k, v) => {
                    tree.insert(k, v);
                    model.entry(k).or_default().push(v);
                }
                MultiOp::Set(k, v) => {
                    tree.set(k, v);
                    model.insert(k, vec![v]);
                }
                MultiOp::Remove(k) => {
                    let removed: ValueChain<u32> = tree.remove(&k);
                    prop_assert_eq!(removed.to_vec(), model.remove(&k).unwrap_or_default(), "remove({})", k);
                }
                MultiOp::Find(k) => {
                    let expected = model.get(&k).map_or(&[][..], Vec::as_slice);
                    prop_assert_eq!(tree.find(&k), expected, "find({})", k);
                }
                MultiOp::Interval(a, b) => {
                    let found: Vec<(i16, Vec<u32>)> = tree.interval_find(&a, &b).map(|(k, c)| (*k, c.to_vec())).collect();
                    let expected: Vec<(i16, Vec<u32>)> = if a < b {
                        model.range(a..b).map(|(k, v)| (*k, v.clone())).collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(found, expected, "interval_find({}, {})", a, b);
                }
            }
            prop_assert_eq!(tree.key_count(), model.len());
            prop_assert_eq!(tree.value_count(), model.values().map(Vec::len).sum::<usize>());
        }
        assert_balanced(&tree);
    }
}
