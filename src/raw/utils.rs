//! Stateless helpers over a node arena: measurements, key swaps, splices and
//! the two rotation primitives the balancing walk is built from.

use core::mem;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::weight::Weight;

pub(crate) type Nodes<K, V> = Arena<Node<K, V>>;

/// Length of the longest path from `node` down to a leaf.
pub(crate) fn height<K, V>(nodes: &Nodes<K, V>, node: Handle) -> usize {
    match nodes.get(node) {
        Node::Leaf(_) => 0,
        Node::Interior(interior) => 1 + height(nodes, interior.left).max(height(nodes, interior.right)),
    }
}

/// Leaf count of the subtree at `node`, read from the cached interior weight.
#[inline]
pub(crate) fn weight<K, V>(nodes: &Nodes<K, V>, node: Handle) -> Weight {
    nodes.get(node).weight()
}

/// Leaf count of the subtree at `node`, counted leaf by leaf.
pub(crate) fn recount<K, V>(nodes: &Nodes<K, V>, node: Handle) -> usize {
    match nodes.get(node) {
        Node::Leaf(_) => 1,
        Node::Interior(interior) => recount(nodes, interior.left) + recount(nodes, interior.right),
    }
}

pub(crate) fn leaf_count<K, V>(nodes: &Nodes<K, V>, root: Option<Handle>) -> usize {
    root.map_or(0, |root| weight(nodes, root).get())
}

pub(crate) fn swap_keys<K, V>(nodes: &mut Nodes<K, V>, a: Handle, b: Handle) {
    let (a, b) = nodes.get_pair_mut(a, b);
    mem::swap(a.key_mut(), b.key_mut());
}

/// Moves the whole content of `source` into `target`'s slot and frees
/// `source`. Whatever `target` held before is dropped.
///
/// Parents keep pointing at `target`, so this splices a subtree one level up
/// without touching the grandparent.
pub(crate) fn copy_node<K, V>(nodes: &mut Nodes<K, V>, target: Handle, source: Handle) -> Handle {
    let content = nodes.take(source);
    *nodes.get_mut(target) = content;
    target
}

/// Recomputes an interior node's cached weight from its children.
pub(crate) fn refresh_weight<K, V>(nodes: &mut Nodes<K, V>, node: Handle) {
    let (left, right) = {
        let interior = nodes.get(node).as_interior();
        (interior.left, interior.right)
    };
    let total = weight(nodes, left) + weight(nodes, right);
    nodes.get_mut(node).as_interior_mut().weight = total;
}

/// `n{kN, L{kL, A, B}, R}` becomes `n{kL, A, L{kN, B, R}}`.
///
/// `L` keeps its slot and becomes the right child. Weight moves from the left
/// subtree of `node` to its right subtree.
///
/// # Panics
///
/// Panics if `node` or `node.left` is a leaf.
pub(crate) fn rotate_right<K, V>(nodes: &mut Nodes<K, V>, node: Handle) -> Handle {
    let Node::Interior(interior) = nodes.get(node) else {
        panic!("`rotate_right()` - `node` is a leaf!");
    };
    let (pivot, right) = (interior.left, interior.right);
    let Node::Interior(pivot_node) = nodes.get(pivot) else {
        panic!("`rotate_right()` - `node.left` is a leaf!");
    };
    let (outer, inner) = (pivot_node.left, pivot_node.right);

    swap_keys(nodes, node, pivot);
    let top = nodes.get_mut(node).as_interior_mut();
    top.left = outer;
    top.right = pivot;
    let moved = nodes.get_mut(pivot).as_interior_mut();
    moved.left = inner;
    moved.right = right;
    refresh_weight(nodes, pivot);
    node
}

/// `n{kN, L, R{kR, C, D}}` becomes `n{kR, R{kN, L, C}, D}`.
///
/// # Panics
///
/// Panics if `node` or `node.right` is a leaf.
pub(crate) fn rotate_left<K, V>(nodes: &mut Nodes<K, V>, node: Handle) -> Handle {
    let Node::Interior(interior) = nodes.get(node) else {
        panic!("`rotate_left()` - `node` is a leaf!");
    };
    let (left, pivot) = (interior.left, interior.right);
    let Node::Interior(pivot_node) = nodes.get(pivot) else {
        panic!("`rotate_left()` - `node.right` is a leaf!");
    };
    let (inner, outer) = (pivot_node.left, pivot_node.right);

    swap_keys(nodes, node, pivot);
    let top = nodes.get_mut(node).as_interior_mut();
    top.left = pivot;
    top.right = outer;
    let moved = nodes.get_mut(pivot).as_interior_mut();
    moved.left = left;
    moved.right = inner;
    refresh_weight(nodes, pivot);
    node
}
