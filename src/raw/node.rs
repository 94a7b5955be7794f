use super::handle::Handle;
use super::weight::Weight;

pub(crate) enum Node<K, V> {
    Interior(InteriorNode<K>),
    Leaf(LeafNode<K, V>),
}

// Leaf tree: interior nodes only route. `key` is the largest key in the left
// subtree, so a search goes left iff `search <= key`.
pub(crate) struct InteriorNode<K> {
    pub(crate) key: K,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    // Number of leaves below this node.
    pub(crate) weight: Weight,
}

pub(crate) struct LeafNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// Which child of an interior node a descent took.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Node::Leaf(LeafNode { key, value })
    }

    pub(crate) fn interior(key: K, left: Handle, right: Handle, weight: Weight) -> Self {
        Node::Interior(InteriorNode {
            key,
            left,
            right,
            weight,
        })
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub(crate) fn key(&self) -> &K {
        match self {
            Node::Interior(interior) => &interior.key,
            Node::Leaf(leaf) => &leaf.key,
        }
    }

    pub(crate) fn key_mut(&mut self) -> &mut K {
        match self {
            Node::Interior(interior) => &mut interior.key,
            Node::Leaf(leaf) => &mut leaf.key,
        }
    }

    /// Leaf count of the subtree rooted here.
    pub(crate) fn weight(&self) -> Weight {
        match self {
            Node::Interior(interior) => interior.weight,
            Node::Leaf(_) => Weight::ONE,
        }
    }

    /// Returns the leaf, panicking if this is an interior node.
    pub(crate) fn as_leaf(&self) -> &LeafNode<K, V> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Interior(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the leaf mutably, panicking if this is an interior node.
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode<K, V> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Interior(_) => panic!("expected leaf node"),
        }
    }

    /// Unwraps the leaf, panicking if this is an interior node.
    pub(crate) fn into_leaf(self) -> LeafNode<K, V> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Interior(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the interior node, panicking if this is a leaf.
    pub(crate) fn as_interior(&self) -> &InteriorNode<K> {
        match self {
            Node::Interior(interior) => interior,
            Node::Leaf(_) => panic!("expected interior node"),
        }
    }

    /// Returns the interior node mutably, panicking if this is a leaf.
    pub(crate) fn as_interior_mut(&mut self) -> &mut InteriorNode<K> {
        match self {
            Node::Interior(interior) => interior,
            Node::Leaf(_) => panic!("expected interior node"),
        }
    }
}

impl<K> InteriorNode<K> {
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Handle {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Handle) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

impl<K: Clone, V: Clone> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        match self {
            Node::Interior(interior) => Node::interior(interior.key.clone(), interior.left, interior.right, interior.weight),
            Node::Leaf(leaf) => Node::leaf(leaf.key.clone(), leaf.value.clone()),
        }
    }
}
