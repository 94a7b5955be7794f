mod arena;
mod cursor;
mod handle;
mod node;
mod raw_leaf_tree;
pub(crate) mod utils;
mod weight;

pub(crate) use cursor::Cursor;
pub(crate) use handle::Handle;
pub(crate) use node::{LeafNode, Node};
pub(crate) use raw_leaf_tree::{Occupied, RawLeafTree};
