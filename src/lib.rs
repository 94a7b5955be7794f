//! Weight-balanced leaf trees for Rust.
//!
//! This crate provides two ordered containers built on the same BB\[α\]
//! balancing engine:
//!
//! - [`LeafTree`] - an ordered map with unique keys.
//! - [`MultiLeafTree`] - keeps every value inserted under a key, in insertion
//!   order, and answers half-open [interval queries](MultiLeafTree::interval_find).
//!
//! # Example
//!
//! ```
//! use bb_leaf_tree::{Alpha, LeafTree, MultiLeafTree};
//!
//! let mut tree = LeafTree::with_alpha(Alpha::new(0.29).unwrap());
//! for key in 1..=100 {
//!     tree.insert(key, ());
//! }
//! assert!(!tree.insert(50, ()));
//! assert_eq!(tree.leaf_count(), 100);
//!
//! // Every interior node keeps at least α of its leaves on each side.
//! tree.traverse(|node| assert!(node.is_balanced(tree.alpha())));
//!
//! let mut events = MultiLeafTree::new();
//! events.insert(9, "breakfast");
//! events.insert(12, "lunch");
//! events.insert(12, "meeting");
//! events.insert(19, "dinner");
//!
//! let midday: Vec<_> = events.interval_find(&11, &14).collect();
//! assert_eq!(midday.len(), 1);
//! assert_eq!(*midday[0].1, ["lunch", "meeting"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Configurable balance** - The balance factor [`Alpha`] is chosen per tree
//! - **Leaf-oriented** - Values live only at leaves; interior nodes route searches
//! - **Pruned range queries** - Subtrees outside a range are skipped and the
//!   size of the result is known up front
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to each other by index. Interior
//! nodes cache the number of leaves below them. After an insertion or removal
//! the nodes on the descent path are revisited bottom-up, and any node whose
//! lighter child holds less than `α` of its leaves is repaired with a single
//! or double rotation. Rotations rewire children and swap separator keys in
//! place, so no node moves to a different slot.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod alpha;
mod node_ref;
mod raw;
mod value_chain;

pub mod leaf_tree;
pub mod multi_leaf_tree;

pub use alpha::{Alpha, AlphaError};
pub use leaf_tree::LeafTree;
pub use multi_leaf_tree::MultiLeafTree;
pub use node_ref::NodeRef;
pub use value_chain::ValueChain;
