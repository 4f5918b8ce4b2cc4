//! Doubly-linked node chains over slot arenas with stable keys.
//!
//! This crate provides the node-level primitive underneath a list container:
//! a [`ChainNode`] holding one value plus two sentinel-coded neighbor links,
//! and a small algebra of free functions ([`chain`]) that rewire those links.
//! A container built on top gets value semantics for free: deep
//! [`copy`](chain::copy), node-reusing [`assign`](chain::assign), O(1)
//! [`swap`](chain::swap) for build-aside-then-swap exception safety, and
//! O(1) splice-style [`insert`](chain::insert)/[`remove`](chain::remove).
//!
//! # Design Philosophy
//!
//! Raw `prev`/`next` pointers need manual lifetime tracking. This crate
//! stores nodes in an arena and links them by stable key instead:
//!
//! ```text
//! Arena (slots)     - owns the nodes, hands out stable keys
//! chain functions   - rewire keys, never touch memory directly
//! ```
//!
//! - **Stable keys**: removing a node never invalidates another handle
//! - **O(1) splice**: insert/remove rewire two neighbors, no traversal
//! - **No dangling links**: freeing goes through the arena, and every
//!   unlink completes the symmetry fix-up on both sides first
//! - **Checkable invariants**: [`chain::is_well_formed`] validates link
//!   symmetry and acyclicity in tests and debug passes
//!
//! # Quick Start
//!
//! ```
//! use relink::{ChainArena, Key, chain};
//!
//! let mut store: ChainArena<u32> = ChainArena::new();
//!
//! // A handle is a key; u32::NONE means "no chain"
//! let head = chain::insert(&mut store, u32::NONE, 1, false);
//! let tail = chain::insert(&mut store, head, 2, true);
//! chain::insert(&mut store, tail, 3, true);
//!
//! assert_eq!(chain::size(&store, head), 3);
//! assert_eq!(chain::render(&store, head), "1, 2, 3");
//!
//! // Deep copy, then resync it to a different chain in place
//! let mut dup = chain::copy(&mut store, head);
//! chain::assign(&mut store, &mut dup, tail);
//! assert_eq!(chain::render(&store, dup), "2, 3");
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a chain must use the storage instance that holds its
//! nodes. Passing a handle together with a different storage is a caller
//! contract violation: operations panic on keys the storage does not hold,
//! and keys that happen to be occupied in the other storage name unrelated
//! nodes. This is the caller's responsibility (same discipline as the
//! `slab` crate).
//!
//! # Concurrency
//!
//! None. Every operation is synchronous and single-threaded; callers
//! needing shared access serialize externally.
//!
//! # Feature Flags
//!
//! - `slab` - [`Storage`]/[`UnboundedStorage`] impls for `slab::Slab`

#![warn(missing_docs)]

pub mod chain;
pub mod key;
pub mod node;
pub mod storage;

pub use chain::{ChainArena, FixedChainArena, Render};
pub use key::Key;
pub use node::ChainNode;
pub use storage::{Arena, BoundedStorage, FixedArena, Full, Storage, UnboundedStorage};
