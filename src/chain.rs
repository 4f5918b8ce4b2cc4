//! Free functions operating on chains of linked nodes.
//!
//! A *chain* is a sequence of [`ChainNode`]s reachable from a caller-held
//! handle. A handle is a bare key; `K::NONE` means "no chain". Operations
//! that may redirect a handle take it as `&mut K`.
//!
//! Every function here maintains the link symmetry invariant: for any
//! adjacent pair, `a.next == b` iff `b.prev == a`. Nodes themselves never
//! validate their links.
//!
//! # Allocation
//!
//! Allocating operations come in two flavors, matching the storage split:
//! [`insert`]/[`copy`]/[`assign`] for [`UnboundedStorage`] (infallible), and
//! [`try_insert`]/[`try_copy`]/[`try_assign`] for [`BoundedStorage`], which
//! propagate [`Full`] when the arena runs out of slots.
//!
//! # Example
//!
//! ```
//! use relink::{ChainArena, Key, chain};
//!
//! let mut store: ChainArena<u32> = ChainArena::new();
//!
//! // Build [1, 2, 3] by appending after the growing tail
//! let h1 = chain::insert(&mut store, u32::NONE, 1, false);
//! let h2 = chain::insert(&mut store, h1, 2, true);
//! let h3 = chain::insert(&mut store, h2, 3, true);
//!
//! assert_eq!(chain::size(&store, h1), 3);
//! assert_eq!(chain::render(&store, h1), "1, 2, 3");
//!
//! // O(1) splice-out; returns the previous node as the new anchor
//! let anchor = chain::remove(&mut store, h2);
//! assert_eq!(anchor, h1);
//! assert_eq!(chain::render(&store, h1), "1, 3");
//!
//! let mut head = h1;
//! chain::clear(&mut store, &mut head);
//! assert!(head.is_none());
//! assert!(store.is_empty());
//! # let _ = h3;
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::{Arena, BoundedStorage, ChainNode, FixedArena, Full, Key, Storage, UnboundedStorage};

/// Type alias for a growable arena of chain nodes.
pub type ChainArena<T, K = u32> = Arena<ChainNode<T, K>, K>;

/// Type alias for a fixed-capacity arena of chain nodes.
pub type FixedChainArena<T, K = u32> = FixedArena<ChainNode<T, K>, K>;

// =============================================================================
// Insert
// =============================================================================

/// Creates a new node holding `value` and splices it adjacent to `current`.
///
/// If `current` is `K::NONE` the new node is returned as an unlinked
/// singleton. Otherwise the new node is placed immediately before `current`
/// (`after = false`) or immediately after it (`after = true`), with both
/// neighbor sides rewired. O(1), no traversal.
///
/// Returns the new node's key.
///
/// # Panics
///
/// Panics if `current` is not `K::NONE` and not resident in `store`.
#[inline]
pub fn insert<T, K, S>(store: &mut S, current: K, value: T, after: bool) -> K
where
    K: Key,
    S: UnboundedStorage<ChainNode<T, K>, Key = K>,
{
    let fresh = store.insert(ChainNode::new(value));
    splice(store, current, fresh, after);
    fresh
}

/// Fallible [`insert`] for bounded storage.
///
/// # Errors
///
/// Returns `Err(Full(value))` if the arena has no free slot; the chain is
/// untouched.
///
/// # Panics
///
/// Panics if `current` is not `K::NONE` and not resident in `store`.
#[inline]
pub fn try_insert<T, K, S>(
    store: &mut S,
    current: K,
    value: T,
    after: bool,
) -> Result<K, Full<T>>
where
    K: Key,
    S: BoundedStorage<ChainNode<T, K>, Key = K>,
{
    let fresh = store
        .try_insert(ChainNode::new(value))
        .map_err(|e| Full(e.0.value))?;
    splice(store, current, fresh, after);
    Ok(fresh)
}

/// Wires an unlinked `fresh` node in next to `current`.
fn splice<T, K, S>(store: &mut S, current: K, fresh: K, after: bool)
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if current.is_none() {
        return;
    }

    if after {
        let next = store.get(current).expect("invalid key").next;
        {
            let node = store.get_mut(fresh).unwrap();
            node.prev = current;
            node.next = next;
        }
        store.get_mut(current).unwrap().next = fresh;
        if next.is_some() {
            store.get_mut(next).unwrap().prev = fresh;
        }
    } else {
        let prev = store.get(current).expect("invalid key").prev;
        {
            let node = store.get_mut(fresh).unwrap();
            node.next = current;
            node.prev = prev;
        }
        store.get_mut(current).unwrap().prev = fresh;
        if prev.is_some() {
            store.get_mut(prev).unwrap().next = fresh;
        }
    }
}

// =============================================================================
// Remove
// =============================================================================

/// Unlinks and frees the node at `target`.
///
/// Both neighbors are rewired to each other before the node is freed.
/// Returns the previous neighbor if present, else the next neighbor, else
/// `K::NONE`, so the caller keeps a valid anchor into the surviving chain.
///
/// A `K::NONE` target is a no-op returning `K::NONE`. O(1).
///
/// # Panics
///
/// Panics if `target` is not `K::NONE` and not resident in `store`.
#[inline]
pub fn remove<T, K, S>(store: &mut S, target: K) -> K
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if target.is_none() {
        return K::NONE;
    }

    let (prev, next) = {
        let node = store.get(target).expect("invalid key");
        (node.prev, node.next)
    };

    if prev.is_some() {
        store.get_mut(prev).unwrap().next = next;
    }
    if next.is_some() {
        store.get_mut(next).unwrap().prev = prev;
    }

    store.remove(target);

    if prev.is_some() { prev } else { next }
}

// =============================================================================
// Copy
// =============================================================================

/// Deep-copies the chain starting at `source`.
///
/// Produces an independent chain with the same sequence of values and no
/// shared nodes, built by appending after the growing tail. A `K::NONE`
/// source yields `K::NONE`. O(n).
///
/// Returns the new chain's head.
///
/// # Panics
///
/// Panics if `source` is not `K::NONE` and not resident in `store`.
pub fn copy<T, K, S>(store: &mut S, source: K) -> K
where
    T: Clone,
    K: Key,
    S: UnboundedStorage<ChainNode<T, K>, Key = K>,
{
    if source.is_none() {
        return K::NONE;
    }

    let value = store.get(source).expect("invalid key").value.clone();
    let head = store.insert(ChainNode::new(value));

    let mut src = store.get(source).unwrap().next;
    let mut tail = head;
    while src.is_some() {
        let value = store.get(src).unwrap().value.clone();
        tail = insert(store, tail, value, true);
        src = store.get(src).unwrap().next;
    }

    head
}

/// Fallible [`copy`] for bounded storage.
///
/// # Errors
///
/// Returns `Err(Full(value))` carrying the first value that could not be
/// placed. The partially built chain is freed before returning, so storage
/// holds no orphaned nodes.
///
/// # Panics
///
/// Panics if `source` is not `K::NONE` and not resident in `store`.
pub fn try_copy<T, K, S>(store: &mut S, source: K) -> Result<K, Full<T>>
where
    T: Clone,
    K: Key,
    S: BoundedStorage<ChainNode<T, K>, Key = K>,
{
    if source.is_none() {
        return Ok(K::NONE);
    }

    let value = store.get(source).expect("invalid key").value.clone();
    let mut head = store
        .try_insert(ChainNode::new(value))
        .map_err(|e| Full(e.0.value))?;

    let mut src = store.get(source).unwrap().next;
    let mut tail = head;
    while src.is_some() {
        let value = store.get(src).unwrap().value.clone();
        match try_insert(store, tail, value, true) {
            Ok(fresh) => tail = fresh,
            Err(e) => {
                clear(store, &mut head);
                return Err(e);
            }
        }
        src = store.get(src).unwrap().next;
    }

    Ok(head)
}

// =============================================================================
// Assign
// =============================================================================

/// Resynchronizes the destination chain to match `source`'s values.
///
/// Existing destination nodes are reused: their values are overwritten in
/// lockstep with the source walk, with no link changes. If the source is
/// longer, the remaining values are appended after the destination's tail
/// (redirecting `dest` if it was empty). If the destination is longer, the
/// surplus suffix is detached on both sides and freed. Equal lengths touch
/// no links at all.
///
/// O(max(len(source), len(destination))).
///
/// # Panics
///
/// Panics if `*dest` or `source` names a key not resident in `store`
/// (`K::NONE` is fine for either).
pub fn assign<T, K, S>(store: &mut S, dest: &mut K, source: K)
where
    T: Clone,
    K: Key,
    S: UnboundedStorage<ChainNode<T, K>, Key = K>,
{
    let (mut src, mut des, last_kept) = assign_overwrite(store, *dest, source);

    if src.is_some() {
        // Source surplus: append after the destination's tail
        let mut tail = last_kept;
        while src.is_some() {
            let value = store.get(src).unwrap().value.clone();
            let fresh = insert(store, tail, value, true);
            if tail.is_none() {
                *dest = fresh;
            }
            tail = fresh;
            src = store.get(src).unwrap().next;
        }
    } else if des.is_some() {
        assign_truncate(store, dest, last_kept, &mut des);
    }
}

/// Fallible [`assign`] for bounded storage.
///
/// # Errors
///
/// Returns `Err(Full(value))` if the append phase runs out of slots. The
/// destination is left holding the values synced so far: the overwritten
/// prefix plus any nodes already appended.
///
/// # Panics
///
/// Panics if `*dest` or `source` names a key not resident in `store`.
pub fn try_assign<T, K, S>(store: &mut S, dest: &mut K, source: K) -> Result<(), Full<T>>
where
    T: Clone,
    K: Key,
    S: BoundedStorage<ChainNode<T, K>, Key = K>,
{
    let (mut src, mut des, last_kept) = assign_overwrite(store, *dest, source);

    if src.is_some() {
        let mut tail = last_kept;
        while src.is_some() {
            let value = store.get(src).unwrap().value.clone();
            let fresh = try_insert(store, tail, value, true)?;
            if tail.is_none() {
                *dest = fresh;
            }
            tail = fresh;
            src = store.get(src).unwrap().next;
        }
    } else if des.is_some() {
        assign_truncate(store, dest, last_kept, &mut des);
    }

    Ok(())
}

/// Lockstep overwrite phase shared by [`assign`] and [`try_assign`].
///
/// Returns `(src, des, last_kept)`: the first unmatched source key, the
/// first unmatched destination key, and the last destination node whose
/// value was overwritten.
fn assign_overwrite<T, K, S>(store: &mut S, dest: K, source: K) -> (K, K, K)
where
    T: Clone,
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    let mut src = source;
    let mut des = dest;
    let mut last_kept = K::NONE;

    while src.is_some() && des.is_some() {
        let value = store.get(src).expect("invalid key").value.clone();
        let node = store.get_mut(des).expect("invalid key");
        node.value = value;
        last_kept = des;
        des = node.next;
        src = store.get(src).unwrap().next;
    }

    (src, des, last_kept)
}

/// Detaches the destination's surplus suffix and frees it.
fn assign_truncate<T, K, S>(store: &mut S, dest: &mut K, last_kept: K, surplus: &mut K)
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if last_kept.is_some() {
        store.get_mut(last_kept).unwrap().next = K::NONE;
        store.get_mut(*surplus).unwrap().prev = K::NONE;
    } else {
        // Every destination node is surplus
        *dest = K::NONE;
    }
    clear(store, surplus);
}

// =============================================================================
// Swap / size / clear
// =============================================================================

/// Exchanges two chain handles.
///
/// O(1); no node is visited, allocated, or freed.
#[inline]
pub fn swap<K: Key>(a: &mut K, b: &mut K) {
    mem::swap(a, b);
}

/// Counts the nodes reachable from `head` by following `next`.
///
/// A `K::NONE` head yields 0. Iterative, so chain length never translates
/// into call-stack depth. O(n), no mutation.
///
/// # Panics
///
/// Panics if `head` is not `K::NONE` and not resident in `store`.
pub fn size<T, K, S>(store: &S, head: K) -> usize
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    let mut count = 0;
    let mut key = head;
    while key.is_some() {
        count += 1;
        key = store.get(key).expect("invalid key").next;
    }
    count
}

/// Frees every node reachable from the handle by following `next`, then
/// sets the handle to `K::NONE`.
///
/// Each node's `next` is read before the node is freed. O(n).
///
/// # Panics
///
/// Panics if `*head` is not `K::NONE` and not resident in `store`.
pub fn clear<T, K, S>(store: &mut S, head: &mut K)
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    let mut key = *head;
    while key.is_some() {
        let next = store.get(key).expect("invalid key").next;
        store.remove(key);
        key = next;
    }
    *head = K::NONE;
}

// =============================================================================
// Navigation / find
// =============================================================================

/// Returns the key of the node after `key`, or `K::NONE` at the chain end.
///
/// A `K::NONE` key yields `K::NONE`.
///
/// # Panics
///
/// Panics if `key` is not `K::NONE` and not resident in `store`.
#[inline]
pub fn next<T, K, S>(store: &S, key: K) -> K
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if key.is_none() {
        K::NONE
    } else {
        store.get(key).expect("invalid key").next
    }
}

/// Returns the key of the node before `key`, or `K::NONE` at the chain start.
///
/// A `K::NONE` key yields `K::NONE`.
///
/// # Panics
///
/// Panics if `key` is not `K::NONE` and not resident in `store`.
#[inline]
pub fn prev<T, K, S>(store: &S, key: K) -> K
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if key.is_none() {
        K::NONE
    } else {
        store.get(key).expect("invalid key").prev
    }
}

/// Walks forward from `head` and returns the first node holding a value
/// equal to `value`, or `K::NONE` if no node matches.
///
/// A `K::NONE` head yields `K::NONE`. O(n).
///
/// # Panics
///
/// Panics if `head` is not `K::NONE` and not resident in `store`.
pub fn find<T, K, S>(store: &S, head: K, value: &T) -> K
where
    T: PartialEq,
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    let mut key = head;
    while key.is_some() {
        let node = store.get(key).expect("invalid key");
        if node.value == *value {
            return key;
        }
        key = node.next;
    }
    K::NONE
}

// =============================================================================
// Render
// =============================================================================

/// Renders the chain's values in order, comma-and-space separated.
///
/// No trailing separator; an empty chain renders as the empty string.
/// Read-only, O(n).
pub fn render<T, K, S>(store: &S, head: K) -> String
where
    T: fmt::Display,
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    Render::new(store, head).to_string()
}

/// Display adapter that streams a chain's values into a formatter.
///
/// # Example
///
/// ```
/// use relink::{ChainArena, Key, chain::{self, Render}};
///
/// let mut store: ChainArena<u32> = ChainArena::new();
/// let head = chain::insert(&mut store, u32::NONE, 1, false);
/// chain::insert(&mut store, head, 2, true);
///
/// assert_eq!(format!("[{}]", Render::new(&store, head)), "[1, 2]");
/// ```
pub struct Render<'a, T, S, K: Key> {
    store: &'a S,
    head: K,
    _marker: PhantomData<T>,
}

impl<'a, T, S, K: Key> Render<'a, T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    /// Creates a renderer for the chain starting at `head`.
    #[inline]
    pub fn new(store: &'a S, head: K) -> Self {
        Self {
            store,
            head,
            _marker: PhantomData,
        }
    }
}

impl<T, S, K: Key> fmt::Display for Render<'_, T, S, K>
where
    T: fmt::Display,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut key = self.head;
        let mut first = true;
        while key.is_some() {
            let node = self.store.get(key).expect("invalid key");
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", node.value)?;
            first = false;
            key = node.next;
        }
        Ok(())
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Checks the chain invariants starting at `head`: every link must be
/// resident, adjacent links must be symmetric, and both the forward and
/// backward walks must terminate within the storage's population (which a
/// cycle cannot).
///
/// A `K::NONE` head is trivially well-formed. Intended for debug assertions
/// and tests; release paths never call it.
pub fn is_well_formed<T, K, S>(store: &S, head: K) -> bool
where
    K: Key,
    S: Storage<ChainNode<T, K>, Key = K>,
{
    if head.is_none() {
        return true;
    }

    let limit = store.len();

    // Forward walk checking next/prev symmetry
    let mut steps = 0;
    let mut key = head;
    while key.is_some() {
        steps += 1;
        if steps > limit {
            return false;
        }
        let Some(node) = store.get(key) else {
            return false;
        };
        let nxt = node.next;
        if nxt.is_some() {
            match store.get(nxt) {
                Some(neighbor) if neighbor.prev == key => {}
                _ => return false,
            }
        }
        key = nxt;
    }

    // Backward walk from head
    let mut steps = 0;
    let mut key = head;
    while key.is_some() {
        steps += 1;
        if steps > limit {
            return false;
        }
        let Some(node) = store.get(key) else {
            return false;
        };
        let prv = node.prev;
        if prv.is_some() {
            match store.get(prv) {
                Some(neighbor) if neighbor.next == key => {}
                _ => return false,
            }
        }
        key = prv;
    }

    true
}
