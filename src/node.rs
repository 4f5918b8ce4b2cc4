//! The chain node entity.
//!
//! A [`ChainNode`] wraps one value together with its `prev`/`next` links.
//! The node performs no validation on its links; the link symmetry invariant
//! (`a.next == b` iff `b.prev == a`) is maintained entirely by the operations
//! in [`chain`](crate::chain).

use crate::Key;

/// One node in a doubly-linked chain.
///
/// Links are sentinel-coded keys into the storage that holds the chain;
/// `K::NONE` marks a chain boundary.
///
/// # Example
///
/// ```
/// use relink::{ChainNode, Key};
///
/// let node: ChainNode<u64> = ChainNode::new(42);
/// assert_eq!(*node.value(), 42);
/// assert!(node.next().is_none());
/// assert!(node.prev().is_none());
/// ```
#[derive(Debug)]
pub struct ChainNode<T, K: Key = u32> {
    pub(crate) value: T,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<T, K: Key> ChainNode<T, K> {
    /// Creates an unlinked node holding `value`.
    ///
    /// Takes the value by move; pass a clone to copy one in.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            prev: K::NONE,
            next: K::NONE,
        }
    }

    /// Returns a reference to the node's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns the key of the next node, or `K::NONE` at the chain end.
    #[inline]
    pub fn next(&self) -> K {
        self.next
    }

    /// Returns the key of the previous node, or `K::NONE` at the chain start.
    #[inline]
    pub fn prev(&self) -> K {
        self.prev
    }
}

impl<T: Default, K: Key> Default for ChainNode<T, K> {
    /// Creates an unlinked node holding `T::default()`.
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unlinked() {
        let node: ChainNode<u64> = ChainNode::new(7);
        assert_eq!(*node.value(), 7);
        assert!(node.next().is_none());
        assert!(node.prev().is_none());
    }

    #[test]
    fn default_node() {
        let node: ChainNode<u64> = ChainNode::default();
        assert_eq!(*node.value(), 0);
        assert!(node.next().is_none());
        assert!(node.prev().is_none());
    }

    #[test]
    fn value_mut_overwrites() {
        let mut node: ChainNode<String, u16> = ChainNode::new("a".into());
        *node.value_mut() = "b".into();
        assert_eq!(node.value(), "b");
    }
}
