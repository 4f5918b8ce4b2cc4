//! Slot arenas with stable keys.
//!
//! Chains never hold pointers; nodes live in an arena and refer to each
//! other by key. A key remains valid until the slot it names is removed,
//! so splicing a node out of one position and into another never
//! invalidates anything else.
//!
//! Storage is split into bounded and unbounded flavors:
//!
//! ```text
//! Storage<T>           - base trait: get, get_mut, remove, len
//!     ├── BoundedStorage<T>   - fixed capacity, try_insert -> Result
//!     └── UnboundedStorage<T> - growable, insert -> Key (infallible)
//! ```
//!
//! [`Arena`] is the growable default; [`FixedArena`] pre-allocates a fixed
//! number of slots and surfaces exhaustion as a typed [`Full`] error.
//! Enable the `slab` feature to back chains with `slab::Slab` instead.

use crate::Key;

/// Slot storage with stable keys.
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** get and remove
/// - **Slot reuse**: removed slots are reused by future inserts
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-capacity storage; insertion can fail with [`Full`].
pub trait BoundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if every slot is occupied.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;
}

/// Growable storage; insertion is infallible.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;
}

/// Error returned when fixed-capacity storage is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

/// A slot: either a live value or a link in the free list.
#[derive(Debug)]
enum Slot<T, K> {
    Occupied(T),
    Vacant { next_free: K },
}

// =============================================================================
// Arena - growable slot storage
// =============================================================================

/// Growable slot arena with stable keys.
///
/// Freed slots go onto an intrusive free list and are reused LIFO before
/// the backing vector grows. Keys are slot indices and stay valid until
/// their slot is removed.
///
/// # Example
///
/// ```
/// use relink::{Arena, Storage, UnboundedStorage};
///
/// let mut arena: Arena<u64> = Arena::new();
///
/// let key = arena.insert(42);
/// assert_eq!(arena.get(key), Some(&42));
///
/// assert_eq!(arena.remove(key), Some(42));
/// assert_eq!(arena.get(key), None);
/// ```
#[derive(Debug)]
pub struct Arena<T, K: Key = u32> {
    slots: Vec<Slot<T, K>>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> Arena<T, K> {
    /// Creates an empty arena.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` values before
    /// the backing vector reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Returns the number of slots the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T, K: Key> Default for Arena<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> Storage<T> for Arena<T, K> {
    type Key = K;

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.as_usize())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = core::mem::replace(slot, vacant) else {
            unreachable!()
        };

        self.free_head = key;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T, K: Key> UnboundedStorage<T> for Arena<T, K> {
    #[inline]
    fn insert(&mut self, value: T) -> K {
        self.len += 1;

        if self.free_head.is_some() {
            let key = self.free_head;
            let slot = &mut self.slots[key.as_usize()];
            let Slot::Vacant { next_free } = *slot else {
                unreachable!()
            };
            self.free_head = next_free;
            *slot = Slot::Occupied(value);
            return key;
        }

        let index = self.slots.len();
        assert!(
            index < K::NONE.as_usize(),
            "arena exceeds key type's index range"
        );
        self.slots.push(Slot::Occupied(value));
        K::from_usize(index)
    }
}

// =============================================================================
// FixedArena - fixed-capacity slot storage
// =============================================================================

/// Fixed-capacity slot arena.
///
/// All slots are allocated up front; once every slot is occupied,
/// [`try_insert`](BoundedStorage::try_insert) returns [`Full`] carrying the
/// rejected value. Freed slots are reused LIFO.
///
/// # Example
///
/// ```
/// use relink::{BoundedStorage, FixedArena, Storage};
///
/// let mut arena: FixedArena<u64> = FixedArena::with_capacity(2);
///
/// arena.try_insert(1).unwrap();
/// arena.try_insert(2).unwrap();
///
/// let err = arena.try_insert(3).unwrap_err();
/// assert_eq!(err.into_inner(), 3);
/// ```
#[derive(Debug)]
pub struct FixedArena<T, K: Key = u32> {
    slots: Box<[Slot<T, K>]>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> FixedArena<T, K> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or exceeds the key type's index range.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= K::NONE.as_usize(),
            "capacity exceeds key type's index range"
        );

        // Chain every slot into the free list: 0 -> 1 -> ... -> NONE
        let slots = (0..capacity)
            .map(|i| Slot::Vacant {
                next_free: if i + 1 < capacity {
                    K::from_usize(i + 1)
                } else {
                    K::NONE
                },
            })
            .collect();

        Self {
            slots,
            free_head: K::from_usize(0),
            len: 0,
        }
    }

    /// Returns the total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T, K: Key> Storage<T> for FixedArena<T, K> {
    type Key = K;

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.as_usize())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = core::mem::replace(slot, vacant) else {
            unreachable!()
        };

        self.free_head = key;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T, K: Key> BoundedStorage<T> for FixedArena<T, K> {
    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        if self.free_head.is_none() {
            return Err(Full(value));
        }

        let key = self.free_head;
        let slot = &mut self.slots[key.as_usize()];
        let Slot::Vacant { next_free } = *slot else {
            unreachable!()
        };
        self.free_head = next_free;
        *slot = Slot::Occupied(value);
        self.len += 1;
        Ok(key)
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.get_mut(key)
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

#[cfg(feature = "slab")]
impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        self.insert(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_new_is_empty() {
        let arena: Arena<u64> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn arena_insert_get_remove() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(42);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(key), Some(&42));

        assert_eq!(arena.remove(key), Some(42));
        assert_eq!(arena.get(key), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn arena_get_mut() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(10);
        *arena.get_mut(key).unwrap() = 20;

        assert_eq!(arena.get(key), Some(&20));
    }

    #[test]
    fn arena_slot_reuse_is_lifo() {
        let mut arena: Arena<u64> = Arena::new();

        let k0 = arena.insert(0);
        let k1 = arena.insert(1);

        arena.remove(k0);
        arena.remove(k1);

        // Most recently freed slot comes back first
        assert_eq!(arena.insert(2), k1);
        assert_eq!(arena.insert(3), k0);
    }

    #[test]
    fn arena_double_remove_returns_none() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(42);
        assert_eq!(arena.remove(key), Some(42));
        assert_eq!(arena.remove(key), None);
    }

    #[test]
    fn arena_invalid_key() {
        let arena: Arena<u64> = Arena::new();
        assert_eq!(arena.get(99), None);
    }

    #[test]
    fn arena_u16_keys() {
        let mut arena: Arena<u64, u16> = Arena::new();

        let key = arena.insert(42);
        assert_eq!(arena.get(key), Some(&42));
    }

    #[test]
    fn fixed_fill_to_capacity() {
        let mut arena: FixedArena<u64> = FixedArena::with_capacity(4);

        let k0 = arena.try_insert(0).unwrap();
        let k1 = arena.try_insert(1).unwrap();
        let k2 = arena.try_insert(2).unwrap();
        let k3 = arena.try_insert(3).unwrap();

        assert!(arena.is_full());

        let err = arena.try_insert(4);
        assert!(err.is_err());
        assert_eq!(err.unwrap_err().into_inner(), 4);

        assert_eq!(arena.get(k0), Some(&0));
        assert_eq!(arena.get(k1), Some(&1));
        assert_eq!(arena.get(k2), Some(&2));
        assert_eq!(arena.get(k3), Some(&3));
    }

    #[test]
    fn fixed_free_slot_allows_reinsert() {
        let mut arena: FixedArena<u64> = FixedArena::with_capacity(2);

        let k0 = arena.try_insert(0).unwrap();
        arena.try_insert(1).unwrap();
        assert!(arena.is_full());

        arena.remove(k0);
        assert!(!arena.is_full());

        let k2 = arena.try_insert(2).unwrap();
        assert_eq!(k2, k0);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn fixed_zero_capacity_panics() {
        let _: FixedArena<u64> = FixedArena::with_capacity(0);
    }

    #[test]
    fn drop_cleans_up() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug)]
        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);

        {
            let mut arena: Arena<DropCounter> = Arena::new();
            arena.insert(DropCounter);
            arena.insert(DropCounter);
            arena.insert(DropCounter);
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 3);
    }

    #[cfg(feature = "slab")]
    mod slab_tests {
        use super::*;

        #[test]
        fn insert_get_remove() {
            let mut storage = slab::Slab::new();

            let key = UnboundedStorage::insert(&mut storage, 42);
            assert_eq!(Storage::get(&storage, key), Some(&42));

            assert_eq!(Storage::remove(&mut storage, key), Some(42));
            assert_eq!(Storage::get(&storage, key), None);
        }

        #[test]
        fn slot_reuse() {
            let mut storage = slab::Slab::new();

            let k1 = UnboundedStorage::insert(&mut storage, 1);
            Storage::remove(&mut storage, k1);

            let k2 = UnboundedStorage::insert(&mut storage, 2);
            assert_eq!(k1, k2);
        }
    }
}
