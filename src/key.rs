//! Key trait for arena indices.
//!
//! Chains store their `prev`/`next` links as keys rather than pointers.
//! A reserved sentinel value (e.g. `u32::MAX`) stands in for "absent",
//! avoiding the space cost of `Option<K>` in every node.

/// A copyable key type with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use relink::Key;
///
/// let key: u32 = 5;
/// let none: u32 = u32::NONE;
///
/// assert!(key.is_some());
/// assert!(none.is_none());
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel value representing "no key" / an absent link.
    ///
    /// For integer types this is `MAX`, which is therefore never a valid
    /// slot index.
    const NONE: Self;

    /// Creates a key from a `usize` slot index.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a `usize` slot index.
    fn as_usize(self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_key_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                }
            )*
        };
    }

    test_key_sentinel!(
        u8 => u8_sentinel,
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn usize_round_trip() {
        assert_eq!(u32::from_usize(7).as_usize(), 7);
        assert_eq!(u16::from_usize(0).as_usize(), 0);
    }
}
