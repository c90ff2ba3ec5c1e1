//! Typed index newtype for pool slots.
//!
//! `#[repr(transparent)]` + `Copy`, so wrapping the raw primitive costs
//! nothing at runtime — the compiler enforces the type boundary at zero cost.

use std::fmt;

/// Stable handle for a storage slot inside an [`Admin`](crate::Admin) pool.
///
/// The handle never dereferences storage on its own, so growth of the
/// backing vector cannot invalidate it; resolve it through
/// [`Admin::get_by_index`](crate::Admin::get_by_index) on every access.
/// After the registration that produced it is removed, the index returns to
/// the free list and a later insert may reuse it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
    #[inline]
    pub fn from_u32(v: u32) -> Self {
        Self(v)
    }
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub(crate) fn from_usize(v: usize) -> Self {
        Self(v as u32)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotIndex({})", self.0)
    }
}
