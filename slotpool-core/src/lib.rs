//! # Slotpool Core
//!
//! Pooled slot storage with dual-key indexing.
//!
//! This crate provides:
//! - [`PoolVec`]: growable contiguous storage with an explicit doubling
//!   growth policy and checked, index-based access
//! - [`Admin`]: a pooled registry of fixed-type objects addressable by a
//!   64-bit id key, a bounded string name key, or both at once, with
//!   free-list slot recycling
//! - [`SlotIndex`]: the typed, stable slot handle
//!
//! ## Design Principles
//!
//! 1. **Index-based handles**: backing storage may relocate on growth, so no
//!    raw reference survives a mutating call; every access re-resolves
//!    through a key or [`SlotIndex`] and borrows the store, making stale
//!    handles a compile error.
//! 2. **All-or-nothing failures**: every fallible operation either completes
//!    or reports an [`Error`] with the store unchanged.
//! 3. **Single-owner, synchronous**: no internal locking; confine each store
//!    to one logical owner and one thread at a time.
//!
//! ## Example
//!
//! ```
//! use slotpool_core::{Admin, Result};
//!
//! fn demo() -> Result<()> {
//!     let mut admin: Admin<u32> = Admin::with_capacity(4);
//!     *admin.insert(5, "orc")? = 42;
//!     assert_eq!(admin.get_by_id(5), Some(&42));
//!     assert_eq!(admin.get_by_name("orc"), Some(&42));
//!     admin.remove(5, "orc")?;
//!     assert!(admin.is_empty());
//!     Ok(())
//! }
//! # demo().unwrap();
//! ```

pub mod admin;
pub mod error;
pub mod ids;
pub mod pool_vec;

// Re-export main types
pub use admin::{Admin, NAME_KEY_MAX};
pub use error::{Error, Result};
pub use ids::SlotIndex;
pub use pool_vec::{PoolVec, MIN_GROWTH_CAPACITY};
