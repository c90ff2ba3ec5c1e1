//! Error types for slotpool-core

use thiserror::Error;

use crate::admin::NAME_KEY_MAX;
use crate::ids::SlotIndex;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Every fallible pool operation reports failure through one of these
/// variants and leaves the pool unchanged. Caller mistakes that the pool can
/// foresee (duplicate keys, unknown keys, out-of-range indices, misuse of
/// the single-key removal variants) are ordinary error values, never panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Id key already registered in the id map
    #[error("duplicate id key: {0}")]
    DuplicateId(u64),

    /// Name key already registered in the name map
    #[error("duplicate name key: {0:?}")]
    DuplicateName(String),

    /// Name key exceeds the fixed key-buffer size
    #[error("name key is {len} bytes (limit {})", NAME_KEY_MAX)]
    NameTooLong { len: usize },

    /// Id key not present in the id map
    #[error("unknown id key: {0}")]
    UnknownId(u64),

    /// Name key not present in the name map
    #[error("unknown name key: {0:?}")]
    UnknownName(String),

    /// Combined removal found the id and name keys on different slots
    #[error("id key resolves to {id_slot} but name key resolves to {name_slot}")]
    SlotMismatch {
        id_slot: SlotIndex,
        name_slot: SlotIndex,
    },

    /// Index access beyond the live element count
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// Single-key removal invoked while the other key map is non-empty
    #[error("single-key removal blocked: {other_keys} key(s) live in the other map")]
    RestrictedRemoval { other_keys: usize },
}

impl Error {
    /// Create a duplicate-id error
    pub fn duplicate_id(id: u64) -> Self {
        Error::DuplicateId(id)
    }

    /// Create a duplicate-name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Error::DuplicateName(name.into())
    }

    /// Create a name-too-long error
    pub fn name_too_long(len: usize) -> Self {
        Error::NameTooLong { len }
    }

    /// Create an unknown-id error
    pub fn unknown_id(id: u64) -> Self {
        Error::UnknownId(id)
    }

    /// Create an unknown-name error
    pub fn unknown_name(name: impl Into<String>) -> Self {
        Error::UnknownName(name.into())
    }

    /// Create a slot-mismatch error
    pub fn slot_mismatch(id_slot: SlotIndex, name_slot: SlotIndex) -> Self {
        Error::SlotMismatch { id_slot, name_slot }
    }

    /// Create an out-of-range error
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Error::OutOfRange { index, len }
    }

    /// Create a restricted-removal error
    pub fn restricted_removal(other_keys: usize) -> Self {
        Error::RestrictedRemoval { other_keys }
    }
}
