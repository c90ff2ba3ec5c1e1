//! Pooled object registry with dual-key indexing.
//!
//! `Admin<T>` owns a pool of fixed-type slots and resolves each live slot
//! through a 64-bit id key, a bounded string name key, or both at once. Slot
//! storage is recycled through a free list, so a long-lived registry churns
//! through removals and inserts without growing.
//!
//! # Lifecycle
//!
//! 1. **Init** → [`Admin::with_capacity`] preallocates default-initialized
//!    slots and a free list covering all of them in ascending order.
//! 2. **Insert** → [`insert_by_id`](Admin::insert_by_id) /
//!    [`insert_by_name`](Admin::insert_by_name) / [`insert`](Admin::insert)
//!    take a slot (free list first, growth second), reset it to
//!    `T::default()`, record the key→slot mapping(s), and hand back
//!    `&mut T` for the caller to populate.
//! 3. **Use** → `get_*` lookups, key attachment, renames, iteration.
//! 4. **Remove** → key entries are deleted and the slot index returns to the
//!    free list; the payload is abandoned in place until the slot is reused.
//!
//! # Key invariants
//!
//! - Every mapped slot index is `< slot_count()` and absent from the free
//!   list; every free-list index is unmapped in both maps.
//! - `len() == slot_count() − free-list length`.
//! - No two live slots share a key within the same map, and a slot carries
//!   at most one id and one name — the slot records its own keys, so the two
//!   maps can never disagree about a dual-keyed registration.
//! - Every fallible operation is all-or-nothing: on error, nothing changed.
//! - A name longer than [`NAME_KEY_MAX`] bytes is rejected before any
//!   mutation.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::ids::SlotIndex;
use crate::pool_vec::PoolVec;

/// Maximum name-key length in bytes.
pub const NAME_KEY_MAX: usize = 255;

/// Initial bucket hint for the id and name maps.
const MAP_CAPACITY_HINT: usize = 16;

/// Message for lookups through an index the maps themselves produced.
const SLOT_IN_BOUNDS: &str = "mapped slot index within pool bounds";

/// Reject names longer than the fixed key-buffer size before any mutation.
fn check_name(name: &str) -> Result<()> {
    if name.len() > NAME_KEY_MAX {
        return Err(Error::name_too_long(name.len()));
    }
    Ok(())
}

/// One pool cell: the payload plus the keys it is currently registered
/// under. The slot owning its keys is what lets removal and renaming clean
/// both maps without a reverse scan.
#[derive(Clone, Debug, Default)]
struct Slot<T> {
    payload: T,
    id: Option<u64>,
    name: Option<Arc<str>>,
}

/// Pooled registry of `T` values addressable by id, by name, or by both.
///
/// Synchronous and single-owner: no internal locking. References returned by
/// lookups borrow the registry, so they cannot outlive a mutating call.
#[derive(Clone, Debug)]
pub struct Admin<T> {
    slots: PoolVec<Slot<T>>,
    free: PoolVec<SlotIndex>,
    id_map: HashMap<u64, SlotIndex>,
    name_map: HashMap<Arc<str>, SlotIndex>,
}

impl<T: Default> Admin<T> {
    /// Create an empty registry with no preallocated slots.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a registry with `initial_slots` default-initialized slots, all
    /// of them on the free list in ascending order.
    pub fn with_capacity(initial_slots: usize) -> Self {
        let mut slots = PoolVec::with_capacity(initial_slots);
        let mut free = PoolVec::with_capacity(initial_slots);
        for index in 0..initial_slots {
            slots.push_default();
            free.push(SlotIndex::from_usize(index));
        }
        tracing::debug!(slots = initial_slots, "slot pool initialized");
        Self {
            slots,
            free,
            id_map: HashMap::with_capacity(MAP_CAPACITY_HINT),
            name_map: HashMap::with_capacity(MAP_CAPACITY_HINT),
        }
    }

    // -----------------------------------------------------------------------
    // Internal slot plumbing
    // -----------------------------------------------------------------------

    fn slot(&self, index: SlotIndex) -> &Slot<T> {
        self.slots.get(index.as_usize()).expect(SLOT_IN_BOUNDS)
    }

    fn slot_mut(&mut self, index: SlotIndex) -> &mut Slot<T> {
        self.slots.get_mut(index.as_usize()).expect(SLOT_IN_BOUNDS)
    }

    /// Take a slot for a new registration: oldest free slot first (the
    /// initial population is consumed in ascending index order), growing the
    /// pool by one only when the free list is empty. The slot is reset to
    /// `T::default()` with no keys before being handed out.
    fn take_slot(&mut self) -> SlotIndex {
        if self.free.is_empty() {
            let index = SlotIndex::from_usize(self.slots.len());
            self.slots.push_default();
            tracing::trace!(index = index.as_u32(), "pool grew by one slot");
            return index;
        }
        let index = self
            .free
            .remove(0)
            .expect("free list checked non-empty above");
        let slot = self.slot_mut(index);
        slot.payload = T::default();
        slot.id = None;
        slot.name = None;
        index
    }

    // -----------------------------------------------------------------------
    // Insert
    // -----------------------------------------------------------------------

    /// Register a new object under `id` and return its payload for the
    /// caller to populate.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if `id` is already registered.
    pub fn insert_by_id(&mut self, id: u64) -> Result<&mut T> {
        if self.id_map.contains_key(&id) {
            return Err(Error::duplicate_id(id));
        }
        let index = self.take_slot();
        self.id_map.insert(id, index);
        let slot = self.slot_mut(index);
        slot.id = Some(id);
        Ok(&mut slot.payload)
    }

    /// Register a new object under `name` and return its payload for the
    /// caller to populate.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`] or [`Error::DuplicateName`].
    pub fn insert_by_name(&mut self, name: &str) -> Result<&mut T> {
        check_name(name)?;
        if self.name_map.contains_key(name) {
            return Err(Error::duplicate_name(name));
        }
        let key: Arc<str> = Arc::from(name);
        let index = self.take_slot();
        self.name_map.insert(key.clone(), index);
        let slot = self.slot_mut(index);
        slot.name = Some(key);
        Ok(&mut slot.payload)
    }

    /// Register a new object under both `id` and `name` — one slot, two
    /// keys, both resolving to it for the lifetime of the registration.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`], [`Error::DuplicateId`], or
    /// [`Error::DuplicateName`]; on any of them no slot is consumed and
    /// neither map changes.
    pub fn insert(&mut self, id: u64, name: &str) -> Result<&mut T> {
        check_name(name)?;
        if self.id_map.contains_key(&id) {
            return Err(Error::duplicate_id(id));
        }
        if self.name_map.contains_key(name) {
            return Err(Error::duplicate_name(name));
        }
        let key: Arc<str> = Arc::from(name);
        let index = self.take_slot();
        self.id_map.insert(id, index);
        self.name_map.insert(key.clone(), index);
        let slot = self.slot_mut(index);
        slot.id = Some(id);
        slot.name = Some(key);
        Ok(&mut slot.payload)
    }

    // -----------------------------------------------------------------------
    // Key attachment / rename
    // -----------------------------------------------------------------------

    /// Attach a numeric alias to an object already registered by name.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`], [`Error::UnknownName`] if `name` is not
    /// registered, or [`Error::DuplicateId`] if `id` is taken or the object
    /// already carries an id (the blocking id is reported).
    pub fn attach_id(&mut self, name: &str, id: u64) -> Result<()> {
        check_name(name)?;
        let index = *self
            .name_map
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        if self.id_map.contains_key(&id) {
            return Err(Error::duplicate_id(id));
        }
        if let Some(existing) = self.slot(index).id {
            return Err(Error::duplicate_id(existing));
        }
        self.id_map.insert(id, index);
        self.slot_mut(index).id = Some(id);
        Ok(())
    }

    /// Attach a string alias to an object already registered by id.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownId`], [`Error::NameTooLong`], or
    /// [`Error::DuplicateName`] if `name` is taken or the object already
    /// carries a name (the blocking name is reported).
    pub fn attach_name(&mut self, id: u64, name: &str) -> Result<()> {
        let index = *self
            .id_map
            .get(&id)
            .ok_or_else(|| Error::unknown_id(id))?;
        check_name(name)?;
        if self.name_map.contains_key(name) {
            return Err(Error::duplicate_name(name));
        }
        if let Some(existing) = &self.slot(index).name {
            return Err(Error::duplicate_name(existing.as_ref()));
        }
        let key: Arc<str> = Arc::from(name);
        self.name_map.insert(key.clone(), index);
        self.slot_mut(index).name = Some(key);
        Ok(())
    }

    /// Rename an object in place: the slot keeps its index and id (if any),
    /// only the name-map entry moves. Renaming an object to its current name
    /// succeeds as a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`], [`Error::UnknownName`] if `old_name` is not
    /// registered, or [`Error::DuplicateName`] if `new_name` belongs to a
    /// different object.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        check_name(old_name)?;
        let index = *self
            .name_map
            .get(old_name)
            .ok_or_else(|| Error::unknown_name(old_name))?;
        check_name(new_name)?;
        if old_name == new_name {
            return Ok(());
        }
        if self.name_map.contains_key(new_name) {
            return Err(Error::duplicate_name(new_name));
        }
        let key: Arc<str> = Arc::from(new_name);
        self.name_map.remove(old_name);
        self.name_map.insert(key.clone(), index);
        self.slot_mut(index).name = Some(key);
        Ok(())
    }

    /// Rename an object found by id. Unlike [`attach_name`](Self::attach_name)
    /// this succeeds whether or not the object previously had a name; a
    /// previous name is unregistered as part of the rename.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownId`], [`Error::NameTooLong`], or
    /// [`Error::DuplicateName`] if `new_name` belongs to a different object.
    pub fn rename_by_id(&mut self, id: u64, new_name: &str) -> Result<()> {
        let index = *self
            .id_map
            .get(&id)
            .ok_or_else(|| Error::unknown_id(id))?;
        check_name(new_name)?;
        if let Some(&other) = self.name_map.get(new_name) {
            if other != index {
                return Err(Error::duplicate_name(new_name));
            }
            return Ok(()); // already this object's name
        }
        if let Some(old) = self.slot_mut(index).name.take() {
            self.name_map.remove(old.as_ref());
        }
        let key: Arc<str> = Arc::from(new_name);
        self.name_map.insert(key.clone(), index);
        self.slot_mut(index).name = Some(key);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Remove
    // -----------------------------------------------------------------------

    /// Remove an id-keyed object, returning its slot to the free list.
    ///
    /// Single-key removal is only permitted while the name map is completely
    /// unused: dual-keyed objects anywhere in the registry must be removed
    /// through [`remove`](Self::remove). This restriction is deliberately
    /// conservative — a single name registration blocks every id-keyed
    /// removal — and is kept as documented behavior rather than silently
    /// relaxed.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownId`], or [`Error::RestrictedRemoval`] if any name
    /// keys are live.
    pub fn remove_by_id(&mut self, id: u64) -> Result<()> {
        let index = *self
            .id_map
            .get(&id)
            .ok_or_else(|| Error::unknown_id(id))?;
        if !self.name_map.is_empty() {
            return Err(Error::restricted_removal(self.name_map.len()));
        }
        self.id_map.remove(&id);
        self.slot_mut(index).id = None;
        self.free.push(index);
        Ok(())
    }

    /// Remove a name-keyed object, returning its slot to the free list.
    /// Symmetric to [`remove_by_id`](Self::remove_by_id): every id key must
    /// be gone before name-keyed removal is permitted.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`], [`Error::UnknownName`], or
    /// [`Error::RestrictedRemoval`] if any id keys are live.
    pub fn remove_by_name(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        let index = *self
            .name_map
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        if !self.id_map.is_empty() {
            return Err(Error::restricted_removal(self.id_map.len()));
        }
        self.name_map.remove(name);
        self.slot_mut(index).name = None;
        self.free.push(index);
        Ok(())
    }

    /// Remove a dual-keyed object: both entries are deleted together, or
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// [`Error::NameTooLong`], [`Error::UnknownId`], [`Error::UnknownName`],
    /// or [`Error::SlotMismatch`] if the two keys belong to different
    /// objects.
    pub fn remove(&mut self, id: u64, name: &str) -> Result<()> {
        check_name(name)?;
        let id_slot = *self
            .id_map
            .get(&id)
            .ok_or_else(|| Error::unknown_id(id))?;
        let name_slot = *self
            .name_map
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        if id_slot != name_slot {
            return Err(Error::slot_mismatch(id_slot, name_slot));
        }
        self.id_map.remove(&id);
        self.name_map.remove(name);
        let slot = self.slot_mut(id_slot);
        slot.id = None;
        slot.name = None;
        self.free.push(id_slot);
        Ok(())
    }

    /// Bulk-remove every live object: both maps are emptied (releasing their
    /// memory) and the free list is rebuilt to cover every slot in ascending
    /// order. No payload is dropped or reset; contents are abandoned in
    /// place until each slot is reused.
    pub fn clear(&mut self) {
        let slots = self.slots.len();
        self.free.clear();
        self.free.reserve(slots);
        for index in 0..slots {
            self.free.push(SlotIndex::from_usize(index));
        }
        self.id_map.clear();
        self.id_map.shrink_to_fit();
        self.name_map.clear();
        self.name_map.shrink_to_fit();
        tracing::debug!(slots, "pool cleared; every slot returned to the free list");
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// True if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot count, live and free (the index space accepted by
    /// [`get_by_index`](Self::get_by_index)).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolve `id` to its payload.
    pub fn get_by_id(&self, id: u64) -> Option<&T> {
        let index = *self.id_map.get(&id)?;
        Some(&self.slot(index).payload)
    }

    /// Resolve `id` to its payload, mutably.
    pub fn get_by_id_mut(&mut self, id: u64) -> Option<&mut T> {
        let index = *self.id_map.get(&id)?;
        Some(&mut self.slot_mut(index).payload)
    }

    /// Resolve `name` to its payload.
    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        let index = *self.name_map.get(name)?;
        Some(&self.slot(index).payload)
    }

    /// Resolve `name` to its payload, mutably.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = *self.name_map.get(name)?;
        Some(&mut self.slot_mut(index).payload)
    }

    /// Slot handle for `id`, if registered.
    pub fn index_of_id(&self, id: u64) -> Option<SlotIndex> {
        self.id_map.get(&id).copied()
    }

    /// Slot handle for `name`, if registered.
    pub fn index_of_name(&self, name: &str) -> Option<SlotIndex> {
        self.name_map.get(name).copied()
    }

    /// Direct slot access, bounds-checked against the slot count only.
    /// Freed slots remain readable (their last contents abandoned in place)
    /// until a later insert reuses them.
    pub fn get_by_index(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index.as_usize()).map(|slot| &slot.payload)
    }

    /// Direct mutable slot access, bounds-checked against the slot count.
    pub fn get_by_index_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots
            .get_mut(index.as_usize())
            .map(|slot| &mut slot.payload)
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// Iterate over every id-keyed object as `(id, &payload)`. Order is the
    /// id map's, not insertion order. The iterator borrows the registry, so
    /// structural mutation mid-iteration is a compile error.
    pub fn iter_by_id(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        self.id_map
            .iter()
            .map(|(&id, &index)| (id, &self.slot(index).payload))
    }

    /// Iterate over every name-keyed object as `(&name, &payload)`. Order is
    /// the name map's.
    pub fn iter_by_name(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.name_map
            .iter()
            .map(|(name, &index)| (name.as_ref(), &self.slot(index).payload))
    }

    /// Visit every id-keyed object mutably, in the id map's order.
    pub fn for_each_by_id_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(u64, &mut T),
    {
        for (&id, &index) in self.id_map.iter() {
            let slot = self.slots.get_mut(index.as_usize()).expect(SLOT_IN_BOUNDS);
            f(id, &mut slot.payload);
        }
    }

    /// Visit every name-keyed object mutably, in the name map's order.
    pub fn for_each_by_name_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut T),
    {
        for (name, &index) in self.name_map.iter() {
            let slot = self.slots.get_mut(index.as_usize()).expect(SLOT_IN_BOUNDS);
            f(name.as_ref(), &mut slot.payload);
        }
    }
}

impl<T: Default> Default for Admin<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
