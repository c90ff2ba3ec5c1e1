//! End-to-end lifecycle tests for the pooled dual-key registry.
//!
//! Exercises the cross-cutting properties a single unit test cannot see:
//! the live-count bookkeeping under mixed churn, atomicity of failed
//! operations, deterministic slot recycling, and dual-key consistency.

use slotpool_core::error::Result;
use slotpool_core::{Admin, Error, SlotIndex, NAME_KEY_MAX};

/// A payload with some width, so recycled slots visibly reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Template {
    kind: u32,
    level: u16,
    label: String,
}

fn template(kind: u32, level: u16, label: &str) -> Template {
    Template {
        kind,
        level,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_count_tracks_churn() -> Result<()> {
        let mut admin: Admin<Template> = Admin::with_capacity(8);
        assert_eq!(admin.len(), 0);

        for id in 0..20u64 {
            *admin.insert_by_id(id)? = template(id as u32, 1, "unit");
        }
        assert_eq!(admin.len(), 20);
        assert_eq!(admin.slot_count(), 20); // 8 preallocated + 12 grown

        for id in (0..20u64).step_by(2) {
            admin.remove_by_id(id)?;
        }
        assert_eq!(admin.len(), 10);
        assert_eq!(admin.slot_count(), 20); // slots freed, not released

        // re-adding fills the freed slots before growing
        for id in 100..110u64 {
            admin.insert_by_id(id)?;
        }
        assert_eq!(admin.len(), 20);
        assert_eq!(admin.slot_count(), 20);

        admin.clear();
        assert_eq!(admin.len(), 0);
        assert_eq!(admin.slot_count(), 20);
        Ok(())
    }

    #[test]
    fn failed_adds_change_nothing() -> Result<()> {
        let mut admin: Admin<Template> = Admin::new();
        *admin.insert(1, "boar")? = template(1, 3, "boar");
        let snapshot_len = admin.len();
        let snapshot_slots = admin.slot_count();
        let snapshot_index = admin.index_of_id(1);

        // duplicate id
        assert!(admin.insert(1, "wolf").is_err());
        // duplicate name
        assert!(admin.insert(2, "boar").is_err());
        // oversize name
        let long = "n".repeat(NAME_KEY_MAX + 1);
        assert_eq!(
            admin.insert(2, &long),
            Err(Error::name_too_long(NAME_KEY_MAX + 1))
        );

        assert_eq!(admin.len(), snapshot_len);
        assert_eq!(admin.slot_count(), snapshot_slots);
        assert_eq!(admin.index_of_id(1), snapshot_index);
        assert_eq!(admin.get_by_name("wolf"), None);
        assert_eq!(admin.get_by_id(2), None);
        assert_eq!(admin.get_by_id(1).unwrap().label, "boar");
        Ok(())
    }

    #[test]
    fn recycled_slots_are_reset() -> Result<()> {
        let mut admin: Admin<Template> = Admin::with_capacity(2);
        *admin.insert_by_id(7)? = template(9, 60, "king");
        let freed = admin.index_of_id(7).unwrap();
        admin.remove_by_id(7)?;

        let payload = admin.insert_by_id(8)?;
        assert_eq!(*payload, Template::default());
        assert_eq!(admin.index_of_id(8), Some(freed));
        Ok(())
    }

    #[test]
    fn dual_key_consistency_through_lifecycle() -> Result<()> {
        let mut admin: Admin<Template> = Admin::new();
        *admin.insert(5, "orc")? = template(5, 12, "orc");

        // both keys resolve to the identical slot
        assert!(std::ptr::eq(
            admin.get_by_id(5).unwrap(),
            admin.get_by_name("orc").unwrap()
        ));

        // a rename keeps the pairing intact
        admin.rename_by_id(5, "orc-warrior")?;
        assert_eq!(admin.get_by_name("orc"), None);
        assert!(std::ptr::eq(
            admin.get_by_id(5).unwrap(),
            admin.get_by_name("orc-warrior").unwrap()
        ));

        // combined removal removes both entries together
        admin.remove(5, "orc-warrior")?;
        assert_eq!(admin.get_by_id(5), None);
        assert_eq!(admin.get_by_name("orc-warrior"), None);
        assert_eq!(admin.len(), 0);
        Ok(())
    }

    #[test]
    fn combined_remove_fails_atomically_on_mismatch() -> Result<()> {
        let mut admin: Admin<Template> = Admin::new();
        admin.insert(1, "alpha")?;
        admin.insert(2, "beta")?;

        let err = admin.remove(1, "beta").unwrap_err();
        assert!(matches!(err, Error::SlotMismatch { .. }));

        // nothing was deleted or freed
        assert_eq!(admin.len(), 2);
        assert!(admin.get_by_id(1).is_some());
        assert!(admin.get_by_id(2).is_some());
        assert!(admin.get_by_name("alpha").is_some());
        assert!(admin.get_by_name("beta").is_some());
        Ok(())
    }

    #[test]
    fn iteration_yields_every_registration_exactly_once() -> Result<()> {
        let mut admin: Admin<Template> = Admin::with_capacity(16);
        let n = 100u64;
        for id in 0..n {
            *admin.insert(id, &format!("unit-{id}"))? = template(id as u32, 1, "unit");
        }

        let mut ids: Vec<u64> = admin.iter_by_id().map(|(id, _)| id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n as usize);

        let mut names: Vec<String> = admin
            .iter_by_name()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), n as usize);

        // every yielded pair is resolvable through the point lookups
        for (id, payload) in admin.iter_by_id() {
            assert_eq!(admin.get_by_id(id), Some(payload));
            assert_eq!(
                admin.get_by_name(&format!("unit-{id}")),
                Some(payload)
            );
        }
        Ok(())
    }

    #[test]
    fn index_handles_survive_pool_growth() -> Result<()> {
        let mut admin: Admin<Template> = Admin::new();
        *admin.insert_by_id(1)? = template(1, 1, "first");
        let handle: SlotIndex = admin.index_of_id(1).unwrap();

        // force repeated growth of the backing storage
        for id in 2..200u64 {
            admin.insert_by_id(id)?;
        }

        // the handle still resolves to the same object
        assert_eq!(admin.get_by_index(handle).unwrap().label, "first");
        assert_eq!(admin.index_of_id(1), Some(handle));
        Ok(())
    }

    #[test]
    fn restricted_removal_is_reported_not_asserted() -> Result<()> {
        let mut admin: Admin<Template> = Admin::new();
        admin.insert(1, "alpha")?;
        admin.insert_by_id(2)?;

        // a live name key anywhere blocks id-keyed removal, even for an
        // object that only has an id
        assert_eq!(admin.remove_by_id(2), Err(Error::restricted_removal(1)));

        // the combined form still works for the dual-keyed object
        admin.remove(1, "alpha")?;
        // and with the name map empty again, the single-key form proceeds
        admin.remove_by_id(2)?;
        assert!(admin.is_empty());
        Ok(())
    }
}
