use std::collections::HashSet;

use crate::domain::availability::owner::Owner;
use crate::domain::availability::resource_availability::ResourceAvailability;
use crate::domain::availability::time_blocks::atomic_time_block::AtomicTimeBlock;
use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
use crate::domain::shared::id::{ResourceAvailabilityId, ResourceId};
use crate::domain::shared::timeslot::TimeSlot;

/// All atomic units covering one logical request window, in start order.
///
/// This is the unit at which block/release/disable decisions are made. It is
/// rebuilt from storage for every operation and never outlives it. Mutations
/// are all-or-nothing: feasibility is checked over every unit before any unit
/// is touched, so a failed operation leaves the group exactly as loaded.
#[derive(Debug, Clone)]
pub struct GroupedResourceAvailability {
    resource_availabilities: Vec<ResourceAvailability>,
}

impl GroupedResourceAvailability {
    /// Wraps units loaded from storage.
    ///
    /// All units must belong to one resource; mixing resources in one group
    /// is a programmer error and fails fast.
    pub fn new(resource_availabilities: Vec<ResourceAvailability>) -> Self {
        if let Some(first) = resource_availabilities.first() {
            assert!(
                resource_availabilities.iter().all(|availability| availability.resource_id() == first.resource_id()),
                "GroupedResourceAvailability must not mix resources"
            );
        }
        GroupedResourceAvailability { resource_availabilities }
    }

    /// Builds brand-new unblocked units covering `time_slot` (slot creation).
    pub fn of(resource_id: ResourceId, time_slot: &TimeSlot, unit: DurationUnit) -> Self {
        let resource_availabilities = AtomicTimeBlock::split(time_slot, unit)
            .into_iter()
            .map(|block| ResourceAvailability::new(ResourceAvailabilityId::new_one(), resource_id, block))
            .collect();
        GroupedResourceAvailability { resource_availabilities }
    }

    pub fn resource_availabilities(&self) -> &[ResourceAvailability] {
        &self.resource_availabilities
    }

    pub fn resource_id(&self) -> Option<ResourceId> {
        self.resource_availabilities.first().map(|availability| availability.resource_id())
    }

    pub fn len(&self) -> usize {
        self.resource_availabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_availabilities.is_empty()
    }

    /// Claims every unit for `requester`.
    ///
    /// # Returns
    /// `false` on an empty group or if any single unit is unavailable for the
    /// requester, in which case no unit is mutated.
    pub fn block(&mut self, requester: Owner) -> bool {
        if self.is_empty() {
            return false;
        }
        if !self.resource_availabilities.iter().all(|availability| availability.blockade().is_available_for(requester)) {
            return false;
        }
        for availability in &mut self.resource_availabilities {
            let blocked = availability.block(requester);
            debug_assert!(blocked);
        }
        true
    }

    /// Releases every unit held by (or free for) `requester`, all or nothing.
    pub fn release(&mut self, requester: Owner) -> bool {
        if self.is_empty() {
            return false;
        }
        if !self.resource_availabilities.iter().all(|availability| availability.blockade().is_available_for(requester)) {
            return false;
        }
        for availability in &mut self.resource_availabilities {
            let released = availability.release(requester);
            debug_assert!(released);
        }
        true
    }

    /// Administrative takeover of every unit. Always succeeds for a non-empty
    /// group, regardless of current owners.
    pub fn disable(&mut self, requester: Owner) -> bool {
        if self.is_empty() {
            return false;
        }
        for availability in &mut self.resource_availabilities {
            availability.disable(requester);
        }
        true
    }

    /// Puts every unit back into service, all or nothing.
    pub fn enable(&mut self, requester: Owner) -> bool {
        if self.is_empty() {
            return false;
        }
        if !self.resource_availabilities.iter().all(|availability| availability.blockade().can_be_taken_by(requester)) {
            return false;
        }
        for availability in &mut self.resource_availabilities {
            let enabled = availability.enable(requester);
            debug_assert!(enabled);
        }
        true
    }

    pub fn blocked_entirely_by(&self, owner: Owner) -> bool {
        self.resource_availabilities.iter().all(|availability| availability.blocked_by() == owner)
    }

    pub fn is_disabled_entirely_by(&self, owner: Owner) -> bool {
        self.resource_availabilities.iter().all(|availability| availability.is_disabled_by(owner))
    }

    pub fn is_entirely_available(&self) -> bool {
        self.resource_availabilities.iter().all(|availability| availability.blocked_by().is_unclaimed() && !availability.is_disabled())
    }

    pub fn find_blocked_by(&self, owner: Owner) -> Vec<&ResourceAvailability> {
        self.resource_availabilities.iter().filter(|availability| availability.blocked_by() == owner).collect()
    }

    /// Every distinct owner currently holding at least one unit of the group.
    pub fn owners(&self) -> HashSet<Owner> {
        self.resource_availabilities.iter().map(|availability| availability.blocked_by()).filter(|owner| !owner.is_unclaimed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_for_one_day(resource_id: ResourceId) -> GroupedResourceAvailability {
        let day = TimeSlot::create_daily_time_slot_at_utc(2021, 1, 1);
        GroupedResourceAvailability::of(resource_id, &day, DurationUnit::default_unit())
    }

    #[test]
    fn test_creation_splits_window_into_atomic_units() {
        let group = group_for_one_day(ResourceId::new_one());

        assert_eq!(group.len(), 96);
        assert!(group.is_entirely_available());
    }

    #[test]
    fn test_block_is_all_or_nothing() {
        let mut group = group_for_one_day(ResourceId::new_one());
        let first_owner = Owner::new_one();
        let second_owner = Owner::new_one();

        // Claim one unit out from under the second owner.
        let mut units = group.resource_availabilities.clone();
        units[10].block(first_owner);
        let mut contested = GroupedResourceAvailability::new(units);

        assert!(!contested.block(second_owner));
        assert_eq!(contested.find_blocked_by(second_owner).len(), 0);
        assert!(group.block(first_owner));
        assert!(group.blocked_entirely_by(first_owner));
    }

    #[test]
    fn test_empty_group_denies_every_operation() {
        let mut group = GroupedResourceAvailability::new(Vec::new());
        let owner = Owner::new_one();

        assert!(!group.block(owner));
        assert!(!group.release(owner));
        assert!(!group.disable(owner));
        assert!(!group.enable(owner));
    }

    #[test]
    fn test_disable_overrides_owners_and_reports_them() {
        let mut group = group_for_one_day(ResourceId::new_one());
        let owner = Owner::new_one();
        let admin = Owner::new_one();
        assert!(group.block(owner));

        let previous_owners = group.owners();
        assert!(group.disable(admin));

        assert_eq!(previous_owners, HashSet::from([owner]));
        assert!(group.is_disabled_entirely_by(admin));
    }

    #[test]
    fn test_owners_skips_unclaimed_units() {
        let group = group_for_one_day(ResourceId::new_one());

        assert!(group.owners().is_empty());
    }

    #[test]
    #[should_panic(expected = "must not mix resources")]
    fn test_mixed_resources_fail_fast() {
        let first = group_for_one_day(ResourceId::new_one());
        let second = group_for_one_day(ResourceId::new_one());
        let mut mixed = first.resource_availabilities.clone();
        mixed.extend(second.resource_availabilities.clone());

        let _ = GroupedResourceAvailability::new(mixed);
    }
}
