use crate::domain::availability::blockade::Blockade;
use crate::domain::availability::owner::Owner;
use crate::domain::availability::time_blocks::atomic_time_block::AtomicTimeBlock;
use crate::domain::shared::id::{ResourceAvailabilityId, ResourceId};

/// The persisted atomic reservation unit: one grid-aligned time block of one
/// resource, together with its blockade state and optimistic version.
///
/// Transition methods mutate only in memory; the version is bumped by the
/// repository when a mutation is persisted. Two availabilities are equal iff
/// their ids are equal.
#[derive(Debug, Clone)]
pub struct ResourceAvailability {
    id: ResourceAvailabilityId,
    resource_id: ResourceId,
    time_block: AtomicTimeBlock,
    blockade: Blockade,
    version: u64,
}

impl ResourceAvailability {
    pub fn new(id: ResourceAvailabilityId, resource_id: ResourceId, time_block: AtomicTimeBlock) -> Self {
        ResourceAvailability { id, resource_id, time_block, blockade: Blockade::none(), version: 0 }
    }

    pub fn id(&self) -> ResourceAvailabilityId {
        self.id
    }

    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    pub fn time_block(&self) -> &AtomicTimeBlock {
        &self.time_block
    }

    pub fn blockade(&self) -> &Blockade {
        &self.blockade
    }

    pub fn blocked_by(&self) -> Owner {
        self.blockade.taken_by()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Claims the unit for `requester`.
    ///
    /// # Returns
    /// `true` and takes ownership iff the unit is currently available for the
    /// requester; `false` without mutation otherwise.
    pub fn block(&mut self, requester: Owner) -> bool {
        if self.blockade.is_available_for(requester) {
            self.blockade = Blockade::owned_by(requester);
            return true;
        }
        false
    }

    /// Gives the unit back.
    ///
    /// # Returns
    /// `true` and clears the blockade iff the unit is unclaimed or held by the
    /// requester; `false` without mutation otherwise.
    pub fn release(&mut self, requester: Owner) -> bool {
        if self.blockade.is_available_for(requester) {
            self.blockade = Blockade::none();
            return true;
        }
        false
    }

    /// Administrative override: takes the unit out of service regardless of
    /// who currently holds it. Always succeeds.
    pub fn disable(&mut self, requester: Owner) -> bool {
        self.blockade = Blockade::disabled_by(requester);
        true
    }

    /// Puts a disabled unit back into service.
    ///
    /// # Returns
    /// `true` iff the unit is unclaimed or held by the requester.
    pub fn enable(&mut self, requester: Owner) -> bool {
        if self.blockade.can_be_taken_by(requester) {
            self.blockade = Blockade::none();
            return true;
        }
        false
    }

    pub fn is_disabled(&self) -> bool {
        self.blockade.is_disabled()
    }

    pub fn is_disabled_by(&self, requester: Owner) -> bool {
        self.blockade.is_disabled_by(requester)
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl PartialEq for ResourceAvailability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceAvailability {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
    use crate::domain::shared::timeslot::TimeSlot;

    fn one_unit() -> ResourceAvailability {
        let day = TimeSlot::create_daily_time_slot_at_utc(2021, 1, 1);
        let block = AtomicTimeBlock::split(&day, DurationUnit::default_unit()).into_iter().next().unwrap();
        ResourceAvailability::new(ResourceAvailabilityId::new_one(), ResourceId::new_one(), block)
    }

    #[test]
    fn test_can_be_blocked_when_available() {
        let mut availability = one_unit();
        let owner = Owner::new_one();

        assert!(availability.block(owner));
        assert_eq!(availability.blocked_by(), owner);
    }

    #[test]
    fn test_cannot_be_blocked_by_someone_else_when_taken() {
        let mut availability = one_unit();
        let owner = Owner::new_one();
        assert!(availability.block(owner));

        assert!(!availability.block(Owner::new_one()));
        assert_eq!(availability.blocked_by(), owner);
    }

    #[test]
    fn test_can_be_blocked_again_by_the_same_owner() {
        let mut availability = one_unit();
        let owner = Owner::new_one();
        assert!(availability.block(owner));

        assert!(availability.block(owner));
    }

    #[test]
    fn test_release_requires_matching_owner() {
        let mut availability = one_unit();
        let owner = Owner::new_one();
        assert!(availability.block(owner));

        assert!(!availability.release(Owner::new_one()));
        assert!(availability.release(owner));
        assert!(availability.blocked_by().is_unclaimed());
    }

    #[test]
    fn test_disable_overrides_any_owner() {
        let mut availability = one_unit();
        let owner = Owner::new_one();
        let admin = Owner::new_one();
        assert!(availability.block(owner));

        assert!(availability.disable(admin));

        assert!(availability.is_disabled_by(admin));
        assert!(!availability.block(owner));
        assert!(!availability.release(owner));
    }

    #[test]
    fn test_enable_only_by_the_disabling_owner() {
        let mut availability = one_unit();
        let admin = Owner::new_one();
        assert!(availability.disable(admin));

        assert!(!availability.enable(Owner::new_one()));
        assert!(availability.enable(admin));
        assert!(!availability.is_disabled());
        assert!(availability.blocked_by().is_unclaimed());
    }
}
