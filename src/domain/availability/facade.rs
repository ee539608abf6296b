use std::sync::Arc;

use crate::domain::availability::calendar::{Calendar, Calendars};
use crate::domain::availability::events::ResourceTakenOverEvent;
use crate::domain::availability::grouped_resource_availability::GroupedResourceAvailability;
use crate::domain::availability::owner::Owner;
use crate::domain::availability::repository::availability_repository::AvailabilityRepository;
use crate::domain::availability::repository::read_model::ResourceAvailabilityReadModel;
use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
use crate::domain::availability::time_blocks::normalized_slot::NormalizedSlot;
use crate::domain::shared::event::EventPublisher;
use crate::domain::shared::id::ResourceId;
use crate::domain::shared::timeslot::TimeSlot;
use crate::error::Result;

/// Public operations of the availability engine.
///
/// Every operation normalizes the requested window to the configured grid,
/// loads the covering atomic units, applies the grouped operation and
/// persists the result only when the whole group succeeded. Denied business
/// outcomes ("already taken", "nothing to release") are `Ok(false)` /
/// `Ok(None)`; persistence conflicts propagate undecorated so callers can
/// retry on their own policy.
#[derive(Debug, Clone)]
pub struct AvailabilityFacade {
    repository: Arc<dyn AvailabilityRepository>,
    read_model: ResourceAvailabilityReadModel,
    event_publisher: Arc<dyn EventPublisher>,
    duration_unit: DurationUnit,
}

impl AvailabilityFacade {
    pub fn new(repository: Arc<dyn AvailabilityRepository>, event_publisher: Arc<dyn EventPublisher>, duration_unit: DurationUnit) -> Self {
        let read_model = ResourceAvailabilityReadModel::new(repository.clone());
        AvailabilityFacade { repository, read_model, event_publisher, duration_unit }
    }

    /// Creates and persists fresh unblocked slots covering `time_slot`.
    ///
    /// Creation is insert-only: a window overlapping already-created slots is
    /// rejected with `Error::SlotsAlreadyExist` and nothing is written.
    /// Callers treat that as a non-fatal "already exists".
    pub fn create_resource_slots(&self, resource_id: ResourceId, time_slot: &TimeSlot) -> Result<()> {
        let grouped_availability = GroupedResourceAvailability::of(resource_id, time_slot, self.duration_unit);
        self.repository.create(&grouped_availability)
    }

    /// Reserves the resource over `time_slot` for `requester`.
    ///
    /// # Returns
    /// `Ok(false)` if any covering unit is unavailable or no units exist for
    /// the window; no unit changes owner in that case.
    pub fn block(&self, resource_id: ResourceId, time_slot: &TimeSlot, requester: Owner) -> Result<bool> {
        let grouped = self.find(resource_id, time_slot);
        self.block_grouped(grouped, requester)
    }

    /// Blocks one randomly chosen candidate whose whole window is free.
    ///
    /// # Returns
    /// The id of the blocked resource, or `Ok(None)` when no candidate
    /// qualifies or the chosen one was taken concurrently.
    pub fn block_random_available(&self, resource_ids: &[ResourceId], within: &TimeSlot, requester: Owner) -> Result<Option<ResourceId>> {
        let normalized = NormalizedSlot::from_time_slot(within, self.duration_unit);
        let Some(availabilities) = self.repository.load_random_available_within(resource_ids, normalized.slot()) else {
            return Ok(None);
        };
        let grouped = GroupedResourceAvailability::new(availabilities);
        let resource_id = grouped.resource_id();
        if self.block_grouped(grouped, requester)? { Ok(resource_id) } else { Ok(None) }
    }

    fn block_grouped(&self, mut to_block: GroupedResourceAvailability, requester: Owner) -> Result<bool> {
        if !to_block.block(requester) {
            return Ok(false);
        }
        self.repository.save(&to_block)?;
        Ok(true)
    }

    /// Releases an existing reservation over `time_slot` if `requester`
    /// matches; nothing is persisted on a denied release.
    pub fn release(&self, resource_id: ResourceId, time_slot: &TimeSlot, requester: Owner) -> Result<bool> {
        let mut grouped = self.find(resource_id, time_slot);
        if !grouped.release(requester) {
            return Ok(false);
        }
        self.repository.save(&grouped)?;
        Ok(true)
    }

    /// Administrative takeover: turns off reservation of the window,
    /// overriding any current owners.
    ///
    /// On success the previous owners are reported through a
    /// `ResourceTakenOverEvent` for downstream risk handling.
    pub fn disable(&self, resource_id: ResourceId, time_slot: &TimeSlot, requester: Owner) -> Result<bool> {
        let mut to_disable = self.find(resource_id, time_slot);
        let previous_owners = to_disable.owners();
        if !to_disable.disable(requester) {
            return Ok(false);
        }
        self.repository.save(&to_disable)?;
        self.event_publisher.publish(ResourceTakenOverEvent::new(resource_id, previous_owners, *time_slot));
        Ok(true)
    }

    /// Puts a disabled window back into service if `requester` disabled it.
    pub fn enable(&self, resource_id: ResourceId, time_slot: &TimeSlot, requester: Owner) -> Result<bool> {
        let mut to_enable = self.find(resource_id, time_slot);
        if !to_enable.enable(requester) {
            return Ok(false);
        }
        self.repository.save(&to_enable)?;
        Ok(true)
    }

    /// Read-only load of the units covering the normalized window.
    pub fn find(&self, resource_id: ResourceId, time_slot: &TimeSlot) -> GroupedResourceAvailability {
        let normalized = NormalizedSlot::from_time_slot(time_slot, self.duration_unit);
        let availabilities = self.repository.load_all_within_slot(resource_id, normalized.slot());
        GroupedResourceAvailability::new(availabilities)
    }

    pub fn load_calendar(&self, resource_id: ResourceId, within: &TimeSlot) -> Calendar {
        let normalized = NormalizedSlot::from_time_slot(within, self.duration_unit);
        self.read_model.load(resource_id, normalized.slot())
    }

    pub fn load_calendars(&self, resource_ids: &[ResourceId], within: &TimeSlot) -> Calendars {
        let normalized = NormalizedSlot::from_time_slot(within, self.duration_unit);
        self.read_model.load_all(resource_ids, normalized.slot())
    }
}
