use crate::domain::availability::grouped_resource_availability::GroupedResourceAvailability;
use crate::domain::availability::resource_availability::ResourceAvailability;
use crate::domain::shared::id::{ResourceAvailabilityId, ResourceId};
use crate::domain::shared::timeslot::TimeSlot;
use crate::error::Result;

/// Persistence seam for atomic availability units.
///
/// Implementations must give every row an optimistic version counter: a write
/// against a stale version is rejected with `Error::ConcurrencyConflict`
/// instead of silently losing the concurrent update. Grouped writes are
/// atomic across their rows; one stale row fails the whole group and nothing
/// is written.
pub trait AvailabilityRepository: Send + Sync + std::fmt::Debug {
    /// Inserts brand-new units.
    ///
    /// Enforces the `(resource_id, from, to)` uniqueness rule: any overlap
    /// with already-stored units of the same resource rejects the entire
    /// insert with `Error::SlotsAlreadyExist` and writes nothing.
    fn create(&self, group: &GroupedResourceAvailability) -> Result<()>;

    /// Persists a mutated group, version-checking every row.
    fn save(&self, group: &GroupedResourceAvailability) -> Result<()>;

    /// Persists a single mutated unit, version-checked.
    fn save_one(&self, availability: &ResourceAvailability) -> Result<()>;

    fn load_by_id(&self, id: ResourceAvailabilityId) -> Result<ResourceAvailability>;

    /// All units of `resource_id` lying entirely within `within`, ordered by
    /// start time.
    fn load_all_within_slot(&self, resource_id: ResourceId, within: &TimeSlot) -> Vec<ResourceAvailability>;

    /// Uniform-ish random pick among the candidates whose units fully tile
    /// `within` and are all unclaimed and enabled.
    ///
    /// # Returns
    /// The chosen candidate's units in start order, or `None` if no candidate
    /// qualifies.
    fn load_random_available_within(&self, resource_ids: &[ResourceId], within: &TimeSlot) -> Option<Vec<ResourceAvailability>>;
}
