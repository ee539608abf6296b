use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rand::seq::IteratorRandom;

use crate::domain::availability::grouped_resource_availability::GroupedResourceAvailability;
use crate::domain::availability::repository::availability_repository::AvailabilityRepository;
use crate::domain::availability::resource_availability::ResourceAvailability;
use crate::domain::shared::id::{ResourceAvailabilityId, ResourceId};
use crate::domain::shared::timeslot::TimeSlot;
use crate::error::{Error, Result};

/// In-memory availability store.
///
/// Plays the role of the relational table: one row per atomic unit, a
/// uniqueness rule over `(resource_id, from, to)` and per-row optimistic
/// versioning. All writes of one call happen inside a single write-lock
/// critical section, so a grouped save is atomic across its rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Row storage.
    rows: HashMap<ResourceAvailabilityId, ResourceAvailability>,

    /// Index of row ids per resource.
    resource_index: HashMap<ResourceId, Vec<ResourceAvailabilityId>>,
}

impl StoreInner {
    fn rows_within_slot(&self, resource_id: ResourceId, within: &TimeSlot) -> Vec<ResourceAvailability> {
        let Some(row_ids) = self.resource_index.get(&resource_id) else {
            return Vec::new();
        };

        let mut rows: Vec<ResourceAvailability> = row_ids
            .iter()
            .filter_map(|row_id| self.rows.get(row_id))
            .filter(|row| row.time_block().start() >= within.from && row.time_block().end() <= within.to)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.time_block().start());
        rows
    }

    /// Stale-version check over every unit of the group, before any write.
    fn check_versions(&self, group: &GroupedResourceAvailability) -> Result<()> {
        for unit in group.resource_availabilities() {
            let stored = self.rows.get(&unit.id()).ok_or(Error::NotFound(unit.id()))?;
            if stored.version() != unit.version() {
                log::warn!(
                    "Rejecting stale write for availability {}: expected version {}, store holds {}.",
                    unit.id(),
                    unit.version(),
                    stored.version()
                );
                return Err(Error::ConcurrencyConflict { id: unit.id(), expected: unit.version(), found: stored.version() });
            }
        }
        Ok(())
    }
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AvailabilityRepository for InMemoryAvailabilityRepository {
    fn create(&self, group: &GroupedResourceAvailability) -> Result<()> {
        let Some(resource_id) = group.resource_id() else {
            return Ok(());
        };
        let mut guard = self.inner.write().expect("RwLock poisoned");

        // Uniqueness over (resource_id, from, to): reject the whole insert on
        // any intersection with existing rows of this resource.
        if let Some(row_ids) = guard.resource_index.get(&resource_id) {
            for row_id in row_ids {
                let existing = &guard.rows[row_id];
                for unit in group.resource_availabilities() {
                    let intersects =
                        unit.time_block().start() < existing.time_block().end() && existing.time_block().start() < unit.time_block().end();
                    if intersects {
                        log::warn!("Rejecting slot creation for resource {}: window already covered.", resource_id);
                        return Err(Error::SlotsAlreadyExist(resource_id));
                    }
                }
            }
        }

        for unit in group.resource_availabilities() {
            let mut row = unit.clone();
            row.set_version(1);
            guard.resource_index.entry(resource_id).or_default().push(row.id());
            guard.rows.insert(row.id(), row);
        }
        Ok(())
    }

    fn save(&self, group: &GroupedResourceAvailability) -> Result<()> {
        let mut guard = self.inner.write().expect("RwLock poisoned");
        guard.check_versions(group)?;

        for unit in group.resource_availabilities() {
            let mut row = unit.clone();
            row.set_version(unit.version() + 1);
            guard.rows.insert(row.id(), row);
        }
        Ok(())
    }

    fn save_one(&self, availability: &ResourceAvailability) -> Result<()> {
        self.save(&GroupedResourceAvailability::new(vec![availability.clone()]))
    }

    fn load_by_id(&self, id: ResourceAvailabilityId) -> Result<ResourceAvailability> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.rows.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    fn load_all_within_slot(&self, resource_id: ResourceId, within: &TimeSlot) -> Vec<ResourceAvailability> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.rows_within_slot(resource_id, within)
    }

    fn load_random_available_within(&self, resource_ids: &[ResourceId], within: &TimeSlot) -> Option<Vec<ResourceAvailability>> {
        let guard = self.inner.read().expect("RwLock poisoned");

        let feasible = resource_ids.iter().filter_map(|resource_id| {
            let rows = guard.rows_within_slot(*resource_id, within);
            if tiles_window(&rows, within) && rows.iter().all(|row| row.blocked_by().is_unclaimed() && !row.is_disabled()) {
                Some(rows)
            } else {
                None
            }
        });

        feasible.choose(&mut rand::rng())
    }
}

/// True if `rows` (sorted by start) cover `within` exactly, with no gaps.
fn tiles_window(rows: &[ResourceAvailability], within: &TimeSlot) -> bool {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return false;
    };
    if first.time_block().start() != within.from || last.time_block().end() != within.to {
        return false;
    }
    rows.windows(2).all(|pair| pair[0].time_block().end() == pair[1].time_block().start())
}
