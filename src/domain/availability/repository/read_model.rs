use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::availability::calendar::{Calendar, Calendars};
use crate::domain::availability::owner::Owner;
use crate::domain::availability::repository::availability_repository::AvailabilityRepository;
use crate::domain::shared::id::ResourceId;
use crate::domain::shared::timeslot::TimeSlot;

/// Read side of the engine: reconstructs human-meaningful intervals from the
/// quantized rows.
///
/// For every `(resource, owner)` partition, consecutive atomic units are
/// merged into maximal contiguous runs: a unit extends the current run iff
/// its start equals the run's end, otherwise it opens a new run.
#[derive(Debug, Clone)]
pub struct ResourceAvailabilityReadModel {
    repository: Arc<dyn AvailabilityRepository>,
}

impl ResourceAvailabilityReadModel {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        ResourceAvailabilityReadModel { repository }
    }

    pub fn load(&self, resource_id: ResourceId, within: &TimeSlot) -> Calendar {
        self.load_all(&[resource_id], within).get(resource_id)
    }

    pub fn load_all(&self, resource_ids: &[ResourceId], within: &TimeSlot) -> Calendars {
        let mut calendars = Vec::with_capacity(resource_ids.len());

        for resource_id in resource_ids {
            let rows = self.repository.load_all_within_slot(*resource_id, within);
            if rows.is_empty() {
                continue;
            }

            let mut taken: HashMap<Owner, Vec<TimeSlot>> = HashMap::new();
            for row in rows {
                let slot = *row.time_block().slot();
                let runs = taken.entry(row.blocked_by()).or_default();
                match runs.last_mut() {
                    Some(last) if last.to == slot.from => last.to = slot.to,
                    _ => runs.push(slot),
                }
            }
            calendars.push(Calendar::new(*resource_id, taken));
        }

        Calendars::of(calendars)
    }
}
