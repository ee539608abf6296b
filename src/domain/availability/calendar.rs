use std::collections::HashMap;

use crate::domain::availability::owner::Owner;
use crate::domain::shared::id::ResourceId;
use crate::domain::shared::timeslot::TimeSlot;

/// Owner-partitioned, gap-merged view of one resource within a query window.
///
/// The `Unclaimed` partition represents availability.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    resource_id: ResourceId,
    calendar: HashMap<Owner, Vec<TimeSlot>>,
}

impl Calendar {
    pub fn new(resource_id: ResourceId, calendar: HashMap<Owner, Vec<TimeSlot>>) -> Self {
        Calendar { resource_id, calendar }
    }

    pub fn empty(resource_id: ResourceId) -> Self {
        Calendar { resource_id, calendar: HashMap::new() }
    }

    pub fn with_available_slots(resource_id: ResourceId, available_slots: &[TimeSlot]) -> Self {
        Calendar { resource_id, calendar: HashMap::from([(Owner::Unclaimed, available_slots.to_vec())]) }
    }

    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    pub fn available_slots(&self) -> &[TimeSlot] {
        self.taken_by(Owner::Unclaimed)
    }

    pub fn taken_by(&self, owner: Owner) -> &[TimeSlot] {
        self.calendar.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Calendars of many resources, defaulting to an empty calendar for any
/// resource absent from the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendars {
    calendars: HashMap<ResourceId, Calendar>,
}

impl Calendars {
    pub fn of(calendars: Vec<Calendar>) -> Self {
        Calendars { calendars: calendars.into_iter().map(|calendar| (calendar.resource_id(), calendar)).collect() }
    }

    pub fn get(&self, resource_id: ResourceId) -> Calendar {
        self.calendars.get(&resource_id).cloned().unwrap_or_else(|| Calendar::empty(resource_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_calendar_has_no_slots() {
        let calendar = Calendar::empty(ResourceId::new_one());

        assert!(calendar.available_slots().is_empty());
        assert!(calendar.taken_by(Owner::new_one()).is_empty());
    }

    #[test]
    fn test_missing_resource_resolves_to_empty_calendar() {
        let resource_id = ResourceId::new_one();
        let calendars = Calendars::of(Vec::new());

        assert_eq!(calendars.get(resource_id), Calendar::empty(resource_id));
    }

    #[test]
    fn test_calendar_with_available_slots() {
        let resource_id = ResourceId::new_one();
        let day = TimeSlot::create_daily_time_slot_at_utc(2021, 1, 1);
        let calendar = Calendar::with_available_slots(resource_id, &[day]);

        assert_eq!(calendar.available_slots(), &[day]);
    }
}
