use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::availability::owner::Owner;
use crate::domain::shared::id::ResourceId;
use crate::domain::shared::timeslot::TimeSlot;

/// Emitted when a resource window is administratively disabled, evicting any
/// reservations that held parts of it. Downstream risk handling notifies the
/// previous owners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceTakenOverEvent {
    pub id: Uuid,
    pub resource_id: ResourceId,
    pub previous_owners: HashSet<Owner>,
    pub slot: TimeSlot,
    pub occurred_at: DateTime<Utc>,
}

impl ResourceTakenOverEvent {
    pub fn new(resource_id: ResourceId, previous_owners: HashSet<Owner>, slot: TimeSlot) -> Self {
        ResourceTakenOverEvent { id: Uuid::new_v4(), resource_id, previous_owners, slot, occurred_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_plain_uuid_ids() {
        let resource_id = ResourceId::new_one();
        let owner = Owner::new_one();
        let slot = TimeSlot::create_daily_time_slot_at_utc(2021, 1, 1);

        let event = ResourceTakenOverEvent::new(resource_id, HashSet::from([owner]), slot);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["resource_id"], serde_json::json!(resource_id.id));
        assert_eq!(json["slot"]["from"], serde_json::json!(slot.from));
        assert_eq!(json["previous_owners"][0]["OwnedBy"], serde_json::json!(owner.to_persisted()));
    }
}
