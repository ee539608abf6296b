use thiserror::Error;

use crate::domain::shared::id::{ResourceAvailabilityId, ResourceId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Resource availability not found: {0}")]
    NotFound(ResourceAvailabilityId),

    #[error("Stale write for availability {id}: expected version {expected}, store holds version {found}")]
    ConcurrencyConflict { id: ResourceAvailabilityId, expected: u64, found: u64 },

    #[error("Availability slots already exist for resource {0} within the requested window")]
    SlotsAlreadyExist(ResourceId),

    #[error("DurationUnit of {0} minutes must be greater than 0")]
    NonPositiveDurationUnit(i64),

    #[error("DurationUnit of {minutes} minutes must be a multiple of {granularity} minutes")]
    MisalignedDurationUnit { minutes: i64, granularity: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
