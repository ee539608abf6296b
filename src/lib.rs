#![feature(int_roundings)]

use std::sync::Arc;

use crate::domain::availability::facade::AvailabilityFacade;
use crate::domain::availability::repository::in_memory::InMemoryAvailabilityRepository;
use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
use crate::domain::shared::event::InMemoryEventBus;

pub mod domain;
pub mod error;
pub mod logger;

/// Builds a fully wired in-memory availability facade.
///
/// Initializes the global logger and wires the in-memory repository and event
/// bus; the bus handle is returned so callers can observe published events.
pub fn create_in_memory_facade(duration_unit: DurationUnit) -> (AvailabilityFacade, Arc<InMemoryEventBus>) {
    logger::init();
    log::info!("Logger initialized. Building in-memory availability facade.");

    let repository = Arc::new(InMemoryAvailabilityRepository::new());
    let event_bus = Arc::new(InMemoryEventBus::new());
    let facade = AvailabilityFacade::new(repository, event_bus.clone(), duration_unit);

    (facade, event_bus)
}
