use std::sync::Mutex;

use crate::domain::availability::events::ResourceTakenOverEvent;

/// Outbound seam for domain events.
///
/// The engine only emits events; delivery (bus, queue, outbox) is up to the
/// embedding application.
pub trait EventPublisher: Send + Sync + std::fmt::Debug {
    fn publish(&self, event: ResourceTakenOverEvent);
}

/// Recording publisher used as the in-process default and by tests.
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<ResourceTakenOverEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything published so far, in publish order.
    pub fn published(&self) -> Vec<ResourceTakenOverEvent> {
        self.events.lock().expect("Mutex poisoned").clone()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: ResourceTakenOverEvent) {
        log::info!("Publishing event: resource {} taken over by disablement.", event.resource_id);
        self.events.lock().expect("Mutex poisoned").push(event);
    }
}
