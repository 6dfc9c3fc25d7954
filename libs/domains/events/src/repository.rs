use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventStatus, ManagementStatus};

/// Repository trait for Event persistence
///
/// Implementations stamp `created_at`/`updated_at` and return listings
/// newest first by `created_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events
    async fn find_all(&self) -> EventResult<Vec<Event>>;

    async fn find_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Insert a new event; timestamps are set to now
    async fn create(&self, event: Event) -> EventResult<Event>;

    /// Replace a stored event; fails with `NotFound` if the id is unknown
    async fn update(&self, event: Event) -> EventResult<Event>;

    /// Fails with `NotFound` if the id is unknown
    async fn delete(&self, id: Uuid) -> EventResult<()>;

    async fn find_by_status(&self, status: EventStatus) -> EventResult<Vec<Event>>;

    /// Reviewed events carrying the given management status
    async fn find_by_management_status(
        &self,
        management_status: ManagementStatus,
    ) -> EventResult<Vec<Event>>;

    /// Insert many events at once, keeping their status fields as given
    async fn bulk_insert(&self, events: Vec<Event>) -> EventResult<Vec<Event>>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn collect_where<F>(&self, predicate: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        let events = self.events.read().await;
        let mut result: Vec<Event> = events.values().filter(|e| predicate(e)).cloned().collect();

        // Newest first; ids are time-ordered so they break ties
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        result
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_all(&self) -> EventResult<Vec<Event>> {
        Ok(self.collect_where(|_| true).await)
    }

    async fn find_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn create(&self, mut event: Event) -> EventResult<Event> {
        let now = Utc::now();
        event.created_at = now;
        event.updated_at = now;

        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn update(&self, mut event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;
        let stored = events
            .get_mut(&event.id)
            .ok_or_else(EventError::event_not_found)?;

        event.created_at = stored.created_at;
        event.updated_at = Utc::now();
        *stored = event.clone();

        tracing::info!(event_id = %event.id, "Updated event");
        Ok(event)
    }

    async fn delete(&self, id: Uuid) -> EventResult<()> {
        let mut events = self.events.write().await;

        if events.remove(&id).is_some() {
            tracing::info!(event_id = %id, "Deleted event");
            Ok(())
        } else {
            Err(EventError::event_not_found())
        }
    }

    async fn find_by_status(&self, status: EventStatus) -> EventResult<Vec<Event>> {
        Ok(self.collect_where(|e| e.status == status).await)
    }

    async fn find_by_management_status(
        &self,
        management_status: ManagementStatus,
    ) -> EventResult<Vec<Event>> {
        Ok(self
            .collect_where(|e| {
                e.status == EventStatus::Reviewed
                    && e.management_status == Some(management_status)
            })
            .await)
    }

    async fn bulk_insert(&self, events: Vec<Event>) -> EventResult<Vec<Event>> {
        let now = Utc::now();
        let mut store = self.events.write().await;

        let inserted: Vec<Event> = events
            .into_iter()
            .map(|mut event| {
                event.created_at = now;
                event.updated_at = now;
                store.insert(event.id, event.clone());
                event
            })
            .collect();

        tracing::info!(count = inserted.len(), "Inserted events");
        Ok(inserted)
    }
}
