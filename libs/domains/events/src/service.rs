//! Event Service - lifecycle and query operations

use chrono::Utc;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::classification::{classify_for_management, parse_event_type};
use crate::error::{EventError, EventResult};
use crate::models::{
    CreateEvent, Event, EventStatus, EventType, ManagementStatus, UpdateEvent, non_blank,
};
use crate::repository::EventRepository;
use crate::seed::sample_events;

/// Event service owning every status transition
///
/// Review and unreview are read-modify-write sequences without locking;
/// concurrent writers to the same event resolve last-write-wins in storage.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new pending event
    #[instrument(skip(self, input), fields(event_name = %input.name, event_type = %input.event_type))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;
        let event_type = parse_event_type(input.event_type.trim())?;
        let date = input
            .date
            .ok_or_else(|| EventError::Validation("date is required".to_string()))?;

        let event = Event::new(
            input.name.trim(),
            event_type,
            input.description.trim(),
            date,
        );
        self.repository.create(event).await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(EventError::event_not_found)
    }

    /// All events, newest first
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn list_events_by_status(&self, status: EventStatus) -> EventResult<Vec<Event>> {
        self.repository.find_by_status(status).await
    }

    /// Merge the non-empty fields of `input` into the stored event
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        let event_type = non_blank(input.event_type.as_deref())
            .map(|raw| parse_event_type(raw.trim()))
            .transpose()?;

        let mut event = self.get_event(id).await?;
        event.apply_update(&input, event_type);

        self.repository.update(event).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        self.repository.delete(id).await
    }

    /// Mark an event reviewed, deriving its management status from its type.
    ///
    /// Reviewing an already reviewed event recomputes the management status.
    #[instrument(skip(self))]
    pub async fn review_event(&self, id: Uuid) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        event.mark_reviewed(classify_for_management(event.event_type));

        let event = self.repository.update(event).await?;
        tracing::info!(
            event_id = %event.id,
            management_status = ?event.management_status,
            "Event reviewed"
        );
        Ok(event)
    }

    /// Return a reviewed event to pending
    #[instrument(skip(self))]
    pub async fn unreview_event(&self, id: Uuid) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        if !event.is_reviewed() {
            return Err(EventError::InvalidState(
                "only reviewed events can be unreviewed".to_string(),
            ));
        }
        event.mark_pending();

        self.repository.update(event).await
    }

    /// Reviewed events that do (`true`) or do not (`false`) require management
    #[instrument(skip(self))]
    pub async fn list_by_management_requirement(
        &self,
        required: bool,
    ) -> EventResult<Vec<Event>> {
        let management_status = if required {
            ManagementStatus::RequiresManagement
        } else {
            ManagementStatus::NoManagement
        };
        self.repository
            .find_by_management_status(management_status)
            .await
    }

    pub fn event_types(&self) -> Vec<EventType> {
        EventType::iter().collect()
    }

    pub fn event_statuses(&self) -> Vec<EventStatus> {
        EventStatus::iter().collect()
    }

    pub fn management_statuses(&self) -> Vec<ManagementStatus> {
        ManagementStatus::iter().collect()
    }

    /// Insert the sample batch in one bulk write
    #[instrument(skip(self))]
    pub async fn seed_events(&self) -> EventResult<usize> {
        let inserted = self
            .repository
            .bulk_insert(sample_events(Utc::now()))
            .await?;

        tracing::info!(count = inserted.len(), "Seeded sample events");
        Ok(inserted.len())
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
