//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventStatus, ManagementStatus};
use crate::repository::EventRepository;

pub const DEFAULT_COLLECTION: &str = "events";

/// MongoDB implementation of the EventRepository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    /// Repository over the default `events` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Event>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Event> {
        &self.collection
    }

    /// Create the indexes backing the listing queries
    pub async fn init_indexes(&self) -> EventResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "created_at": -1 }).build(),
            IndexModel::builder()
                .keys(doc! { "status": 1, "management_status": 1, "created_at": -1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(
            collection = %self.collection.name(),
            "Event indexes created"
        );
        Ok(())
    }

    /// BSON dates keep milliseconds; stamping at that precision keeps the
    /// returned event equal to what a later read sees.
    fn stored_now() -> DateTime<Utc> {
        bson::DateTime::now().to_chrono()
    }

    fn stored_date(date: DateTime<Utc>) -> DateTime<Utc> {
        bson::DateTime::from_chrono(date).to_chrono()
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": mongodb::bson::Uuid::from(id) }
    }

    fn status_filter(status: EventStatus) -> Document {
        doc! { "status": status.to_string() }
    }

    fn management_filter(management_status: ManagementStatus) -> Document {
        doc! {
            "status": EventStatus::Reviewed.to_string(),
            "management_status": management_status.to_string(),
        }
    }

    async fn find_sorted(&self, filter: Document) -> EventResult<Vec<Event>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> EventResult<Vec<Event>> {
        self.find_sorted(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let event = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(event)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, mut event: Event) -> EventResult<Event> {
        let now = Self::stored_now();
        event.date = Self::stored_date(event.date);
        event.created_at = now;
        event.updated_at = now;

        self.collection.insert_one(&event).await?;

        tracing::info!(event_id = %event.id, "Event created successfully");
        Ok(event)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, mut event: Event) -> EventResult<Event> {
        event.date = Self::stored_date(event.date);
        event.updated_at = Self::stored_now();

        let result = self
            .collection
            .replace_one(Self::id_filter(event.id), &event)
            .await?;

        if result.matched_count == 0 {
            return Err(EventError::event_not_found());
        }

        tracing::info!(event_id = %event.id, "Event updated successfully");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<()> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(EventError::event_not_found());
        }

        tracing::info!(event_id = %id, "Event deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_status(&self, status: EventStatus) -> EventResult<Vec<Event>> {
        self.find_sorted(Self::status_filter(status)).await
    }

    #[instrument(skip(self))]
    async fn find_by_management_status(
        &self,
        management_status: ManagementStatus,
    ) -> EventResult<Vec<Event>> {
        self.find_sorted(Self::management_filter(management_status))
            .await
    }

    #[instrument(skip(self, events), fields(count = events.len()))]
    async fn bulk_insert(&self, mut events: Vec<Event>) -> EventResult<Vec<Event>> {
        if events.is_empty() {
            return Ok(events);
        }

        let now = Self::stored_now();
        for event in &mut events {
            event.date = Self::stored_date(event.date);
            event.created_at = now;
            event.updated_at = now;
        }

        let result = self.collection.insert_many(&events).await?;

        tracing::info!(
            inserted = result.inserted_ids.len(),
            "Events inserted successfully"
        );
        Ok(events)
    }
}
