//! Event domain models

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::{chrono_datetime_as_bson_datetime, uuid_1_as_binary};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Emergency,
    Maintenance,
    Notification,
    Alert,
    Info,
}

/// Review state of an event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Not reviewed yet
    #[default]
    Pending,
    /// Reviewed; a management status has been assigned
    Reviewed,
}

/// Whether a reviewed event needs someone to act on it
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ManagementStatus {
    RequiresManagement,
    NoManagement,
}

/// Event entity as stored in MongoDB
///
/// `management_status` is `Some` exactly when `status` is `Reviewed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_1_as_binary")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    /// When the event occurs or occurred
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_status: Option<ManagementStatus>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a pending event with a fresh id.
    ///
    /// Timestamps are provisional; repositories stamp them on insert.
    pub fn new(
        name: impl Into<String>,
        event_type: EventType,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            event_type,
            description: description.into(),
            date,
            status: EventStatus::Pending,
            management_status: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `Reviewed` with the given management status
    pub fn mark_reviewed(&mut self, management_status: ManagementStatus) {
        self.status = EventStatus::Reviewed;
        self.management_status = Some(management_status);
    }

    /// Move back to `Pending` and drop the management status
    pub fn mark_pending(&mut self) {
        self.status = EventStatus::Pending;
        self.management_status = None;
    }

    pub fn is_reviewed(&self) -> bool {
        self.status == EventStatus::Reviewed
    }

    /// Apply the non-empty fields of an update, trimmed the same way as on
    /// create. Status fields are never touched.
    ///
    /// `event_type` must already be validated by the caller.
    pub fn apply_update(&mut self, update: &UpdateEvent, event_type: Option<EventType>) {
        if let Some(name) = non_blank(update.name.as_deref()) {
            self.name = name.trim().to_string();
        }
        if let Some(event_type) = event_type {
            self.event_type = event_type;
        }
        if let Some(description) = non_blank(update.description.as_deref()) {
            self.description = description.trim().to_string();
        }
        if let Some(date) = update.date {
            self.date = date;
        }
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// DTO for creating a new event
///
/// Missing fields deserialize to empty values so that they surface as
/// validation errors rather than JSON rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "name is required"))]
    #[schema(example = "Scheduled maintenance")]
    pub name: String,

    /// One of EMERGENCY, MAINTENANCE, NOTIFICATION, ALERT, INFO
    #[serde(rename = "type", default)]
    #[validate(custom(function = "validate_not_blank", message = "type is required"))]
    #[schema(example = "MAINTENANCE")]
    pub event_type: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "description is required"))]
    #[schema(example = "Planned system maintenance for the upgrade")]
    pub description: String,

    #[serde(default)]
    #[validate(required(message = "date is required"))]
    #[schema(example = "2025-04-08T00:00:00Z")]
    pub date: Option<DateTime<Utc>>,
}

/// DTO for updating an event. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub event_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Query parameters for listing events
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct EventQuery {
    /// Only return events in this status
    pub status: Option<EventStatus>,
}

/// Event as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    pub date: DateTime<Utc>,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_status: Option<ManagementStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            event_type: event.event_type,
            description: event.description,
            date: event.date,
            status: event.status,
            management_status: event.management_status,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_event_is_pending() {
        let event = Event::new("X", EventType::Alert, "Y", Utc::now());

        assert!(!event.id.is_nil());
        assert_eq!(event.status, EventStatus::Pending);
        assert!(event.management_status.is_none());
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(EventType::Notification.to_string(), "NOTIFICATION");
        assert_eq!(
            ManagementStatus::RequiresManagement.to_string(),
            "REQUIRES_MANAGEMENT"
        );
        assert_eq!(
            serde_json::to_value(EventStatus::Reviewed).unwrap(),
            serde_json::json!("REVIEWED")
        );
    }

    #[test]
    fn test_apply_update_ignores_blank_fields() {
        let date = Utc::now();
        let mut event = Event::new("Original", EventType::Info, "Details", date);

        let update = UpdateEvent {
            name: Some("Renamed".to_string()),
            event_type: Some(String::new()),
            description: Some("   ".to_string()),
            date: None,
        };
        event.apply_update(&update, None);

        assert_eq!(event.name, "Renamed");
        assert_eq!(event.event_type, EventType::Info);
        assert_eq!(event.description, "Details");
        assert_eq!(event.date, date);
    }

    #[test]
    fn test_apply_update_keeps_review_state() {
        let mut event = Event::new("Outage", EventType::Emergency, "Down", Utc::now());
        event.mark_reviewed(ManagementStatus::RequiresManagement);

        let later = Utc::now() + Duration::days(3);
        let update = UpdateEvent {
            date: Some(later),
            ..Default::default()
        };
        event.apply_update(&update, Some(EventType::Info));

        assert_eq!(event.event_type, EventType::Info);
        assert_eq!(event.date, later);
        assert_eq!(event.status, EventStatus::Reviewed);
        assert_eq!(
            event.management_status,
            Some(ManagementStatus::RequiresManagement)
        );
    }

    #[test]
    fn test_apply_update_trims_text_fields() {
        let mut event = Event::new("Original", EventType::Info, "Details", Utc::now());

        let update = UpdateEvent {
            name: Some("  Renamed ".to_string()),
            description: Some(" New details\n".to_string()),
            ..Default::default()
        };
        event.apply_update(&update, None);

        assert_eq!(event.name, "Renamed");
        assert_eq!(event.description, "New details");
    }

    #[test]
    fn test_create_event_requires_fields() {
        let create: CreateEvent = serde_json::from_value(serde_json::json!({
            "name": "",
            "type": "ALERT"
        }))
        .unwrap();

        let errors = create.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("date"));
        assert!(!fields.contains_key("event_type"));
    }

    #[test]
    fn test_response_omits_empty_management_status() {
        let event = Event::new("X", EventType::Alert, "Y", Utc::now());
        let json = serde_json::to_value(EventResponse::from(event)).unwrap();

        assert_eq!(json["type"], "ALERT");
        assert_eq!(json["status"], "PENDING");
        assert!(json.get("managementStatus").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
