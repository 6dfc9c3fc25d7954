//! MongoDB integration tests for the Events domain
//!
//! Each test starts its own MongoDB container. Run with:
//! `cargo test -p domain_events --test integration_test -- --ignored`

use chrono::{TimeZone, Utc};
use domain_events::*;
use test_utils::{TestDataBuilder, TestMongo};

async fn service(mongo: &TestMongo, test_name: &str) -> EventService<MongoEventRepository> {
    let builder = TestDataBuilder::from_test_name(test_name);
    let db = mongo.database(&builder.database_name());
    let repository = MongoEventRepository::new(&db);
    repository.init_indexes().await.unwrap();
    EventService::new(repository)
}

fn input(name: &str, event_type: &str) -> CreateEvent {
    CreateEvent {
        name: name.to_string(),
        event_type: event_type.to_string(),
        description: format!("{name} description"),
        date: Some(Utc.with_ymd_and_hms(2025, 4, 8, 0, 0, 0).unwrap()),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_round_trip() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo, "test_create_and_get_round_trip").await;

    let created = service
        .create_event(input("Core switch down", "EMERGENCY"))
        .await
        .unwrap();
    let fetched = service.get_event(created.id).await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Core switch down");
    assert_eq!(fetched.event_type, EventType::Emergency);
    assert_eq!(fetched.status, EventStatus::Pending);
    assert_eq!(fetched.management_status, None);
    assert_eq!(fetched.date, created.date);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_review_cycle_persists() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo, "test_review_cycle_persists").await;

    let event = service
        .create_event(input("Firmware rollout", "MAINTENANCE"))
        .await
        .unwrap();

    let reviewed = service.review_event(event.id).await.unwrap();
    assert_eq!(
        reviewed.management_status,
        Some(ManagementStatus::NoManagement)
    );

    let stored = service.get_event(event.id).await.unwrap();
    assert_eq!(stored.status, EventStatus::Reviewed);
    assert_eq!(stored.management_status, Some(ManagementStatus::NoManagement));
    assert_eq!(stored.created_at, event.created_at);

    let pending = service.unreview_event(event.id).await.unwrap();
    assert_eq!(pending.status, EventStatus::Pending);
    assert_eq!(service.get_event(event.id).await.unwrap().management_status, None);

    let err = service.unreview_event(event.id).await.unwrap_err();
    assert!(matches!(err, EventError::InvalidState(_)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_management_queries_only_see_reviewed_events() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo, "test_management_queries").await;

    let emergency = service
        .create_event(input("Outage", "EMERGENCY"))
        .await
        .unwrap();
    service
        .create_event(input("Unreviewed outage", "EMERGENCY"))
        .await
        .unwrap();
    let info = service.create_event(input("Release", "INFO")).await.unwrap();

    service.review_event(emergency.id).await.unwrap();
    service.review_event(info.id).await.unwrap();

    let required = service.list_by_management_requirement(true).await.unwrap();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].id, emergency.id);

    let not_required = service.list_by_management_requirement(false).await.unwrap();
    assert_eq!(not_required.len(), 1);
    assert_eq!(not_required[0].id, info.id);

    let pending = service
        .list_events_by_status(EventStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_and_delete() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo, "test_update_and_delete").await;

    let event = service
        .create_event(input("Patch window", "MAINTENANCE"))
        .await
        .unwrap();

    let updated = service
        .update_event(
            event.id,
            UpdateEvent {
                name: Some("Extended patch window".to_string()),
                event_type: None,
                description: None,
                date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Extended patch window");
    assert_eq!(updated.description, event.description);
    assert!(updated.updated_at >= event.updated_at);

    service.delete_event(event.id).await.unwrap();
    assert!(matches!(
        service.get_event(event.id).await,
        Err(EventError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_event(event.id).await,
        Err(EventError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_seed_then_list_newest_first() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo, "test_seed_then_list_newest_first").await;

    assert_eq!(service.seed_events().await.unwrap(), 5);

    let events = service.list_events().await.unwrap();
    assert_eq!(events.len(), 5);
    assert!(
        events
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );

    let reviewed = service
        .list_events_by_status(EventStatus::Reviewed)
        .await
        .unwrap();
    assert_eq!(reviewed.len(), 2);
}
