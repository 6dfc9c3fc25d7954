//! Sample events used to populate an empty store

use chrono::{DateTime, Duration, Utc};

use crate::classification::classify_for_management;
use crate::models::{Event, EventType};

/// One sample per event type, dated relative to `now`.
///
/// The emergency and info samples are already reviewed.
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    let pending = [
        (
            "Scheduled maintenance",
            EventType::Maintenance,
            "Planned system maintenance for the upgrade",
            now + Duration::days(7),
        ),
        (
            "Security alert",
            EventType::Alert,
            "Unusual access attempts detected",
            now - Duration::days(2),
        ),
        (
            "Update notification",
            EventType::Notification,
            "A new version of the application is available",
            now + Duration::days(1),
        ),
    ];

    let reviewed = [
        (
            "Network emergency",
            EventType::Emergency,
            "Connectivity lost in the main data center",
            now - Duration::days(1),
        ),
        (
            "User information",
            EventType::Info,
            "Platform usage guide for new users",
            now,
        ),
    ];

    let mut events: Vec<Event> = pending
        .into_iter()
        .map(|(name, event_type, description, date)| {
            Event::new(name, event_type, description, date)
        })
        .collect();

    events.extend(
        reviewed
            .into_iter()
            .map(|(name, event_type, description, date)| {
                let mut event = Event::new(name, event_type, description, date);
                event.mark_reviewed(classify_for_management(event_type));
                event
            }),
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventStatus, ManagementStatus};
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_one_sample_per_type() {
        let events = sample_events(Utc::now());

        let types: HashSet<EventType> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(types.len(), EventType::iter().count());
        assert_eq!(events.len(), types.len());
    }

    #[test]
    fn test_reviewed_samples_are_consistent() {
        for event in sample_events(Utc::now()) {
            match event.status {
                EventStatus::Pending => assert!(event.management_status.is_none()),
                EventStatus::Reviewed => assert_eq!(
                    event.management_status,
                    Some(classify_for_management(event.event_type))
                ),
            }
        }
    }

    #[test]
    fn test_emergency_sample_requires_management() {
        let events = sample_events(Utc::now());
        let emergency = events
            .iter()
            .find(|e| e.event_type == EventType::Emergency)
            .unwrap();

        assert_eq!(emergency.status, EventStatus::Reviewed);
        assert_eq!(
            emergency.management_status,
            Some(ManagementStatus::RequiresManagement)
        );
    }
}
