//! Maps an event type to the management decision taken when it is reviewed.

use std::str::FromStr;

use crate::error::{EventError, EventResult};
use crate::models::{EventType, ManagementStatus};

/// Management decision for a reviewed event of the given type.
///
/// Emergencies and alerts need someone to act; everything else does not.
pub fn classify_for_management(event_type: EventType) -> ManagementStatus {
    match event_type {
        EventType::Emergency | EventType::Alert => ManagementStatus::RequiresManagement,
        EventType::Maintenance | EventType::Notification | EventType::Info => {
            ManagementStatus::NoManagement
        }
    }
}

/// Parse a raw wire value (e.g. `"EMERGENCY"`) into an [`EventType`]
pub fn parse_event_type(raw: &str) -> EventResult<EventType> {
    EventType::from_str(raw)
        .map_err(|_| EventError::Validation(format!("unrecognized event type: {}", raw)))
}

/// Boolean form of [`parse_event_type`], for callers that only need a yes/no
pub fn is_valid_type(raw: &str) -> bool {
    parse_event_type(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classification_table() {
        for event_type in EventType::iter() {
            let expected = match event_type {
                EventType::Emergency | EventType::Alert => ManagementStatus::RequiresManagement,
                _ => ManagementStatus::NoManagement,
            };
            assert_eq!(classify_for_management(event_type), expected, "{event_type}");
        }
    }

    #[test]
    fn test_parse_event_type() {
        assert_eq!(parse_event_type("ALERT").unwrap(), EventType::Alert);
        assert!(matches!(
            parse_event_type("alert"),
            Err(EventError::Validation(_))
        ));
        assert!(matches!(
            parse_event_type("BOGUS"),
            Err(EventError::Validation(_))
        ));
    }

    #[test]
    fn test_is_valid_type() {
        assert!(is_valid_type("EMERGENCY"));
        assert!(is_valid_type("INFO"));
        assert!(!is_valid_type(""));
        assert!(!is_valid_type("Emergency"));
    }
}
