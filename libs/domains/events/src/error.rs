//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    /// No event with this id, or a listing came back empty
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// The requested transition is not allowed from the current status
    #[error("{0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    pub fn event_not_found() -> Self {
        EventError::NotFound("event not found".to_string())
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(msg) => AppError::NotFound(msg),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::InvalidState(msg) => AppError::Conflict(msg),
            EventError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        EventError::Database(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        EventError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (EventError::event_not_found(), StatusCode::NOT_FOUND),
            (
                EventError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EventError::InvalidState("only reviewed events can be unreviewed".into()),
                StatusCode::CONFLICT,
            ),
            (
                EventError::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
