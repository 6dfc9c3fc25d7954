use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    ValidQuery, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{
    CreateEvent, Event, EventQuery, EventResponse, EventStatus, EventType, ManagementStatus,
    MessageResponse, UpdateEvent,
};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        update_event,
        delete_event,
        review_event,
        unreview_event,
        list_event_types,
        list_event_statuses,
        list_management_statuses,
        list_management_required,
        list_no_management_required,
        seed_events,
    ),
    components(
        schemas(
            EventResponse,
            CreateEvent,
            UpdateEvent,
            EventType,
            EventStatus,
            ManagementStatus,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event review workflow endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/types", get(list_event_types))
        .route("/status", get(list_event_statuses))
        .route("/management-status", get(list_management_statuses))
        .route("/management-required", get(list_management_required))
        .route("/no-management-required", get(list_no_management_required))
        .route("/seed", post(seed_events))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/{id}/review", put(review_event))
        .route("/{id}/unreview", put(unreview_event))
        .with_state(shared_service)
}

/// A malformed id cannot name a stored event, so it is reported as not found
fn parse_id(raw: &str) -> EventResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| EventError::event_not_found())
}

/// Empty listings are answered with 404
fn non_empty(events: Vec<Event>, what: &str) -> EventResult<Json<Vec<EventResponse>>> {
    if events.is_empty() {
        return Err(EventError::NotFound(format!("no {} found", what)));
    }
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// List events, optionally filtered by status
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventQuery),
    responses(
        (status = 200, description = "Events, newest first", body = Vec<EventResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidQuery(query): ValidQuery<EventQuery>,
) -> EventResult<Json<Vec<EventResponse>>> {
    let events = match query.status {
        Some(status) => service.list_events_by_status(status).await?,
        None => service.list_events().await?,
    };
    non_empty(events, "events")
}

/// Create a new event in PENDING status
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<EventResponse>> {
    let event = service.get_event(parse_id(&id)?).await?;
    Ok(Json(event.into()))
}

/// Update an event; absent or empty fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<EventResponse>> {
    let event = service.update_event(parse_id(&id)?, input).await?;
    Ok(Json(event.into()))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<StatusCode> {
    service.delete_event(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Review an event and derive its management status
#[utoipa::path(
    put,
    path = "/{id}/review",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event reviewed", body = EventResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn review_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<EventResponse>> {
    let event = service.review_event(parse_id(&id)?).await?;
    Ok(Json(event.into()))
}

/// Return a reviewed event to PENDING
#[utoipa::path(
    put,
    path = "/{id}/unreview",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event back in PENDING", body = EventResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unreview_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<EventResponse>> {
    let event = service.unreview_event(parse_id(&id)?).await?;
    Ok(Json(event.into()))
}

/// List the supported event types
#[utoipa::path(
    get,
    path = "/types",
    tag = "Events",
    responses(
        (status = 200, description = "Event types", body = Vec<EventType>)
    )
)]
async fn list_event_types<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> Json<Vec<EventType>> {
    Json(service.event_types())
}

/// List the review statuses
#[utoipa::path(
    get,
    path = "/status",
    tag = "Events",
    responses(
        (status = 200, description = "Event statuses", body = Vec<EventStatus>)
    )
)]
async fn list_event_statuses<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> Json<Vec<EventStatus>> {
    Json(service.event_statuses())
}

/// List the management statuses
#[utoipa::path(
    get,
    path = "/management-status",
    tag = "Events",
    responses(
        (status = 200, description = "Management statuses", body = Vec<ManagementStatus>)
    )
)]
async fn list_management_statuses<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> Json<Vec<ManagementStatus>> {
    Json(service.management_statuses())
}

/// Reviewed events that require management
#[utoipa::path(
    get,
    path = "/management-required",
    tag = "Events",
    responses(
        (status = 200, description = "Events requiring management", body = Vec<EventResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_management_required<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<EventResponse>>> {
    let events = service.list_by_management_requirement(true).await?;
    non_empty(events, "events requiring management")
}

/// Reviewed events that need no management
#[utoipa::path(
    get,
    path = "/no-management-required",
    tag = "Events",
    responses(
        (status = 200, description = "Events without management", body = Vec<EventResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_no_management_required<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<EventResponse>>> {
    let events = service.list_by_management_requirement(false).await?;
    non_empty(events, "events without management")
}

/// Insert one sample event per type
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Events",
    responses(
        (status = 201, description = "Sample events inserted", body = MessageResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<impl IntoResponse> {
    let count = service.seed_events().await?;
    let body = MessageResponse {
        message: format!("{} sample events inserted", count),
    };
    Ok((StatusCode::CREATED, Json(body)))
}
