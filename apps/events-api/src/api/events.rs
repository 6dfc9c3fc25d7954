//! Events API routes backed by MongoDB

use crate::state::AppState;
use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use tracing::info;

fn repository(state: &AppState) -> MongoEventRepository {
    MongoEventRepository::with_collection(&state.db, &state.config.events_collection)
}

pub fn router(state: &AppState) -> Router {
    domain_events::handlers::router(EventService::new(repository(state)))
}

/// Create the event collection indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!(
        collection = %state.config.events_collection,
        "Event collection indexes ready"
    );
    Ok(())
}
