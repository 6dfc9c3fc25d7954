//! Custom extractors for Axum handlers.

pub mod valid_query;
pub mod validated_json;

pub use valid_query::ValidQuery;
pub use validated_json::ValidatedJson;
