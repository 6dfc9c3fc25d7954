//! Query string extractor that answers with the standard error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Drop-in for `axum::extract::Query`.
///
/// A query string that fails to deserialize (an unknown enum value, a
/// malformed number) answers 400 with `error: "QUERY_EXTRACTION"` instead of
/// axum's plain-text rejection.
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Filter {
        limit: Option<u32>,
    }

    async fn handler(ValidQuery(filter): ValidQuery<Filter>) -> String {
        filter.limit.unwrap_or_default().to_string()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        let app = Router::new().route("/", get(handler));
        let response = app.oneshot(get_uri("/?limit=5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"5");
    }

    #[tokio::test]
    async fn test_bad_query_uses_json_envelope() {
        let app = Router::new().route("/", get(handler));
        let response = app.oneshot(get_uri("/?limit=lots")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "QUERY_EXTRACTION");
        assert_eq!(body["code"], 1006);
        assert!(!body["message"].as_str().unwrap().is_empty());
    }
}
