pub mod endpoints;
pub mod health;
pub mod news;

// common types for the handlers
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Client-facing error body: `{"msg": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub msg: String,
}

impl ErrorMessage {
    #[must_use]
    pub fn new(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
        }
    }
}

/// Terminal outcome of a request that did not succeed.
///
/// Client errors carry a fixed message. Storage failures are logged here and
/// answered with a generic `500` so no internal detail leaks.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorMessage::new(message))).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorMessage::new(message))).into_response()
            }
            Self::Database(err) => {
                error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_SERVER_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

/// Fallback for any request no route matches.
pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorMessage::new(ROUTE_NOT_FOUND)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }

    #[tokio::test]
    async fn client_errors_carry_message() {
        let response = ApiError::BadRequest("Invalid article_id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "msg": "Invalid article_id" }));

        let response = ApiError::NotFound("Article not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "msg": "Article not found" }));
    }

    #[tokio::test]
    async fn database_errors_are_generic() {
        let response = ApiError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal Server Error" })
        );
    }

    #[tokio::test]
    async fn fallback_reports_route_not_found() {
        let response = route_not_found().await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "msg": "Route not found" }));
    }
}
