use crate::api::handlers::{
    endpoints, health,
    news::{articles, comments, topics, users},
    route_not_found,
};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request, header::CONTENT_TYPE},
    routing::{delete, get},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use ulid::Ulid;

// Keep these internal to the crate while allowing CLI/server wiring to reference them.
pub(crate) mod handlers;
mod openapi;

pub use openapi::openapi;

/// Pool settings passed down from the command line.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_connections: 5 }
    }
}

/// Build the route table. Unknown paths and unsupported methods answer
/// `404 {"msg": "Route not found"}`.
#[must_use]
pub fn router(pool: PgPool) -> Router {
    Router::new()
        .route("/api", get(endpoints::api_index).fallback(route_not_found))
        .route(
            "/api/openapi.json",
            get(openapi::openapi_json).fallback(route_not_found),
        )
        .route(
            "/api/topics",
            get(topics::list_topics).fallback(route_not_found),
        )
        .route(
            "/api/articles",
            get(articles::list_articles).fallback(route_not_found),
        )
        .route(
            "/api/articles/:article_id",
            get(articles::get_article)
                .patch(articles::patch_article_votes)
                .fallback(route_not_found),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(comments::list_comments)
                .post(comments::create_comment)
                .fallback(route_not_found),
        )
        .route(
            "/api/comments/:comment_id",
            delete(comments::remove_comment).fallback(route_not_found),
        )
        .route("/api/users", get(users::list_users).fallback(route_not_found))
        .route(
            "/api/users/:username",
            get(users::get_user).fallback(route_not_found),
        )
        .route(
            "/health",
            get(health::health)
                .options(health::health)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(Extension(pool))
}

/// Connect to the database with the process-wide pool settings.
///
/// # Errors
/// Return error if the database is unreachable
pub async fn connect(dsn: &str, config: PoolConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .min_connections(1)
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, config: PoolConfig) -> Result<()> {
    let pool = connect(&dsn, config).await?;

    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(Any);

    let app = router(pool).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(cors),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
