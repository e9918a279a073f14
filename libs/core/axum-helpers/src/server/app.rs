use super::shutdown::shutdown_signal;
use super::timeout::request_timeout;
use crate::errors::handlers::not_found;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// let config = ServerConfig::default();
/// create_app(Router::new(), &config).await?;
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!(
        timeout_secs = server_config.timeout_secs,
        "Server starting on {}",
        listener.local_addr()?
    );
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - The OpenAPI document of `T` at `/api-docs/openapi.json`
/// - The API routes, mounted at the root
/// - A per-request deadline of `request_deadline`
/// - Request tracing
/// - A JSON 404 fallback
///
/// Routers passed in should already have their state applied.
pub fn create_router<T>(apis: Router, request_deadline: Duration) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || std::future::ready(Json(openapi.clone()))),
        )
        .merge(apis)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            request_deadline,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
