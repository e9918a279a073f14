use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;

/// Middleware bounding the time a handler may take to produce a response.
///
/// Mount with `middleware::from_fn_with_state(deadline, request_timeout)`.
/// When the deadline passes the handler future is dropped and the client
/// gets a 500 with an `error` body.
pub async fn request_timeout(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %uri, ?deadline, "Request deadline exceeded");
            AppError::InternalServerError(format!(
                "Request exceeded the {}s deadline",
                deadline.as_secs()
            ))
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_millis(200)).await;
        "done"
    }

    async fn fast() -> &'static str {
        "done"
    }

    fn app(deadline: Duration) -> Router {
        Router::new()
            .route("/slow", get(slow))
            .route("/fast", get(fast))
            .layer(middleware::from_fn_with_state(deadline, request_timeout))
    }

    #[tokio::test]
    async fn test_fast_request_passes() {
        let request = axum::http::Request::get("/fast").body(Body::empty()).unwrap();
        let response = app(Duration::from_secs(1)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let request = axum::http::Request::get("/slow").body(Body::empty()).unwrap();
        let response = app(Duration::from_millis(20)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
