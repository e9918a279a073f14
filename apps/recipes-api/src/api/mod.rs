//! API routes module

pub mod health;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/recipes", recipes::router(state))
        .merge(health::router(state.clone()))
}
