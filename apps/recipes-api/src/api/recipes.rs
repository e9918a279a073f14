//! Recipes API routes

use axum::Router;
use domain_recipes::{MongoGateway, RecipeService, handlers};

use crate::state::AppState;

/// Create recipes router backed by the `recipes` collection
pub fn router(state: &AppState) -> Router {
    let gateway = MongoGateway::new(state.db.clone());
    let service = RecipeService::new(gateway);

    handlers::router(service)
}
