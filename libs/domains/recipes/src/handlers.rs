use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, PayloadJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RecipeResult;
use crate::gateway::StorageGateway;
use crate::models::{Recipe, RecipeId, SuccessResponse};
use crate::service::RecipeService;

pub const DEFAULT_START: u64 = 0;
pub const DEFAULT_LIMIT: u64 = 10;
pub const NO_SEARCH_PATTERN: &str = "No search pattern given";

/// OpenAPI documentation for Recipes API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_recipe,
        get_recipe,
        update_recipe,
        delete_recipe,
        list_recipes,
        rate_recipe,
        search_recipes,
    ),
    components(
        schemas(Recipe, SuccessResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Recipes", description = "Recipe management and rating endpoints")
    )
)]
pub struct ApiDoc;

/// Create the recipes router with all HTTP endpoints
///
/// Every route with a leading variable segment names it `id`; for the list
/// route that segment is the start offset.
pub fn router<G: StorageGateway + 'static>(service: RecipeService<G>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_recipe))
        .route("/search/", get(missing_search_pattern))
        .route("/search/{*pattern}", get(search_recipes))
        .route(
            "/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/{id}/{limit}", get(list_recipes))
        .route("/{id}/rate/{score}", post(rate_recipe))
        .with_state(shared_service)
}

/// Create a new recipe
#[utoipa::path(
    post,
    path = "",
    tag = "Recipes",
    request_body = Recipe,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_recipe<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    PayloadJson(recipe): PayloadJson<Recipe>,
) -> RecipeResult<impl IntoResponse> {
    let recipe = service.create_recipe(recipe).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Get a recipe by ID
///
/// Any failure, including an unknown id, answers 400.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn get_recipe<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path(id): Path<RecipeId>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = service
        .get_recipe(&id)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(recipe))
}

/// Replace a recipe
///
/// Fields missing from the body are reset to their zero values.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = Recipe,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_recipe<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path(id): Path<RecipeId>,
    PayloadJson(recipe): PayloadJson<Recipe>,
) -> RecipeResult<Json<Recipe>> {
    let recipe = service.update_recipe(id, recipe).await?;
    Ok(Json(recipe))
}

/// Delete a recipe
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = SuccessResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_recipe<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path(id): Path<RecipeId>,
) -> RecipeResult<Json<SuccessResponse>> {
    service.delete_recipe(&id).await?;
    Ok(Json(SuccessResponse::success()))
}

/// List a page of recipes
///
/// Unparsable `start` or `limit` fall back to 0 and 10.
#[utoipa::path(
    get,
    path = "/{start}/{limit}",
    tag = "Recipes",
    params(
        ("start" = u64, Path, description = "Number of recipes to skip"),
        ("limit" = u64, Path, description = "Maximum number of recipes to return")
    ),
    responses(
        (status = 200, description = "Page of recipes", body = Vec<Recipe>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_recipes<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path((start, limit)): Path<(String, String)>,
) -> RecipeResult<Json<Vec<Recipe>>> {
    let start = start.parse().unwrap_or(DEFAULT_START);
    let limit = limit.parse().unwrap_or(DEFAULT_LIMIT);

    let recipes = service.list_recipes(start, limit).await?;
    Ok(Json(recipes))
}

/// Rate a recipe with a score from 1 to 5
#[utoipa::path(
    post,
    path = "/{id}/rate/{score}",
    tag = "Recipes",
    params(
        ("id" = String, Path, description = "Recipe ID"),
        ("score" = u8, Path, description = "Score from 1 to 5")
    ),
    responses(
        (status = 200, description = "Rating applied", body = SuccessResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn rate_recipe<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path((id, score)): Path<(RecipeId, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let score: u8 = score.parse().map_err(|e: std::num::ParseIntError| {
        AppError::InternalServerError(format!("Invalid score '{}': {}", score, e))
    })?;

    service.rate_recipe(&id, score).await?;
    Ok(Json(SuccessResponse::success()))
}

/// Search recipes whose name matches a regular expression
#[utoipa::path(
    get,
    path = "/search/{pattern}",
    tag = "Recipes",
    params(
        ("pattern" = String, Path, description = "Regular expression matched against recipe names")
    ),
    responses(
        (status = 200, description = "Matching recipes", body = Vec<Recipe>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_recipes<G: StorageGateway>(
    State(service): State<Arc<RecipeService<G>>>,
    Path(pattern): Path<String>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    if pattern.is_empty() {
        return Err(missing_search_pattern().await);
    }

    let recipes = service.search_recipes(&pattern).await?;
    Ok(Json(recipes))
}

async fn missing_search_pattern() -> AppError {
    AppError::InternalServerError(NO_SEARCH_PATTERN.to_string())
}
