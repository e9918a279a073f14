//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipes API",
        version = "0.1.0",
        description = "REST API for creating, searching and rating recipes (MongoDB)"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/recipes", api = domain_recipes::ApiDoc)
    ),
    tags(
        (name = "Recipes", description = "Recipe management and rating endpoints")
    )
)]
pub struct ApiDoc;
