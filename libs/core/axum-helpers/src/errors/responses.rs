//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "error": "Error in getting the recipe: not found" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed payload or path parameter",
    content_type = "application/json",
    example = json!({ "error": "Invalid request payload JSON format" })
)]
pub struct BadRequestResponse(pub ErrorResponse);
