//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use crate::envelope::ErrorMessageBody;
use crate::validation::ValidationErrorsBody;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "STORE_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one entry per failed field rule",
    content_type = "application/json",
    example = json!({
        "errors": [
            {"field": "name", "message": "the product name cannot be empty."},
            {"field": "price", "message": "the price cannot be negative."}
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorsBody);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"error": "Product not found"})
)]
pub struct NotFoundResponse(pub ErrorMessageBody);
