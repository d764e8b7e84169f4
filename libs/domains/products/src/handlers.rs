//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Checked, DataBody,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    AvailabilityBody, AvailabilityRequest, CreateProduct, Product, ProductIdParam, ReplaceProduct,
    ReplaceProductRequest,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Body returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Product deleted";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        change_availability,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, ReplaceProduct, AvailabilityBody),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(change_availability)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products, ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = DataBody<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DataBody<Vec<Product>>>> {
    let products = service.list_products().await?;
    Ok(Json(DataBody::new(products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = DataBody<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Checked(input): Checked<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(DataBody::new(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = DataBody<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Checked(ProductIdParam { id }): Checked<ProductIdParam>,
) -> ProductResult<Json<DataBody<Product>>> {
    let product = service.get_product(id).await?;
    Ok(Json(DataBody::new(product)))
}

/// Replace every editable field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ReplaceProduct,
    responses(
        (status = 200, description = "Product replaced", body = DataBody<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Checked(request): Checked<ReplaceProductRequest>,
) -> ProductResult<Json<DataBody<Product>>> {
    let (id, input) = request.into_parts();
    let product = service.replace_product(id, input).await?;
    Ok(Json(DataBody::new(product)))
}

/// Toggle availability, or set it when the body carries a value
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body(content = Option<AvailabilityBody>, description = "Omit to toggle"),
    responses(
        (status = 200, description = "Availability changed", body = DataBody<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Checked(request): Checked<AvailabilityRequest>,
) -> ProductResult<Json<DataBody<Product>>> {
    let product = service
        .change_availability(request.id, request.availability.into())
        .await?;
    Ok(Json(DataBody::new(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DataBody<String>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Checked(ProductIdParam { id }): Checked<ProductIdParam>,
) -> ProductResult<Json<DataBody<&'static str>>> {
    service.delete_product(id).await?;
    Ok(Json(DataBody::new(DELETED_MESSAGE)))
}
