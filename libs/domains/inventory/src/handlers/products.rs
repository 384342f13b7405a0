use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{
    ApiResponse, EmptyApiResponse, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InventoryResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "Products";

#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(Product, CreateProduct, UpdateProduct, EmptyApiResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    )
)]
pub struct ProductsApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<P: ProductRepository + 'static>(service: ProductService<P>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<Product>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository>(
    State(service): State<Arc<ProductService<P>>>,
) -> InventoryResult<ApiResponse<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(ApiResponse::ok(products, "Products retrieved successfully"))
}

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product added successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository>(
    State(service): State<Arc<ProductService<P>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> InventoryResult<ApiResponse<Product>> {
    let product = service.create_product(input).await?;
    Ok(ApiResponse::created(product, "Product added successfully"))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository>(
    State(service): State<Arc<ProductService<P>>>,
    IdPath(id): IdPath,
) -> InventoryResult<ApiResponse<Product>> {
    let product = service.get_product(id).await?;
    Ok(ApiResponse::ok(product, "Product retrieved successfully"))
}

/// Replace a product's catalog fields; stock is unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository>(
    State(service): State<Arc<ProductService<P>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> InventoryResult<ApiResponse<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(ApiResponse::ok(product, "Product updated successfully"))
}

/// Delete a product and its transaction history
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = EmptyApiResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository>(
    State(service): State<Arc<ProductService<P>>>,
    IdPath(id): IdPath,
) -> InventoryResult<ApiResponse<()>> {
    service.delete_product(id).await?;
    Ok(ApiResponse::message_only(
        StatusCode::OK,
        "Product deleted successfully",
    ))
}
