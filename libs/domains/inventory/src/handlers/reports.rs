use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InventoryResult;
use crate::models::{
    InventoryValuation, PagedResult, Product, ProductValuation, SearchProductsRequest,
};
use crate::repository::ProductRepository;
use crate::service::ReportService;

const TAG: &str = "Reports";

#[derive(OpenApi)]
#[openapi(
    paths(inventory_valuation, low_stock, search_products),
    components(
        schemas(
            InventoryValuation,
            ProductValuation,
            SearchProductsRequest,
            PagedResult<Product>
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    )
)]
pub struct ReportsApiDoc;

/// Create the reporting router
pub fn router<P: ProductRepository + 'static>(service: ReportService<P>) -> Router {
    Router::new()
        .route("/inventory-valuation", get(inventory_valuation))
        .route("/low-stock", get(low_stock))
        .route("/search-products", post(search_products))
        .with_state(Arc::new(service))
}

/// Stock value per product and for the whole catalog
#[utoipa::path(
    get,
    path = "/inventory-valuation",
    tag = TAG,
    responses(
        (status = 200, description = "Inventory valuation retrieved successfully", body = ApiResponse<InventoryValuation>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn inventory_valuation<P: ProductRepository>(
    State(service): State<Arc<ReportService<P>>>,
) -> InventoryResult<ApiResponse<InventoryValuation>> {
    let valuation = service.inventory_valuation().await?;
    Ok(ApiResponse::ok(
        valuation,
        "Inventory valuation retrieved successfully",
    ))
}

/// Products at or below their reorder level
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = TAG,
    responses(
        (status = 200, description = "Low stock products retrieved successfully", body = ApiResponse<Vec<Product>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn low_stock<P: ProductRepository>(
    State(service): State<Arc<ReportService<P>>>,
) -> InventoryResult<ApiResponse<Vec<Product>>> {
    let products = service.low_stock_products().await?;
    Ok(ApiResponse::ok(
        products,
        "Low stock products retrieved successfully",
    ))
}

/// Search, filter, sort and paginate products
#[utoipa::path(
    post,
    path = "/search-products",
    tag = TAG,
    request_body = SearchProductsRequest,
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<PagedResult<Product>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<P: ProductRepository>(
    State(service): State<Arc<ReportService<P>>>,
    ValidatedJson(request): ValidatedJson<SearchProductsRequest>,
) -> InventoryResult<ApiResponse<PagedResult<Product>>> {
    let page = service.search_products(request).await?;
    Ok(ApiResponse::ok(page, "Products retrieved successfully"))
}
