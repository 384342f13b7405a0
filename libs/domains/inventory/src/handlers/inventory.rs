use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InventoryResult;
use crate::models::{
    InventoryTransaction, StockMovement, StockOperation, TransactionHistoryItem, TransactionType,
};
use crate::repository::{ProductRepository, TransactionRepository};
use crate::service::InventoryService;

const TAG: &str = "Inventory";

#[derive(OpenApi)]
#[openapi(
    paths(add_stock, withdraw_stock, transaction_history),
    components(
        schemas(
            StockOperation,
            StockMovement,
            InventoryTransaction,
            TransactionHistoryItem,
            TransactionType
        ),
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
pub struct InventoryApiDoc;

/// Create the stock ledger router
pub fn router<P, T>(service: InventoryService<P, T>) -> Router
where
    P: ProductRepository + 'static,
    T: TransactionRepository + 'static,
{
    Router::new()
        .route("/add-stock", post(add_stock))
        .route("/withdraw-stock", post(withdraw_stock))
        .route("/transactions/{id}", get(transaction_history))
        .with_state(Arc::new(service))
}

/// Add stock to a product and record an Addition
#[utoipa::path(
    post,
    path = "/add-stock",
    tag = TAG,
    request_body = StockOperation,
    responses(
        (status = 201, description = "Stock added successfully", body = ApiResponse<StockMovement>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_stock<P: ProductRepository, T: TransactionRepository>(
    State(service): State<Arc<InventoryService<P, T>>>,
    ValidatedJson(operation): ValidatedJson<StockOperation>,
) -> InventoryResult<ApiResponse<StockMovement>> {
    let movement = service.add_stock(operation).await?;
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        Some(movement),
        "Stock added successfully",
    ))
}

/// Withdraw stock from a product and record a Withdrawal
#[utoipa::path(
    post,
    path = "/withdraw-stock",
    tag = TAG,
    request_body = StockOperation,
    responses(
        (status = 201, description = "Stock withdrawn successfully", body = ApiResponse<StockMovement>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn withdraw_stock<P: ProductRepository, T: TransactionRepository>(
    State(service): State<Arc<InventoryService<P, T>>>,
    ValidatedJson(operation): ValidatedJson<StockOperation>,
) -> InventoryResult<ApiResponse<StockMovement>> {
    let movement = service.withdraw_stock(operation).await?;
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        Some(movement),
        "Stock withdrawn successfully",
    ))
}

/// Transaction history of a product, newest first
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Transaction history retrieved successfully", body = ApiResponse<Vec<TransactionHistoryItem>>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn transaction_history<P: ProductRepository, T: TransactionRepository>(
    State(service): State<Arc<InventoryService<P, T>>>,
    IdPath(product_id): IdPath,
) -> InventoryResult<ApiResponse<Vec<TransactionHistoryItem>>> {
    let history = service.transaction_history(product_id).await?;
    Ok(ApiResponse::ok(
        history,
        "Transaction history retrieved successfully",
    ))
}
