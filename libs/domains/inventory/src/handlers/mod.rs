//! HTTP endpoints for products, stock movements and reports

pub mod inventory;
pub mod products;
pub mod reports;

use utoipa::OpenApi;

/// OpenAPI documentation for the inventory domain
#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/products", api = products::ProductsApiDoc),
        (path = "/inventories", api = inventory::InventoryApiDoc),
        (path = "/reports", api = reports::ReportsApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog management"),
        (name = "Inventory", description = "Stock movements and transaction history"),
        (name = "Reports", description = "Valuation, low stock and product search")
    )
)]
pub struct ApiDoc;
