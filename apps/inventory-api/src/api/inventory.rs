//! Product, stock ledger and report routes

use axum::Router;
use domain_inventory::{
    InventoryService, PgInventoryRepository, ProductService, ReportService, handlers,
};

use crate::state::AppState;

pub fn products_router(state: &AppState) -> Router {
    let repository = PgInventoryRepository::new(state.db.clone());
    handlers::products::router(ProductService::new(repository))
}

pub fn inventories_router(state: &AppState) -> Router {
    let repository = PgInventoryRepository::new(state.db.clone());
    handlers::inventory::router(InventoryService::new(repository.clone(), repository))
}

pub fn reports_router(state: &AppState) -> Router {
    let repository = PgInventoryRepository::new(state.db.clone());
    handlers::reports::router(ReportService::new(repository))
}
