//! Inventory Domain
//!
//! Product catalog, the stock ledger (add/withdraw stock with an append-only
//! transaction log) and read-side reports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /products, /inventories, /reports
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← ProductService, InventoryService, ReportService
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository + TransactionRepository
//! └──────┬──────┘     (in-memory store, PostgreSQL)
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, InventoryTransaction, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     handlers, InMemoryInventoryStore, InventoryService, ProductService, ReportService,
//! };
//!
//! let store = InMemoryInventoryStore::new();
//!
//! let router = axum::Router::new()
//!     .nest("/products", handlers::products::router(ProductService::new(store.clone())))
//!     .nest(
//!         "/inventories",
//!         handlers::inventory::router(InventoryService::new(store.clone(), store.clone())),
//!     )
//!     .nest("/reports", handlers::reports::router(ReportService::new(store)));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{InventoryError, InventoryResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, InventoryTransaction, InventoryValuation, PagedResult, Product,
    ProductQuery, ProductValuation, SearchProductsRequest, SortField, StockMovement,
    StockOperation, TransactionHistoryItem, TransactionType, UpdateProduct,
};
pub use postgres::PgInventoryRepository;
pub use repository::{InMemoryInventoryStore, ProductRepository, TransactionRepository};
pub use service::{InventoryService, ProductService, ReportService};
