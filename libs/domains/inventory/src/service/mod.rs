//! Business logic on top of the inventory repositories

mod inventory;
mod product;
mod report;

pub use inventory::InventoryService;
pub use product::ProductService;
pub use report::ReportService;
