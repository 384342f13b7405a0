//! SeaORM entities for the inventory tables

pub mod inventory_transactions;
pub mod products;
