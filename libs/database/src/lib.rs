//! PostgreSQL connectivity for the inventory services.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::{Backoff, postgres::{self, PostgresConfig}};
//! use migration::Migrator;
//!
//! let db = postgres::connect_with_backoff(PostgresConfig::from_env()?, Backoff::default()).await?;
//! postgres::run_migrations::<Migrator>(&db, "inventory_api").await?;
//! ```

pub mod backoff;
mod error;
pub mod postgres;

pub use backoff::Backoff;
pub use error::{DatabaseError, DatabaseResult};
