pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_products;
mod m20261001_000002_create_inventory_transactions;
mod m20261001_000003_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_products::Migration),
            Box::new(m20261001_000002_create_inventory_transactions::Migration),
            Box::new(m20261001_000003_create_users::Migration),
        ]
    }
}
