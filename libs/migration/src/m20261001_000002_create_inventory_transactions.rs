use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000001_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryTransactions::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryTransactions::Id))
                    .col(integer(InventoryTransactions::ProductId))
                    .col(string_len(InventoryTransactions::TransactionType, 20))
                    .col(integer(InventoryTransactions::Quantity))
                    .col(
                        timestamp_with_time_zone(InventoryTransactions::TransactionDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len(InventoryTransactions::Notes, 500).default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_transactions_product")
                            .from(
                                InventoryTransactions::Table,
                                InventoryTransactions::ProductId,
                            )
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_transactions_product_id")
                    .table(InventoryTransactions::Table)
                    .col(InventoryTransactions::ProductId)
                    .col(InventoryTransactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE inventory_transactions
                    ADD CONSTRAINT ck_inventory_transactions_quantity_positive CHECK (quantity > 0),
                    ADD CONSTRAINT ck_inventory_transactions_type
                        CHECK (transaction_type IN ('Addition', 'Withdrawal'))
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryTransactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InventoryTransactions {
    Table,
    Id,
    ProductId,
    TransactionType,
    Quantity,
    TransactionDate,
    Notes,
}
