use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Name, 100))
                    .col(string_len(Products::Description, 500).default(""))
                    .col(string_len(Products::Category, 100).default(""))
                    .col(decimal_len(Products::UnitPrice, 18, 2))
                    .col(integer(Products::QuantityInStock).default(0))
                    .col(integer(Products::ReorderLevel).default(0))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Products::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Product names are unique (exact match)
        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT ck_products_quantity_non_negative CHECK (quantity_in_stock >= 0),
                    ADD CONSTRAINT ck_products_reorder_non_negative CHECK (reorder_level >= 0),
                    ADD CONSTRAINT ck_products_unit_price_positive CHECK (unit_price > 0)
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Name,
    Description,
    Category,
    UnitPrice,
    QuantityInStock,
    ReorderLevel,
    CreatedAt,
    UpdatedAt,
}
