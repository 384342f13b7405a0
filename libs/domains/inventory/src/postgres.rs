use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::{Expr, ExprTrait, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use crate::{
    entity::{inventory_transactions, products},
    error::{InventoryError, InventoryResult},
    models::{
        CreateProduct, InventoryTransaction, Product, ProductQuery, SortField, StockMovement,
        TransactionType, UpdateProduct,
    },
    repository::{ProductRepository, TransactionRepository},
};

/// PostgreSQL implementation of the product and ledger repositories
#[derive(Debug, Clone)]
pub struct PgInventoryRepository {
    db: DatabaseConnection,
}

impl PgInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations on `products.name` surface as `DuplicateName`
fn name_conflict(err: DbErr, name: &str) -> InventoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            InventoryError::DuplicateName(name.to_string())
        }
        _ => InventoryError::Database(err),
    }
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn sort_column(field: SortField) -> products::Column {
    match field {
        SortField::Name => products::Column::Name,
        SortField::Category => products::Column::Category,
        SortField::UnitPrice => products::Column::UnitPrice,
        SortField::QuantityInStock => products::Column::QuantityInStock,
        SortField::ReorderLevel => products::Column::ReorderLevel,
    }
}

#[async_trait]
impl ProductRepository for PgInventoryRepository {
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product> {
        if self.get_by_name(&input.name).await?.is_some() {
            return Err(InventoryError::DuplicateName(input.name));
        }

        let name = input.name.clone();
        let active_model: products::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| name_conflict(e, &name))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<Product>> {
        let model = products::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> InventoryResult<Option<Product>> {
        let model = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_low_stock(&self) -> InventoryResult<Vec<Product>> {
        let models = products::Entity::find()
            .filter(
                Expr::col(products::Column::QuantityInStock)
                    .lte(Expr::col(products::Column::ReorderLevel)),
            )
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> InventoryResult<Product> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))?;

        let name_taken = products::Entity::find()
            .filter(products::Column::Name.eq(input.name.as_str()))
            .filter(products::Column::Id.ne(id))
            .one(&self.db)
            .await?
            .is_some();
        if name_taken {
            return Err(InventoryError::DuplicateName(input.name));
        }

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model = products::ActiveModel {
            id: Unchanged(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            category: Set(product.category.clone()),
            unit_price: Set(product.unit_price),
            reorder_level: Set(product.reorder_level),
            updated_at: Set(product.updated_at.map(Into::into)),
            ..Default::default()
        };
        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| name_conflict(e, &product.name))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> InventoryResult<bool> {
        let result = products::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn search(&self, query: ProductQuery) -> InventoryResult<(Vec<Product>, u64)> {
        let mut select = products::Entity::find();

        if let Some(term) = &query.search_term {
            let pattern = escape_like(term);
            select = select.filter(
                Condition::any()
                    .add(products::Column::Name.contains(&pattern))
                    .add(products::Column::Description.contains(&pattern)),
            );
        }

        if let Some(category) = &query.category {
            select = select.filter(products::Column::Category.eq(category.as_str()));
        }

        let total = select.clone().count(&self.db).await?;

        let order = if query.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let models = select
            .order_by(sort_column(query.sort_by), order)
            .order_by_asc(products::Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }
}

#[async_trait]
impl TransactionRepository for PgInventoryRepository {
    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<InventoryTransaction>> {
        let model = inventory_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_product(&self, product_id: i32) -> InventoryResult<Vec<InventoryTransaction>> {
        let models = inventory_transactions::Entity::find()
            .filter(inventory_transactions::Column::ProductId.eq(product_id))
            .order_by_desc(inventory_transactions::Column::TransactionDate)
            .order_by_desc(inventory_transactions::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn record_movement(
        &self,
        product_id: i32,
        kind: TransactionType,
        quantity: i32,
        notes: String,
    ) -> InventoryResult<StockMovement> {
        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;

        let model = products::Entity::find_by_id(product_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id))?;

        let mut product: Product = model.into();
        product.apply_movement(kind, quantity)?;

        let updated = products::ActiveModel {
            id: Unchanged(product_id),
            quantity_in_stock: Set(product.quantity_in_stock),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        let entry = inventory_transactions::ActiveModel::new_entry(product_id, kind, quantity, notes)
            .insert(&txn)
            .await?;

        txn.commit().await?;

        Ok(StockMovement {
            product: updated.into(),
            transaction: entry.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_sort_column() {
        assert!(matches!(
            sort_column(SortField::UnitPrice),
            products::Column::UnitPrice
        ));
        assert!(matches!(
            sort_column(SortField::Name),
            products::Column::Name
        ));
    }
}
