use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{StockMovement, StockOperation, TransactionHistoryItem, TransactionType};
use crate::repository::{ProductRepository, TransactionRepository};

/// Stock ledger: add/withdraw stock and read transaction history
#[derive(Clone)]
pub struct InventoryService<P: ProductRepository, T: TransactionRepository> {
    products: Arc<P>,
    transactions: Arc<T>,
}

impl<P: ProductRepository, T: TransactionRepository> InventoryService<P, T> {
    pub fn new(products: P, transactions: T) -> Self {
        Self {
            products: Arc::new(products),
            transactions: Arc::new(transactions),
        }
    }

    #[instrument(skip(self, operation), fields(product_id = operation.product_id, quantity = operation.quantity))]
    pub async fn add_stock(&self, operation: StockOperation) -> InventoryResult<StockMovement> {
        self.apply(operation, TransactionType::Addition).await
    }

    #[instrument(skip(self, operation), fields(product_id = operation.product_id, quantity = operation.quantity))]
    pub async fn withdraw_stock(&self, operation: StockOperation) -> InventoryResult<StockMovement> {
        self.apply(operation, TransactionType::Withdrawal).await
    }

    /// Ledger entries for a product, newest first
    #[instrument(skip(self))]
    pub async fn transaction_history(
        &self,
        product_id: i32,
    ) -> InventoryResult<Vec<TransactionHistoryItem>> {
        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id))?;

        let entries = self.transactions.list_by_product(product_id).await?;

        Ok(entries
            .into_iter()
            .map(|entry| TransactionHistoryItem::new(entry, &product.name))
            .collect())
    }

    async fn apply(
        &self,
        operation: StockOperation,
        kind: TransactionType,
    ) -> InventoryResult<StockMovement> {
        if operation.quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(operation.quantity));
        }
        operation
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        let movement = self
            .transactions
            .record_movement(
                operation.product_id,
                kind,
                operation.quantity,
                operation.notes.unwrap_or_default(),
            )
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    product_id = operation.product_id,
                    transaction_type = %kind,
                    error = %e,
                    "Stock movement rejected"
                )
            })?;

        tracing::info!(
            product_id = movement.product.id,
            transaction_id = movement.transaction.id,
            transaction_type = %kind,
            quantity = operation.quantity,
            quantity_in_stock = movement.product.quantity_in_stock,
            low_stock = movement.product.is_low_stock(),
            "inventory stock changed"
        );

        Ok(movement)
    }
}
