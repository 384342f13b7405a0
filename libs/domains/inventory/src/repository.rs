use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateProduct, InventoryTransaction, Product, ProductQuery, StockMovement, TransactionType,
    UpdateProduct,
};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product; fails with `DuplicateName` if the name is taken
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product>;

    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<Product>>;

    /// Exact, case-sensitive name lookup
    async fn get_by_name(&self, name: &str) -> InventoryResult<Option<Product>>;

    /// All products ordered by id
    async fn list(&self) -> InventoryResult<Vec<Product>>;

    /// Products with quantity in stock at or below their reorder level, ordered by id
    async fn list_low_stock(&self) -> InventoryResult<Vec<Product>>;

    /// Replace catalog fields; quantity in stock is left as is
    async fn update(&self, id: i32, input: UpdateProduct) -> InventoryResult<Product>;

    /// Delete a product and its ledger entries
    async fn delete(&self, id: i32) -> InventoryResult<bool>;

    /// One page of matching products and the total number of matches
    async fn search(&self, query: ProductQuery) -> InventoryResult<(Vec<Product>, u64)>;
}

/// Repository trait for the stock ledger
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<InventoryTransaction>>;

    /// Ledger entries for a product, newest first
    async fn list_by_product(&self, product_id: i32) -> InventoryResult<Vec<InventoryTransaction>>;

    /// Apply a stock change and append its ledger entry as one atomic unit.
    ///
    /// Concurrent movements on the same product are serialized. On any error
    /// neither the product nor the ledger changes.
    async fn record_movement(
        &self,
        product_id: i32,
        kind: TransactionType,
        quantity: i32,
        notes: String,
    ) -> InventoryResult<StockMovement>;
}

#[derive(Debug, Default)]
struct StoreState {
    products: BTreeMap<i32, Product>,
    transactions: BTreeMap<i32, InventoryTransaction>,
    next_product_id: i32,
    next_transaction_id: i32,
}

impl StoreState {
    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.products
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

/// In-memory implementation of both inventory repositories (for development/testing)
///
/// Products and ledger share one lock, so a stock movement is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryInventoryStore {
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product> {
        let mut state = self.state.write().await;

        if state.name_taken(&input.name, None) {
            return Err(InventoryError::DuplicateName(input.name));
        }

        state.next_product_id += 1;
        let product = Product {
            id: state.next_product_id,
            name: input.name,
            description: input.description,
            category: input.category,
            unit_price: input.unit_price,
            quantity_in_stock: input.quantity_in_stock,
            reorder_level: input.reorder_level,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> InventoryResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().find(|p| p.name == name).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn list_low_stock(&self) -> InventoryResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> InventoryResult<Product> {
        let mut state = self.state.write().await;

        if !state.products.contains_key(&id) {
            return Err(InventoryError::ProductNotFound(id));
        }
        if state.name_taken(&input.name, Some(id)) {
            return Err(InventoryError::DuplicateName(input.name));
        }

        let product = state
            .products
            .get_mut(&id)
            .ok_or(InventoryError::ProductNotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> InventoryResult<bool> {
        let mut state = self.state.write().await;

        if state.products.remove(&id).is_none() {
            return Ok(false);
        }
        state.transactions.retain(|_, t| t.product_id != id);

        tracing::info!(product_id = id, "Deleted product");
        Ok(true)
    }

    async fn search(&self, query: ProductQuery) -> InventoryResult<(Vec<Product>, u64)> {
        let state = self.state.read().await;

        let mut matches: Vec<&Product> = state
            .products
            .values()
            .filter(|p| query.matches(p))
            .collect();
        matches.sort_by(|a, b| query.compare(a, b));

        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, total))
    }
}

#[async_trait]
impl TransactionRepository for InMemoryInventoryStore {
    async fn get_by_id(&self, id: i32) -> InventoryResult<Option<InventoryTransaction>> {
        let state = self.state.read().await;
        Ok(state.transactions.get(&id).cloned())
    }

    async fn list_by_product(&self, product_id: i32) -> InventoryResult<Vec<InventoryTransaction>> {
        let state = self.state.read().await;

        let mut entries: Vec<InventoryTransaction> = state
            .transactions
            .values()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.id.cmp(&a.id))
        });

        Ok(entries)
    }

    async fn record_movement(
        &self,
        product_id: i32,
        kind: TransactionType,
        quantity: i32,
        notes: String,
    ) -> InventoryResult<StockMovement> {
        let mut state = self.state.write().await;

        let mut product = state
            .products
            .get(&product_id)
            .cloned()
            .ok_or(InventoryError::ProductNotFound(product_id))?;
        product.apply_movement(kind, quantity)?;

        state.next_transaction_id += 1;
        let transaction = InventoryTransaction {
            id: state.next_transaction_id,
            product_id,
            transaction_type: kind,
            quantity,
            transaction_date: Utc::now(),
            notes,
        };

        state.products.insert(product_id, product.clone());
        state.transactions.insert(transaction.id, transaction.clone());

        Ok(StockMovement {
            product,
            transaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn widget(name: &str, quantity: i32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: String::new(),
            category: "Tools".to_string(),
            unit_price: dec!(2.00),
            quantity_in_stock: quantity,
            reorder_level: 5,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryInventoryStore::new();
        let a = store.create(widget("a", 1)).await.unwrap();
        let b = store.create(widget("b", 1)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_error() {
        let store = InMemoryInventoryStore::new();
        store.create(widget("Widget", 1)).await.unwrap();

        let result = store.create(widget("Widget", 2)).await;
        assert!(matches!(result, Err(InventoryError::DuplicateName(_))));

        // names are case-sensitive
        assert!(store.create(widget("widget", 2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_product() {
        let store = InMemoryInventoryStore::new();
        let a = store.create(widget("a", 1)).await.unwrap();
        store.create(widget("b", 1)).await.unwrap();

        let update = |name: &str| UpdateProduct {
            name: name.to_string(),
            description: String::new(),
            category: String::new(),
            unit_price: dec!(1),
            reorder_level: 0,
        };

        let result = ProductRepository::update(&store, a.id, update("b")).await;
        assert!(matches!(result, Err(InventoryError::DuplicateName(_))));

        // keeping its own name is fine
        let updated = ProductRepository::update(&store, a.id, update("a")).await.unwrap();
        assert_eq!(updated.quantity_in_stock, 1);

        let missing = ProductRepository::update(&store, 99, update("c")).await;
        assert!(matches!(missing, Err(InventoryError::ProductNotFound(99))));
    }

    #[tokio::test]
    async fn test_record_movement_appends_ledger() {
        let store = InMemoryInventoryStore::new();
        let product = store.create(widget("Widget", 10)).await.unwrap();

        let movement = store
            .record_movement(product.id, TransactionType::Withdrawal, 4, "sale".into())
            .await
            .unwrap();
        assert_eq!(movement.product.quantity_in_stock, 6);
        assert_eq!(movement.transaction.quantity, 4);

        let stored = ProductRepository::get_by_id(&store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.quantity_in_stock, 6);

        let tx = TransactionRepository::get_by_id(&store, movement.transaction.id)
            .await
            .unwrap();
        assert_eq!(tx, Some(movement.transaction));
    }

    #[tokio::test]
    async fn test_failed_movement_changes_nothing() {
        let store = InMemoryInventoryStore::new();
        let product = store.create(widget("Widget", 2)).await.unwrap();

        let result = store
            .record_movement(product.id, TransactionType::Withdrawal, 3, String::new())
            .await;
        assert!(matches!(
            result,
            Err(InventoryError::InsufficientStock { .. })
        ));

        let stored = ProductRepository::get_by_id(&store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.quantity_in_stock, 2);
        assert!(store.list_by_product(product.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_withdrawals_never_oversell() {
        let store = InMemoryInventoryStore::new();
        let product = store.create(widget("Widget", 10)).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .record_movement(product.id, TransactionType::Withdrawal, 1, String::new())
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 10);
        let stored = ProductRepository::get_by_id(&store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.quantity_in_stock, 0);
        assert_eq!(store.list_by_product(product.id).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_delete_cascades_ledger() {
        let store = InMemoryInventoryStore::new();
        let product = store.create(widget("Widget", 1)).await.unwrap();
        store
            .record_movement(product.id, TransactionType::Addition, 1, String::new())
            .await
            .unwrap();

        assert!(store.delete(product.id).await.unwrap());
        assert!(!store.delete(product.id).await.unwrap());
        assert!(store.list_by_product(product.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_inclusive() {
        let store = InMemoryInventoryStore::new();
        store.create(widget("at", 5)).await.unwrap();
        store.create(widget("below", 4)).await.unwrap();
        store.create(widget("above", 6)).await.unwrap();

        let low: Vec<String> = store
            .list_low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(low, vec!["at", "below"]);
    }
}
