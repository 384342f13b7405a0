use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for the product catalog
#[derive(Clone)]
pub struct ProductService<P: ProductRepository> {
    repository: Arc<P>,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(repository: P) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product; names are unique (exact, case-sensitive)
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> InventoryResult<Product> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        if self.repository.get_by_name(&input.name).await?.is_some() {
            return Err(InventoryError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self), fields(product_id = id))]
    pub async fn get_product(&self, id: i32) -> InventoryResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))
    }

    /// All products ordered by id
    pub async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Replace catalog fields; stock only changes through the ledger
    #[instrument(skip(self, input), fields(product_id = id))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> InventoryResult<Product> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(product_id = id))]
    pub async fn delete_product(&self, id: i32) -> InventoryResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(InventoryError::ProductNotFound(id));
        }

        Ok(())
    }
}
