use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    InventoryValuation, PagedResult, Product, ProductQuery, SearchProductsRequest,
};
use crate::repository::ProductRepository;

/// Read-only reporting over the catalog
#[derive(Clone)]
pub struct ReportService<P: ProductRepository> {
    repository: Arc<P>,
}

impl<P: ProductRepository> ReportService<P> {
    pub fn new(repository: P) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn inventory_valuation(&self) -> InventoryResult<InventoryValuation> {
        let products = self.repository.list().await?;
        Ok(InventoryValuation::from_products(&products))
    }

    /// Products with quantity in stock at or below their reorder level
    #[instrument(skip(self))]
    pub async fn low_stock_products(&self) -> InventoryResult<Vec<Product>> {
        self.repository.list_low_stock().await
    }

    #[instrument(skip(self, request), fields(page = request.page_number, size = request.page_size))]
    pub async fn search_products(
        &self,
        request: SearchProductsRequest,
    ) -> InventoryResult<PagedResult<Product>> {
        request
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        let query = ProductQuery::from(&request);
        let (items, total) = self.repository.search(query).await?;

        Ok(PagedResult::new(
            items,
            total,
            request.page_number,
            request.page_size,
        ))
    }
}
