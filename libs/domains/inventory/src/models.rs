use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};

/// Largest page a search may request
pub const MAX_PAGE_SIZE: u64 = 100;

/// Highest page index a search may request; keeps the row offset well inside `i64`
pub const MAX_PAGE_NUMBER: u64 = 1_000_000;

fn validate_unit_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(validator::ValidationError::new("unit_price_not_positive")
            .with_message("Unit price must be greater than zero".into()));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Name must not be blank".into()));
    }
    Ok(())
}

/// Catalog record with price and stock count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    /// Unique product name
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price of one unit, always greater than zero
    #[schema(value_type = f64, example = 19.99)]
    pub unit_price: Decimal,
    /// Units currently on hand, never negative
    pub quantity_in_stock: i32,
    /// Threshold at or below which the product counts as low stock
    pub reorder_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Increase stock by `quantity`.
    pub fn add_stock(&mut self, quantity: i32) -> InventoryResult<()> {
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }

        self.quantity_in_stock = self
            .quantity_in_stock
            .checked_add(quantity)
            .ok_or_else(|| InventoryError::Validation("Stock quantity overflow".to_string()))?;
        Ok(())
    }

    /// Decrease stock by `quantity`; stock is left untouched on failure.
    pub fn withdraw_stock(&mut self, quantity: i32) -> InventoryResult<()> {
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }

        if quantity > self.quantity_in_stock {
            return Err(InventoryError::InsufficientStock {
                requested: quantity,
                available: self.quantity_in_stock,
            });
        }

        self.quantity_in_stock -= quantity;
        Ok(())
    }

    pub fn apply_movement(&mut self, kind: TransactionType, quantity: i32) -> InventoryResult<()> {
        match kind {
            TransactionType::Addition => self.add_stock(quantity),
            TransactionType::Withdrawal => self.withdraw_stock(quantity),
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock <= self.reorder_level
    }

    /// Quantity in stock times unit price
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity_in_stock) * self.unit_price
    }

    /// Apply catalog changes; stock quantity is never touched here
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.category = update.category;
        self.unit_price = update.unit_price;
        self.reorder_level = update.reorder_level;
        self.updated_at = Some(Utc::now());
    }
}

/// Input for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category cannot exceed 100 characters"))]
    pub category: String,
    #[schema(value_type = f64, example = 19.99)]
    #[validate(custom(function = "validate_unit_price"))]
    pub unit_price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity in stock cannot be negative"))]
    pub quantity_in_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Reorder level cannot be negative"))]
    pub reorder_level: i32,
}

/// Replacement catalog fields for an existing product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category cannot exceed 100 characters"))]
    pub category: String,
    #[schema(value_type = f64, example = 24.5)]
    #[validate(custom(function = "validate_unit_price"))]
    pub unit_price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "Reorder level cannot be negative"))]
    pub reorder_level: i32,
}

/// Kind of stock change recorded in the ledger
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TransactionType {
    #[sea_orm(string_value = "Addition")]
    Addition,
    #[sea_orm(string_value = "Withdrawal")]
    Withdrawal,
}

/// Immutable ledger entry for one stock change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTransaction {
    pub id: i32,
    pub product_id: i32,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: String,
}

/// Ledger entry joined with the name of its product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryItem {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: String,
}

impl TransactionHistoryItem {
    pub fn new(transaction: InventoryTransaction, product_name: &str) -> Self {
        Self {
            id: transaction.id,
            product_id: transaction.product_id,
            product_name: product_name.to_string(),
            transaction_type: transaction.transaction_type,
            quantity: transaction.quantity,
            transaction_date: transaction.transaction_date,
            notes: transaction.notes,
        }
    }
}

/// Request body for add-stock and withdraw-stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockOperation {
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

/// Stock change persisted by the ledger: the product after the change and the appended entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub product: Product,
    pub transaction: InventoryTransaction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductValuation {
    pub product_id: i32,
    pub name: String,
    pub quantity_in_stock: i32,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Catalog-wide stock valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryValuation {
    pub total_products: i64,
    pub total_items: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    pub products: Vec<ProductValuation>,
}

impl InventoryValuation {
    pub fn from_products(products: &[Product]) -> Self {
        let lines: Vec<ProductValuation> = products
            .iter()
            .map(|p| ProductValuation {
                product_id: p.id,
                name: p.name.clone(),
                quantity_in_stock: p.quantity_in_stock,
                unit_price: p.unit_price,
                total_value: p.stock_value(),
            })
            .collect();

        Self {
            total_products: lines.len() as i64,
            total_items: lines.iter().map(|l| i64::from(l.quantity_in_stock)).sum(),
            total_value: lines.iter().map(|l| l.total_value).sum(),
            products: lines,
        }
    }
}

/// Column a product search is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Category,
    UnitPrice,
    QuantityInStock,
    ReorderLevel,
}

impl SortField {
    /// Exact, case-sensitive key match; anything else sorts by name
    pub fn from_key(key: &str) -> Self {
        match key {
            "category" => Self::Category,
            "unitPrice" => Self::UnitPrice,
            "quantityInStock" => Self::QuantityInStock,
            "reorderLevel" => Self::ReorderLevel,
            _ => Self::Name,
        }
    }
}

/// Search, filter, sort and page through the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchProductsRequest {
    /// Case-sensitive substring of name or description; empty matches everything
    #[validate(length(max = 100))]
    pub search_term: String,
    /// Exact category; empty matches everything
    #[validate(length(max = 100))]
    pub category_name: String,
    /// 1-based page index
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "Page number must be between 1 and 1000000"
    ))]
    pub page_number: u64,
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: u64,
    /// One of `name`, `category`, `unitPrice`, `quantityInStock`, `reorderLevel`
    pub sort_by: String,
    pub sort_descending: bool,
}

impl Default for SearchProductsRequest {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category_name: String::new(),
            page_number: 1,
            page_size: 10,
            sort_by: "name".to_string(),
            sort_descending: false,
        }
    }
}

/// Normalized search handed to repositories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub sort_by: SortField,
    pub descending: bool,
    pub offset: u64,
    pub limit: u64,
}

impl From<&SearchProductsRequest> for ProductQuery {
    fn from(req: &SearchProductsRequest) -> Self {
        let page_number = req.page_number.clamp(1, MAX_PAGE_NUMBER);
        let page_size = req.page_size.clamp(1, MAX_PAGE_SIZE);

        Self {
            search_term: Some(req.search_term.clone()).filter(|s| !s.is_empty()),
            category: Some(req.category_name.clone()).filter(|s| !s.is_empty()),
            sort_by: SortField::from_key(&req.sort_by),
            descending: req.sort_descending,
            offset: (page_number - 1) * page_size,
            limit: page_size,
        }
    }
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let term_ok = self.search_term.as_deref().is_none_or(|term| {
            product.name.contains(term) || product.description.contains(term)
        });
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        term_ok && category_ok
    }

    /// Order by the sort field, then by id ascending
    pub fn compare(&self, a: &Product, b: &Product) -> std::cmp::Ordering {
        let primary = match self.sort_by {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Category => a.category.cmp(&b.category),
            SortField::UnitPrice => a.unit_price.cmp(&b.unit_price),
            SortField::QuantityInStock => a.quantity_in_stock.cmp(&b.quantity_in_stock),
            SortField::ReorderLevel => a.reorder_level.cmp(&b.reorder_level),
        };
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// One page of results plus the total match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page_number: u64, page_size: u64) -> Self {
        Self {
            items,
            total_count,
            page_number,
            page_size,
            has_next_page: page_number.saturating_mul(page_size) < total_count,
            has_previous_page: page_number > 1,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_product(id: i32, name: &str, quantity: i32, price: Decimal) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        category: String::new(),
        unit_price: price,
        quantity_in_stock: quantity,
        reorder_level: 0,
        created_at: Utc::now(),
        updated_at: None,
    }
}
