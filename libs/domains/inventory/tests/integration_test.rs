//! Integration tests for the inventory domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Queries and sorting work against the real schema
//! - The unique product name constraint is enforced
//! - Stock movements are atomic and never drive stock negative
//! - Deleting a product removes its ledger entries

use domain_inventory::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn product_input(name: String, quantity: i32, reorder_level: i32, price_cents: i64) -> CreateProduct {
    CreateProduct {
        name,
        description: "Integration test product".to_string(),
        category: "Hardware".to_string(),
        unit_price: Decimal::new(price_cents, 2),
        quantity_in_stock: quantity,
        reorder_level,
    }
}

// ============================================================================
// Product Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = product_input(builder.name("product", "main"), 10, 2, 1999);
    let created = ProductRepository::create(&repo, input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, input.name);
    assert_eq!(created.unit_price, input.unit_price);
    assert_eq!(created.quantity_in_stock, 10);
    assert!(created.updated_at.is_none());

    let retrieved = ProductRepository::get_by_id(&repo, created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved.name, created.name);
    assert_eq!(retrieved.unit_price, created.unit_price);

    let by_name = repo.get_by_name(&input.name).await.unwrap();
    assert_eq!(assert_some(by_name, "product by name").id, created.id);
}

#[tokio::test]
async fn test_duplicate_name_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_name");

    let name = builder.name("product", "dup");
    repo.create(product_input(name.clone(), 1, 0, 100))
        .await
        .unwrap();

    let result = repo.create(product_input(name, 5, 0, 200)).await;
    assert_err_matches(
        result,
        |e| matches!(e, InventoryError::DuplicateName(_)),
        "second create with the same name",
    );
}

#[tokio::test]
async fn test_update_product_keeps_stock() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_product");

    let created = repo
        .create(product_input(builder.name("product", "before"), 7, 1, 500))
        .await
        .unwrap();

    let update = UpdateProduct {
        name: builder.name("product", "after"),
        description: "Updated".to_string(),
        category: "Tools".to_string(),
        unit_price: Decimal::new(750, 2),
        reorder_level: 3,
    };
    let updated = ProductRepository::update(&repo, created.id, update.clone())
        .await
        .unwrap();

    assert_eq!(updated.name, update.name);
    assert_eq!(updated.category, "Tools");
    assert_eq!(updated.unit_price, Decimal::new(750, 2));
    assert_eq!(updated.quantity_in_stock, 7);
    assert!(updated.updated_at.is_some());

    let missing = ProductRepository::update(&repo, 999_999, update).await;
    assert_err_matches(
        missing,
        |e| matches!(e, InventoryError::ProductNotFound(999_999)),
        "update of a missing product",
    );
}

#[tokio::test]
async fn test_update_to_existing_name_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_conflict");

    let first = repo
        .create(product_input(builder.name("product", "a"), 1, 0, 100))
        .await
        .unwrap();
    let second = repo
        .create(product_input(builder.name("product", "b"), 1, 0, 100))
        .await
        .unwrap();

    let update = UpdateProduct {
        name: second.name.clone(),
        description: String::new(),
        category: String::new(),
        unit_price: Decimal::ONE,
        reorder_level: 0,
    };
    let result = ProductRepository::update(&repo, first.id, update).await;
    assert_err_matches(
        result,
        |e| matches!(e, InventoryError::DuplicateName(_)),
        "rename onto another product's name",
    );
}

#[tokio::test]
async fn test_list_and_low_stock() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("low_stock");

    let below = repo
        .create(product_input(builder.name("product", "below"), 1, 5, 100))
        .await
        .unwrap();
    let at = repo
        .create(product_input(builder.name("product", "at"), 5, 5, 100))
        .await
        .unwrap();
    let above = repo
        .create(product_input(builder.name("product", "above"), 6, 5, 100))
        .await
        .unwrap();

    let all = repo.list().await.unwrap();
    let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![below.id, at.id, above.id]);

    let low: Vec<i32> = repo
        .list_low_stock()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(low, vec![below.id, at.id]);
}

#[tokio::test]
async fn test_search_filters_sorts_and_pages() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());

    for i in 0..12 {
        let mut input = product_input(format!("Widget {:02}", i), i, 0, 100 + i64::from(i) * 100);
        if i % 2 == 0 {
            input.category = "Even".to_string();
        }
        repo.create(input).await.unwrap();
    }
    repo.create(product_input("Gadget".to_string(), 1, 0, 10000))
        .await
        .unwrap();

    let request = SearchProductsRequest {
        search_term: "Widget".to_string(),
        page_number: 2,
        page_size: 5,
        ..Default::default()
    };
    let (items, total) = repo.search(ProductQuery::from(&request)).await.unwrap();
    assert_eq!(total, 12);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Widget 05", "Widget 06", "Widget 07", "Widget 08", "Widget 09"]
    );

    let request = SearchProductsRequest {
        category_name: "Even".to_string(),
        sort_by: "unitPrice".to_string(),
        sort_descending: true,
        ..Default::default()
    };
    let (items, total) = repo.search(ProductQuery::from(&request)).await.unwrap();
    assert_eq!(total, 6);
    assert_eq!(items[0].name, "Widget 10");
    assert_eq!(items[5].name, "Widget 00");

    // Search is case-sensitive
    let request = SearchProductsRequest {
        search_term: "widget".to_string(),
        ..Default::default()
    };
    let (items, total) = repo.search(ProductQuery::from(&request)).await.unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());

    repo.create(product_input("50% off bin".to_string(), 1, 0, 100))
        .await
        .unwrap();
    repo.create(product_input("500 screws".to_string(), 1, 0, 100))
        .await
        .unwrap();

    let request = SearchProductsRequest {
        search_term: "50%".to_string(),
        ..Default::default()
    };
    let (items, total) = repo.search(ProductQuery::from(&request)).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "50% off bin");
}

// ============================================================================
// Ledger Tests
// ============================================================================

#[tokio::test]
async fn test_record_movement_updates_stock_and_ledger() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("record_movement");

    let product = repo
        .create(product_input(builder.name("product", "ledger"), 10, 0, 250))
        .await
        .unwrap();

    let added = repo
        .record_movement(product.id, TransactionType::Addition, 5, "restock".to_string())
        .await
        .unwrap();
    assert_eq!(added.product.quantity_in_stock, 15);
    assert_eq!(added.transaction.transaction_type, TransactionType::Addition);
    assert_eq!(added.transaction.notes, "restock");

    let withdrawn = repo
        .record_movement(product.id, TransactionType::Withdrawal, 15, String::new())
        .await
        .unwrap();
    assert_eq!(withdrawn.product.quantity_in_stock, 0);

    let history = repo.list_by_product(product.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, withdrawn.transaction.id);
    assert_eq!(history[1].id, added.transaction.id);

    let entry = TransactionRepository::get_by_id(&repo, added.transaction.id)
        .await
        .unwrap();
    assert_eq!(assert_some(entry, "ledger entry").quantity, 5);
}

#[tokio::test]
async fn test_rejected_withdrawal_rolls_back() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("rejected_withdrawal");

    let product = repo
        .create(product_input(builder.name("product", "short"), 3, 0, 100))
        .await
        .unwrap();

    let result = repo
        .record_movement(product.id, TransactionType::Withdrawal, 4, String::new())
        .await;
    assert_err_matches(
        result,
        |e| {
            matches!(
                e,
                InventoryError::InsufficientStock {
                    requested: 4,
                    available: 3
                }
            )
        },
        "withdrawal beyond stock",
    );

    let after = ProductRepository::get_by_id(&repo, product.id).await.unwrap();
    assert_eq!(assert_some(after, "product").quantity_in_stock, 3);
    assert!(repo.list_by_product(product.id).await.unwrap().is_empty());

    let missing = repo
        .record_movement(999_999, TransactionType::Addition, 1, String::new())
        .await;
    assert_err_matches(
        missing,
        |e| matches!(e, InventoryError::ProductNotFound(999_999)),
        "movement on a missing product",
    );
}

#[tokio::test]
async fn test_concurrent_withdrawals_never_oversell() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("concurrent_withdrawals");

    let product = repo
        .create(product_input(builder.name("product", "hot"), 10, 0, 100))
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..20 {
        let repo_clone = PgInventoryRepository::new(db.connection());
        let product_id = product.id;
        handles.push(tokio::spawn(async move {
            repo_clone
                .record_movement(product_id, TransactionType::Withdrawal, 1, String::new())
                .await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 10);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, InventoryError::InsufficientStock { .. }))
    );

    let after = ProductRepository::get_by_id(&repo, product.id).await.unwrap();
    assert_eq!(assert_some(after, "product").quantity_in_stock, 0);
    assert_eq!(repo.list_by_product(product.id).await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_delete_cascades_to_ledger() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_cascade");

    let product = repo
        .create(product_input(builder.name("product", "gone"), 1, 0, 100))
        .await
        .unwrap();
    let movement = repo
        .record_movement(product.id, TransactionType::Addition, 2, String::new())
        .await
        .unwrap();

    assert!(repo.delete(product.id).await.unwrap());
    assert!(!repo.delete(product.id).await.unwrap());

    let entry = TransactionRepository::get_by_id(&repo, movement.transaction.id)
        .await
        .unwrap();
    assert!(entry.is_none());
    assert!(
        ProductRepository::get_by_id(&repo, product.id)
            .await
            .unwrap()
            .is_none()
    );
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_services_over_postgres() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("services");

    let products = ProductService::new(repo.clone());
    let inventory = InventoryService::new(repo.clone(), repo.clone());
    let reports = ReportService::new(repo);

    let product = products
        .create_product(product_input(builder.name("product", "svc"), 4, 5, 250))
        .await
        .unwrap();

    inventory
        .add_stock(StockOperation {
            product_id: product.id,
            quantity: 6,
            notes: None,
        })
        .await
        .unwrap();

    let history = inventory.transaction_history(product.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_name, product.name);
    assert_eq!(history[0].notes, "");

    let valuation = reports.inventory_valuation().await.unwrap();
    assert_eq!(valuation.total_products, 1);
    assert_eq!(valuation.total_items, 10);
    assert_eq!(valuation.total_value, Decimal::new(25, 0));

    assert!(reports.low_stock_products().await.unwrap().is_empty());
}
