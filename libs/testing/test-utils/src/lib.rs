//! Fixtures for the database-backed tests of the domain crates.
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let data = TestDataBuilder::from_test_name("withdraw_more_than_stock");
//! let product_name = data.name("product", "widget");
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;

use std::hash::{DefaultHasher, Hash, Hasher};

/// Deterministic names for test rows.
///
/// Values derive from a seed, so a failing test produces the same rows on
/// every run, and different tests never collide on unique columns.
#[derive(Debug, Clone, Copy)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`, e.g. a product name
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Fits the 50 character username column
    pub fn username(&self, suffix: &str) -> String {
        let mut name = format!("u{}{}", self.seed % 1_000_000, suffix);
        name.truncate(50);
        name
    }

    /// Already lowercase, matching how emails are stored
    pub fn email(&self, suffix: &str) -> String {
        format!("{}-{}@example.com", suffix, self.seed).to_lowercase()
    }
}

pub mod assertions {
    use std::fmt::Debug;

    pub fn assert_some<T>(value: Option<T>, what: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("{}: expected a value, found none", what),
        }
    }

    /// Fail unless `result` is an error accepted by `expected`
    pub fn assert_err_matches<T: Debug, E: Debug>(
        result: Result<T, E>,
        expected: impl FnOnce(&E) -> bool,
        what: &str,
    ) {
        match result {
            Ok(value) => panic!("{}: expected an error, got Ok({:?})", what, value),
            Err(e) => assert!(expected(&e), "{}: wrong error {:?}", what, e),
        }
    }
}
