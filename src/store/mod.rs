//! Remote store for shopping rows.
//!
//! [`ShoppingStore`] is the seam between the state manager and the backend:
//! [`HttpShoppingStore`] talks to the REST API, tests substitute a mock or an
//! in-memory fake.

mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::HttpShoppingStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ItemId, NewShoppingItem, ShoppingItem};
use crate::error::Result;

/// Backend operations the state manager depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingStore: Send + Sync {
    /// Lists the rows scheduled for `date`.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<ShoppingItem>>;

    /// Lists rows of any date whose name matches `text`.
    async fn search(&self, text: &str) -> Result<Vec<ShoppingItem>>;

    /// Lists starred rows, templates included.
    async fn favorites(&self) -> Result<Vec<ShoppingItem>>;

    /// Creates a row and returns it with its assigned id.
    async fn create(&self, item: &NewShoppingItem) -> Result<ShoppingItem>;

    /// Replaces a row and returns the stored version.
    async fn update(&self, item: &ShoppingItem) -> Result<ShoppingItem>;

    /// Deletes a row permanently.
    async fn delete(&self, id: ItemId) -> Result<()>;
}
