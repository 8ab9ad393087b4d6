//! Shopping card of the home dashboard.
//!
//! The dashboard shows a compact, read-only view of one day: each name once,
//! and whether anything is still left to buy.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{display_label, ShoppingItem};
use crate::error::Result;
use crate::store::ShoppingStore;

/// Summary of one day's shopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingSummary {
    /// Day summarized.
    pub date: NaiveDate,
    /// Header label for the day.
    pub label: String,
    /// One row per name, the last one listed for that day.
    pub items: Vec<ShoppingItem>,
    /// Whether any listed row is still unbought.
    pub has_unconfirmed: bool,
}

impl ShoppingSummary {
    /// Builds a summary from the backend's rows for `date`.
    pub fn from_rows(date: NaiveDate, rows: Vec<ShoppingItem>) -> Self {
        let items = latest_per_name(rows.into_iter().filter(|row| row.is_on(date)).collect());
        let has_unconfirmed = items.iter().any(|item| !item.is_bought);
        Self {
            date,
            label: display_label(date),
            items,
            has_unconfirmed,
        }
    }

    /// Returns whether the day has nothing listed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Keeps the last row of each name, in the order those rows appear.
fn latest_per_name(rows: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    let mut seen = HashSet::new();
    let mut latest: Vec<ShoppingItem> = rows
        .into_iter()
        .rev()
        .filter(|row| seen.insert(row.text.clone()))
        .collect();
    latest.reverse();
    latest
}

/// Read-only dashboard queries.
pub struct DashboardService<S: ShoppingStore> {
    store: Arc<S>,
}

impl<S: ShoppingStore> DashboardService<S> {
    /// Creates a dashboard service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetches and summarizes the shopping rows of `date`.
    pub async fn shopping_summary(&self, date: NaiveDate) -> Result<ShoppingSummary> {
        let rows = self.store.list_by_date(date).await.map_err(|err| {
            tracing::warn!(%date, error = %err, "dashboard shopping load failed");
            err
        })?;
        Ok(ShoppingSummary::from_rows(date, rows))
    }
}
