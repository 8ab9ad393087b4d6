//! In-memory backend used by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::ShoppingStore;
use crate::domain::{ItemId, NewShoppingItem, ShoppingItem};
use crate::error::{Result, ShoppingError};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    rows: Mutex<Vec<ShoppingItem>>,
    next_id: Mutex<i64>,
}

impl MemoryStore {
    pub(crate) fn with_rows(rows: Vec<ShoppingItem>) -> Self {
        let next_id = rows.iter().map(|row| row.id.0).max().unwrap_or(0);
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
        }
    }

    pub(crate) fn rows(&self) -> Vec<ShoppingItem> {
        self.rows.lock().unwrap().clone()
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<ShoppingItem> {
        self.rows().into_iter().find(|row| row.id == id)
    }
}

#[async_trait]
impl ShoppingStore for MemoryStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<ShoppingItem>> {
        Ok(self.rows().into_iter().filter(|row| row.is_on(date)).collect())
    }

    async fn search(&self, text: &str) -> Result<Vec<ShoppingItem>> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|row| row.text.contains(text))
            .collect())
    }

    async fn favorites(&self) -> Result<Vec<ShoppingItem>> {
        Ok(self.rows().into_iter().filter(|row| row.is_favorite).collect())
    }

    async fn create(&self, item: &NewShoppingItem) -> Result<ShoppingItem> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            ItemId(*next_id)
        };
        let row = ShoppingItem {
            id,
            text: item.text.clone(),
            is_bought: item.is_bought,
            shopping_date: item.shopping_date,
            is_favorite: item.is_favorite,
            count: item.count,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, item: &ShoppingItem) -> Result<ShoppingItem> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == item.id)
            .ok_or(ShoppingError::Status {
                method: "PUT",
                path: format!("/api/shopping/{}", item.id),
                status: 404,
            })?;
        *row = item.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ShoppingError::Status {
                method: "DELETE",
                path: format!("/api/shopping/{id}"),
                status: 404,
            });
        }
        Ok(())
    }
}
