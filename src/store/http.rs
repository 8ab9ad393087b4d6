//! REST implementation of [`ShoppingStore`] on top of reqwest.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::ShoppingStore;
use crate::domain::{ItemId, NewShoppingItem, ShoppingItem};
use crate::error::{Result, ShoppingError};

/// Collection path on the backend.
const COLLECTION_PATH: &str = "api/shopping";

/// Client for the `/api/shopping` resource.
#[derive(Debug, Clone)]
pub struct HttpShoppingStore {
    client: Client,
    origin: Url,
}

impl HttpShoppingStore {
    /// Creates a store for the backend at `api_url`, e.g. `http://localhost:8080`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, api_url)
    }

    /// Creates a store that reuses an existing reqwest client.
    pub fn with_client(client: Client, api_url: &str) -> Result<Self> {
        // `Url::join` replaces the last segment unless the base ends in '/'.
        let origin = if api_url.ends_with('/') {
            Url::parse(api_url)?
        } else {
            Url::parse(&format!("{api_url}/"))?
        };
        Ok(Self { client, origin })
    }

    /// Returns the collection URL, `…/api/shopping`.
    pub fn collection_url(&self) -> Result<Url> {
        Ok(self.origin.join(COLLECTION_PATH)?)
    }

    fn member_url(&self, segment: &str) -> Result<Url> {
        Ok(self.origin.join(&format!("{COLLECTION_PATH}/{segment}"))?)
    }

    async fn read_json<T: DeserializeOwned>(method: &'static str, response: Response) -> Result<T> {
        let response = Self::check(method, response)?;
        Ok(response.json().await?)
    }

    fn check(method: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(ShoppingError::Status {
            method,
            path: response.url().path().to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ShoppingStore for HttpShoppingStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<ShoppingItem>> {
        let url = self.collection_url()?;
        tracing::debug!(%url, %date, "listing shopping items");
        let response = self
            .client
            .get(url)
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        Self::read_json("GET", response).await
    }

    async fn search(&self, text: &str) -> Result<Vec<ShoppingItem>> {
        let url = self.member_url("search")?;
        tracing::debug!(%url, text, "searching shopping items");
        let response = self.client.get(url).query(&[("text", text)]).send().await?;
        Self::read_json("GET", response).await
    }

    async fn favorites(&self) -> Result<Vec<ShoppingItem>> {
        let url = self.member_url("favorites")?;
        let response = self.client.get(url).send().await?;
        Self::read_json("GET", response).await
    }

    async fn create(&self, item: &NewShoppingItem) -> Result<ShoppingItem> {
        let url = self.collection_url()?;
        tracing::debug!(%url, text = %item.text, "creating shopping item");
        let response = self.client.post(url).json(item).send().await?;
        Self::read_json("POST", response).await
    }

    async fn update(&self, item: &ShoppingItem) -> Result<ShoppingItem> {
        let url = self.member_url(&item.id.to_string())?;
        tracing::debug!(%url, "updating shopping item");
        let response = self.client.put(url).json(item).send().await?;
        Self::read_json("PUT", response).await
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let url = self.member_url(&id.to_string())?;
        tracing::debug!(%url, "deleting shopping item");
        let response = self.client.delete(url).send().await?;
        Self::check("DELETE", response)?;
        Ok(())
    }
}
