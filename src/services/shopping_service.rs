//! Shopping list state manager.
//!
//! [`ShoppingService`] owns the [`ShoppingState`] for the selected day and is
//! the only path through which rows change. Every mutation writes to the
//! [`ShoppingStore`] first and touches local state only after that write
//! succeeds. A failure is logged, published as [`AppEvent::SyncFailed`] and
//! returned, leaving local state as it was.
//!
//! Favorite status belongs to an item *name*: toggling it on one row is
//! written to every locally held row with the same text, so a later reload
//! sees the same flag on all of them.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::app::{AppEvent, EventBus, Highlight, ShoppingState};
use crate::domain::{shift_days, ItemId, NewShoppingItem, ShoppingItem};
use crate::error::{Result, ShoppingError};
use crate::services::search::{
    rank_purchases, SearchOutcome, DEFAULT_HIGHLIGHT, NOT_FOUND_MESSAGE,
};
use crate::store::ShoppingStore;

/// Tunables for the state manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingSettings {
    /// How long a search match stays highlighted.
    pub highlight_duration: Duration,
}

impl Default for ShoppingSettings {
    fn default() -> Self {
        Self {
            highlight_duration: DEFAULT_HIGHLIGHT,
        }
    }
}

/// What [`ShoppingService::add_item`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// An unbought row with the same name on that day got one more unit.
    Incremented(ShoppingItem),
    /// A favorite template was scheduled for the day.
    Reactivated(ShoppingItem),
    /// A new row was created.
    Created(ShoppingItem),
}

impl AddOutcome {
    /// Returns the stored row, if one was written.
    pub fn item(&self) -> Option<&ShoppingItem> {
        match self {
            AddOutcome::Ignored => None,
            AddOutcome::Incremented(item)
            | AddOutcome::Reactivated(item)
            | AddOutcome::Created(item) => Some(item),
        }
    }
}

/// What [`ShoppingService::delete_item`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row was deleted on the backend.
    Removed(ItemId),
    /// The row was starred, so it became a dateless template instead.
    Templated(ShoppingItem),
}

enum AddPlan {
    Increment(ShoppingItem),
    Reactivate(ShoppingItem),
    Create(NewShoppingItem),
}

/// State manager for the date-scoped shopping list.
pub struct ShoppingService<S: ShoppingStore> {
    store: Arc<S>,
    state: Arc<RwLock<ShoppingState>>,
    events: EventBus,
    settings: ShoppingSettings,
}

impl<S: ShoppingStore> ShoppingService<S> {
    /// Creates a service positioned on `selected_date` with an empty list.
    pub fn new(store: Arc<S>, selected_date: NaiveDate) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(ShoppingState::new(selected_date))),
            events: EventBus::new(),
            settings: ShoppingSettings::default(),
        }
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: ShoppingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> ShoppingState {
        self.state.read().await.clone()
    }

    /// Returns the selected day.
    pub async fn selected_date(&self) -> NaiveDate {
        self.state.read().await.selected_date()
    }

    /// Rows of the selected day.
    pub async fn today_items(&self) -> Vec<ShoppingItem> {
        self.state
            .read()
            .await
            .today_items()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rows scheduled for `date` among those held locally.
    pub async fn items_for_date(&self, date: NaiveDate) -> Vec<ShoppingItem> {
        self.state
            .read()
            .await
            .items_for_date(date)
            .into_iter()
            .cloned()
            .collect()
    }

    /// One starred row per distinct name.
    pub async fn unique_favorites(&self) -> Vec<ShoppingItem> {
        self.state
            .read()
            .await
            .unique_favorites()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Fetches the rows of `date` and makes them the local list.
    ///
    /// Favorite templates stay resident, and starred rows are refreshed from
    /// the favorites endpoint when it is available.
    pub async fn load_for_date(&self, date: NaiveDate) -> Result<()> {
        self.state.write().await.set_loading(true);

        let rows = match self.store.list_by_date(date).await {
            Ok(rows) => rows,
            Err(err) => {
                self.state.write().await.set_loading(false);
                return Err(self.sync_failed("load", err));
            }
        };

        let count = rows.len();
        {
            let mut state = self.state.write().await;
            state.replace_dated(rows);
            state.set_loading(false);
        }
        self.refresh_favorites().await;

        tracing::info!(%date, count, "loaded shopping list");
        self.events.publish(AppEvent::ItemsLoaded { date, count });
        Ok(())
    }

    async fn refresh_favorites(&self) {
        match self.store.favorites().await {
            Ok(rows) => self.state.write().await.merge(rows),
            Err(err) => tracing::warn!(error = %err, "favorites unavailable, keeping resident ones"),
        }
    }

    /// Selects `date` and loads its rows.
    pub async fn select_date(&self, date: NaiveDate) -> Result<()> {
        self.state.write().await.set_selected_date(date);
        self.events.publish(AppEvent::DateSelected(date));
        self.load_for_date(date).await
    }

    /// Moves the selection by `days` and loads the new day.
    pub async fn shift_date(&self, days: i64) -> Result<()> {
        let date = shift_days(self.selected_date().await, days);
        self.select_date(date).await
    }

    /// Adds one unit of `text` to `date`.
    ///
    /// An unbought row of the same name on that day is incremented; otherwise
    /// a favorite template of that name is scheduled; otherwise a row is
    /// created, starred if the name already is.
    pub async fn add_item(&self, text: &str, date: NaiveDate) -> Result<AddOutcome> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring blank item name");
            return Ok(AddOutcome::Ignored);
        }

        let plan = {
            let state = self.state.read().await;
            if let Some(row) = state.open_row(text, date) {
                AddPlan::Increment(row.incremented())
            } else if let Some(template) = state.template_for(text) {
                AddPlan::Reactivate(template.activated_on(date))
            } else {
                AddPlan::Create(
                    NewShoppingItem::new(text, date).with_favorite(state.is_favorite_name(text)),
                )
            }
        };

        let outcome = match plan {
            AddPlan::Increment(row) => {
                let saved = self.store.update(&row).await.map_err(|e| self.sync_failed("add", e))?;
                AddOutcome::Incremented(saved)
            }
            AddPlan::Reactivate(row) => {
                let saved = self.store.update(&row).await.map_err(|e| self.sync_failed("add", e))?;
                AddOutcome::Reactivated(saved)
            }
            AddPlan::Create(new_item) => {
                let saved = self
                    .store
                    .create(&new_item)
                    .await
                    .map_err(|e| self.sync_failed("add", e))?;
                AddOutcome::Created(saved)
            }
        };

        if let Some(saved) = outcome.item() {
            tracing::info!(id = %saved.id, text = %saved.text, count = saved.count, "added shopping item");
            self.state.write().await.upsert(saved.clone());
            self.events.publish(AppEvent::ItemChanged(saved.id));
        }
        Ok(outcome)
    }

    /// Marks a row as bought.
    pub async fn mark_bought(&self, id: ItemId) -> Result<ShoppingItem> {
        let item = self.held(id).await?;
        let saved = self
            .store
            .update(&item.bought())
            .await
            .map_err(|e| self.sync_failed("mark_bought", e))?;

        self.state.write().await.upsert(saved.clone());
        self.events.publish(AppEvent::ItemChanged(id));
        Ok(saved)
    }

    /// Flips the favorite flag of a row and carries it to every held row with
    /// the same name.
    ///
    /// Only the toggled row's request decides success. Same-name rows are
    /// written afterwards; a failure there is reported but the local mirror
    /// still applies.
    pub async fn toggle_favorite(&self, id: ItemId) -> Result<ShoppingItem> {
        let item = self.held(id).await?;
        let favorite = !item.is_favorite;
        let saved = self
            .store
            .update(&item.with_favorite(favorite))
            .await
            .map_err(|e| self.sync_failed("toggle_favorite", e))?;

        let siblings = self.state.read().await.siblings_to_flip(&saved.text, favorite);
        let mut synced = Vec::with_capacity(siblings.len());
        for sibling in siblings.into_iter().filter(|sibling| sibling.id != id) {
            match self.store.update(&sibling.with_favorite(favorite)).await {
                Ok(row) => synced.push(row),
                Err(err) => {
                    self.sync_failed("toggle_favorite", err);
                }
            }
        }

        {
            let mut state = self.state.write().await;
            state.upsert(saved.clone());
            for row in synced {
                state.upsert(row);
            }
            state.apply_favorite(&saved.text, favorite);
        }
        tracing::info!(text = %saved.text, favorite, "favorite toggled");
        self.events.publish(AppEvent::FavoriteChanged {
            text: saved.text.clone(),
            favorite,
        });
        Ok(saved)
    }

    /// Removes a row from its day.
    ///
    /// Starred rows are turned into templates so the name can be reused;
    /// everything else is deleted on the backend.
    pub async fn delete_item(&self, id: ItemId) -> Result<DeleteOutcome> {
        let item = self.held(id).await?;

        if item.is_favorite {
            let saved = self
                .store
                .update(&item.as_template())
                .await
                .map_err(|e| self.sync_failed("delete", e))?;
            self.state.write().await.upsert(saved.clone());
            self.events.publish(AppEvent::ItemRemoved(id));
            return Ok(DeleteOutcome::Templated(saved));
        }

        self.store
            .delete(id)
            .await
            .map_err(|e| self.sync_failed("delete", e))?;
        self.state.write().await.remove(id);
        self.events.publish(AppEvent::ItemRemoved(id));
        Ok(DeleteOutcome::Removed(id))
    }

    /// Looks up past purchases of `text` and jumps to the most recent one.
    pub async fn search_by_text(&self, text: &str) -> Result<SearchOutcome> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::Ignored);
        }

        let rows = self
            .store
            .search(query)
            .await
            .map_err(|e| self.sync_failed("search", e))?;
        let matches = rank_purchases(rows);

        let Some((item, date)) = matches
            .first()
            .and_then(|item| item.shopping_date.map(|date| (item.clone(), date)))
        else {
            tracing::info!(query, "no purchases found");
            self.state
                .write()
                .await
                .set_search(Vec::new(), Some(NOT_FOUND_MESSAGE.to_string()));
            self.events.publish(AppEvent::SearchNotFound(query.to_string()));
            return Ok(SearchOutcome::NotFound);
        };

        self.state.write().await.set_search(matches.clone(), None);
        self.move_to_date(date, &item).await?;

        Ok(SearchOutcome::Found { date, item, matches })
    }

    /// Selects `date` and highlights `item` there.
    pub async fn move_to_date(&self, date: NaiveDate, item: &ShoppingItem) -> Result<()> {
        self.select_date(date).await?;
        self.start_highlight(item).await;
        Ok(())
    }

    async fn start_highlight(&self, item: &ShoppingItem) {
        let generation = self.state.write().await.begin_highlight(Highlight {
            item_id: item.id,
            text: item.text.clone(),
        });
        self.events.publish(AppEvent::HighlightStarted(item.id));

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let duration = self.settings.highlight_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if state.write().await.end_highlight(generation) {
                events.publish(AppEvent::HighlightCleared);
            }
        });
    }

    async fn held(&self, id: ItemId) -> Result<ShoppingItem> {
        self.state
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(ShoppingError::UnknownItem(id))
    }

    fn sync_failed(&self, operation: &'static str, err: ShoppingError) -> ShoppingError {
        tracing::warn!(operation, error = %err, "shopping sync failed");
        self.events.publish(AppEvent::SyncFailed {
            operation,
            message: err.to_string(),
        });
        err
    }
}
