//! Shopping list view state.
//!
//! [`ShoppingState`] is the single owner of the rows the client knows about:
//! the dated rows of the last loaded day plus any resident favorite
//! templates. Every view the front end draws is derived from it.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{ItemId, ShoppingItem};

/// A search match flagged for emphasis until its timer elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Row being highlighted.
    pub item_id: ItemId,
    /// Name that was searched for.
    pub text: String,
}

/// Local state of the shopping list.
#[derive(Debug, Clone)]
pub struct ShoppingState {
    selected_date: NaiveDate,
    items: Vec<ShoppingItem>,
    is_loading: bool,
    search_results: Vec<ShoppingItem>,
    search_message: Option<String>,
    highlight: Option<Highlight>,
    highlight_generation: u64,
}

impl ShoppingState {
    /// Creates an empty state positioned on `selected_date`.
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            items: Vec::new(),
            is_loading: false,
            search_results: Vec::new(),
            search_message: None,
            highlight: None,
            highlight_generation: 0,
        }
    }

    /// Returns the selected day.
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Moves the selection to `date`.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Returns every locally held row, templates included.
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Returns whether a day load is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Rows scheduled for `date`. Templates never match.
    pub fn items_for_date(&self, date: NaiveDate) -> Vec<&ShoppingItem> {
        self.items.iter().filter(|item| item.is_on(date)).collect()
    }

    /// Rows of the selected day.
    pub fn today_items(&self) -> Vec<&ShoppingItem> {
        self.items_for_date(self.selected_date)
    }

    /// One starred row per distinct name, first occurrence wins.
    pub fn unique_favorites(&self) -> Vec<&ShoppingItem> {
        let mut seen = HashSet::new();
        let mut favorites = Vec::new();
        for item in &self.items {
            if item.is_favorite && seen.insert(item.text.as_str()) {
                favorites.push(item);
            }
        }
        favorites
    }

    /// Looks up a row by id.
    pub fn get(&self, id: ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Finds the unbought row named `text` on `date`.
    pub fn open_row(&self, text: &str, date: NaiveDate) -> Option<&ShoppingItem> {
        self.items
            .iter()
            .find(|item| item.text == text && item.is_on(date) && !item.is_bought)
    }

    /// Finds a favorite template named `text`.
    pub fn template_for(&self, text: &str) -> Option<&ShoppingItem> {
        self.items
            .iter()
            .find(|item| item.text == text && item.is_template() && item.is_favorite)
    }

    /// Returns whether any held row named `text` is starred.
    pub fn is_favorite_name(&self, text: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.text == text && item.is_favorite)
    }

    /// Replaces the dated rows with `rows`, keeping resident templates.
    pub fn replace_dated(&mut self, rows: Vec<ShoppingItem>) {
        self.items.retain(ShoppingItem::is_template);
        self.merge(rows);
    }

    /// Inserts or replaces rows by id, then re-applies the favorite name rule.
    pub fn merge(&mut self, rows: Vec<ShoppingItem>) {
        for row in rows {
            self.upsert(row);
        }
        self.unify_favorites();
    }

    /// Stars every held row whose name is starred on any held row.
    ///
    /// Un-starring is always written to the backend for every held row of the
    /// name, so a starred row arriving here means the name is still starred.
    fn unify_favorites(&mut self) {
        let starred: HashSet<String> = self
            .items
            .iter()
            .filter(|item| item.is_favorite)
            .map(|item| item.text.clone())
            .collect();
        for item in self.items.iter_mut() {
            if starred.contains(&item.text) {
                item.is_favorite = true;
            }
        }
    }

    /// Held rows named `text` whose favorite flag differs from `favorite`.
    pub fn siblings_to_flip(&self, text: &str, favorite: bool) -> Vec<ShoppingItem> {
        self.items
            .iter()
            .filter(|item| item.text == text && item.is_favorite != favorite)
            .cloned()
            .collect()
    }

    /// Inserts `item`, or replaces the row with the same id in place.
    pub fn upsert(&mut self, item: ShoppingItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Removes a row, returning it if it was held.
    pub fn remove(&mut self, id: ItemId) -> Option<ShoppingItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sets the favorite flag on every row named `text`.
    ///
    /// Un-starring a name also drops its templates: a template only exists to
    /// remember a starred name.
    pub fn apply_favorite(&mut self, text: &str, favorite: bool) {
        for item in self.items.iter_mut().filter(|item| item.text == text) {
            item.is_favorite = favorite;
        }
        if !favorite {
            self.items
                .retain(|item| !(item.text == text && item.is_template()));
        }
    }

    /// Dated purchases returned by the last search, most recent first.
    pub fn search_results(&self) -> &[ShoppingItem] {
        &self.search_results
    }

    /// User-facing message from the last search, if it found nothing.
    pub fn search_message(&self) -> Option<&str> {
        self.search_message.as_deref()
    }

    /// Records the outcome of a search.
    pub fn set_search(&mut self, results: Vec<ShoppingItem>, message: Option<String>) {
        self.search_results = results;
        self.search_message = message;
    }

    /// Returns the active highlight.
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Returns whether `item` is the highlighted row.
    pub fn is_highlighted(&self, item: &ShoppingItem) -> bool {
        self.highlight
            .as_ref()
            .is_some_and(|highlight| highlight.item_id == item.id)
    }

    /// Starts a highlight and returns the token that may end it.
    pub fn begin_highlight(&mut self, highlight: Highlight) -> u64 {
        self.highlight_generation += 1;
        self.highlight = Some(highlight);
        self.highlight_generation
    }

    /// Clears the highlight if `generation` is still the latest one.
    ///
    /// Returns whether anything was cleared.
    pub fn end_highlight(&mut self, generation: u64) -> bool {
        if generation != self.highlight_generation || self.highlight.is_none() {
            return false;
        }
        self.highlight = None;
        true
    }
}
