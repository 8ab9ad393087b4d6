//! Application state and the diagnostic event bus.
//!
//! This module contains:
//! - The explicit shopping list state object and its derived views (state.rs)
//! - Event bus for reporting state changes and sync failures (events.rs)

pub mod events;
pub mod state;

pub use events::{AppEvent, EventBus};
pub use state::{Highlight, ShoppingState};
