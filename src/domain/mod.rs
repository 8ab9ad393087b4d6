//! Domain types shared by the store, the services and the CLI.

mod date;
mod item;

pub use date::{display_label, shift_days};
pub use item::{ItemId, NewShoppingItem, ShoppingItem};
