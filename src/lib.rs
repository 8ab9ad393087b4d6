//! A date-scoped shopping list client.
//!
//! The crate keeps a local view of one day's shopping rows in sync with a
//! REST backend, remembers starred item names as dateless templates, and
//! jumps to past purchases on search.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{Result, ShoppingError};
