//! Error type for the shopping list client.

use thiserror::Error;

use crate::domain::ItemId;

/// Errors produced while talking to the backend or reconciling local state.
#[derive(Debug, Error)]
pub enum ShoppingError {
    /// The request never produced a response, or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{method} {path} returned HTTP {status}")]
    Status {
        /// HTTP method of the failed call.
        method: &'static str,
        /// Request path, without the origin.
        path: String,
        /// Status code returned.
        status: u16,
    },

    /// The configured backend origin is not a usable URL.
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An operation referenced a row that is not held locally.
    #[error("item {0} is not in the local list")]
    UnknownItem(ItemId),
}

impl ShoppingError {
    /// Returns the HTTP status if the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ShoppingError::Status { status, .. } => Some(*status),
            ShoppingError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShoppingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_names_the_call() {
        let err = ShoppingError::Status {
            method: "PUT",
            path: "/api/shopping/4".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "PUT /api/shopping/4 returned HTTP 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unknown_item_has_no_status() {
        let err = ShoppingError::UnknownItem(ItemId(9));
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains('9'));
    }
}
