//! Purchase history search.
//!
//! A search hit is only useful if it can take the user to a day, so raw
//! backend matches are narrowed to rows that were actually bought on a date
//! and ordered newest first.

use std::cmp::Reverse;
use std::time::Duration;

use chrono::NaiveDate;

use crate::domain::ShoppingItem;

/// Message shown when a search has no dated purchases.
pub const NOT_FOUND_MESSAGE: &str = "검색 결과가 없습니다.";

/// Default time a search match stays highlighted.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_secs(5);

/// Result of a purchase history search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was sent.
    Ignored,
    /// No bought row with a date matched.
    NotFound,
    /// The selection moved to the most recent purchase.
    Found {
        /// Day the selection moved to.
        date: NaiveDate,
        /// Row that is now highlighted.
        item: ShoppingItem,
        /// Every dated purchase, most recent first.
        matches: Vec<ShoppingItem>,
    },
}

impl SearchOutcome {
    /// Returns whether the search moved the selection.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Keeps bought rows that have a date, most recent date first.
///
/// Rows sharing a date keep the backend's order.
pub fn rank_purchases(rows: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    let mut purchases: Vec<ShoppingItem> = rows
        .into_iter()
        .filter(|row| row.is_bought && row.shopping_date.is_some())
        .collect();
    purchases.sort_by_key(|row| Reverse(row.shopping_date));
    purchases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use pretty_assertions::assert_eq;

    fn row(id: i64, date: Option<&str>, bought: bool) -> ShoppingItem {
        ShoppingItem {
            id: ItemId(id),
            text: "계란".to_string(),
            is_bought: bought,
            shopping_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            is_favorite: false,
            count: 1,
        }
    }

    #[test]
    fn keeps_only_dated_purchases() {
        let ranked = rank_purchases(vec![
            row(1, Some("2025-01-01"), false),
            row(2, None, true),
            row(3, Some("2025-01-03"), true),
        ]);

        assert_eq!(ranked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ItemId(3)]);
    }

    #[test]
    fn orders_newest_first_and_is_stable() {
        let ranked = rank_purchases(vec![
            row(1, Some("2024-11-30"), true),
            row(2, Some("2025-01-02"), true),
            row(3, Some("2025-01-02"), true),
            row(4, Some("2024-12-25"), true),
        ]);

        let ids: Vec<ItemId> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![ItemId(2), ItemId(3), ItemId(4), ItemId(1)]);
    }

    #[test]
    fn outcome_found_flag() {
        assert!(!SearchOutcome::NotFound.is_found());
        assert!(!SearchOutcome::Ignored.is_found());
    }
}
