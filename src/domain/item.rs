//! Shopping item model and its JSON wire shape.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a shopping row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single shopping row.
///
/// A row with no `shopping_date` is a favorite template: it only remembers a
/// frequently bought name and never shows up in a day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Server-assigned identifier.
    pub id: ItemId,
    /// Item name.
    pub text: String,
    /// Whether the row was bought on its date.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_bought: bool,
    /// Date the row belongs to, `None` for favorite templates.
    #[serde(default)]
    pub shopping_date: Option<NaiveDate>,
    /// Whether the item name is starred.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_favorite: bool,
    /// Requested quantity, always at least one.
    #[serde(default = "default_count", deserialize_with = "positive_count")]
    pub count: u32,
}

impl ShoppingItem {
    /// Returns whether this row is a favorite template.
    pub fn is_template(&self) -> bool {
        self.shopping_date.is_none()
    }

    /// Returns whether this row belongs to `date`.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.shopping_date == Some(date)
    }

    /// Returns a copy marked as bought.
    pub fn bought(&self) -> Self {
        Self {
            is_bought: true,
            ..self.clone()
        }
    }

    /// Returns a copy with the favorite flag set to `favorite`.
    pub fn with_favorite(&self, favorite: bool) -> Self {
        Self {
            is_favorite: favorite,
            ..self.clone()
        }
    }

    /// Returns a copy with one more unit requested.
    pub fn incremented(&self) -> Self {
        Self {
            count: self.count.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns a fresh, unbought single-unit copy scheduled for `date`.
    pub fn activated_on(&self, date: NaiveDate) -> Self {
        Self {
            shopping_date: Some(date),
            is_bought: false,
            count: 1,
            ..self.clone()
        }
    }

    /// Returns the template left behind when a favorite row is removed from
    /// its day.
    pub fn as_template(&self) -> Self {
        Self {
            shopping_date: None,
            is_bought: false,
            count: 1,
            ..self.clone()
        }
    }
}

/// Body of a create request; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    /// Item name.
    pub text: String,
    /// Always `false` for new rows.
    pub is_bought: bool,
    /// Date the row is scheduled for.
    pub shopping_date: Option<NaiveDate>,
    /// Whether the name is already starred elsewhere.
    pub is_favorite: bool,
    /// Requested quantity.
    pub count: u32,
}

impl NewShoppingItem {
    /// Creates an unbought single-unit row for `date`.
    pub fn new(text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            text: text.into(),
            is_bought: false,
            shopping_date: Some(date),
            is_favorite: false,
            count: 1,
        }
    }

    /// Sets the favorite flag.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }
}

fn default_count() -> u32 {
    1
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn positive_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?
        .map(|count| u32::try_from(count.max(1)).unwrap_or(u32::MAX))
        .unwrap_or_else(default_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn decodes_backend_row() {
        let json = r#"{"id":7,"text":"우유","isBought":true,"shoppingDate":"2025-01-01","isFavorite":true,"count":3}"#;
        let item: ShoppingItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, ItemId(7));
        assert_eq!(item.text, "우유");
        assert!(item.is_bought);
        assert_eq!(item.shopping_date, Some(date("2025-01-01")));
        assert!(item.is_favorite);
        assert_eq!(item.count, 3);
    }

    #[test]
    fn missing_flags_and_count_get_defaults() {
        let item: ShoppingItem =
            serde_json::from_str(r#"{"id":1,"text":"계란","shoppingDate":"2025-01-01"}"#).unwrap();
        assert!(!item.is_bought);
        assert!(!item.is_favorite);
        assert_eq!(item.count, 1);

        let item: ShoppingItem = serde_json::from_str(
            r#"{"id":1,"text":"계란","isFavorite":null,"isBought":null,"count":null,"shoppingDate":null}"#,
        )
        .unwrap();
        assert!(!item.is_favorite);
        assert_eq!(item.count, 1);
        assert!(item.is_template());
    }

    #[test]
    fn zero_count_is_raised_to_one() {
        let item: ShoppingItem =
            serde_json::from_str(r#"{"id":1,"text":"두부","count":0}"#).unwrap();
        assert_eq!(item.count, 1);
    }

    #[test]
    fn negative_count_is_raised_to_one() {
        let rows: Vec<ShoppingItem> = serde_json::from_str(
            r#"[{"id":1,"text":"두부","count":-2},{"id":2,"text":"계란","count":3}]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[1].count, 3);
    }

    #[test]
    fn serializes_camel_case() {
        let item = ShoppingItem {
            id: ItemId(3),
            text: "두부".to_string(),
            is_bought: false,
            shopping_date: Some(date("2025-03-09")),
            is_favorite: true,
            count: 2,
        };
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["isBought"], false);
        assert_eq!(json["shoppingDate"], "2025-03-09");
        assert_eq!(json["isFavorite"], true);
    }

    #[test]
    fn template_transition_resets_row() {
        let item = ShoppingItem {
            id: ItemId(3),
            text: "두부".to_string(),
            is_bought: true,
            shopping_date: Some(date("2025-03-09")),
            is_favorite: true,
            count: 4,
        };

        let template = item.as_template();
        assert!(template.is_template());
        assert!(!template.is_bought);
        assert_eq!(template.count, 1);
        assert!(template.is_favorite);

        let again = template.activated_on(date("2025-03-10"));
        assert!(again.is_on(date("2025-03-10")));
        assert_eq!(again.count, 1);
    }
}
