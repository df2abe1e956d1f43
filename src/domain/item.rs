//! Item Entity
//!
//! A tracked perishable or renewable product. Every field is opaque text;
//! dates and prices are never parsed.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Shown when a required field is missing
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill all required fields.";

/// A stored expiry-tracker record
///
/// Missing or `null` fields read back as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Unique identifier (empty until assigned by the store)
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    /// Free-text classification
    #[serde(deserialize_with = "null_as_empty")]
    pub category: String,
    /// Display name
    #[serde(deserialize_with = "null_as_empty")]
    pub item: String,
    /// Expiry date
    #[serde(deserialize_with = "null_as_empty")]
    pub date: String,
    /// Renewal interval
    #[serde(deserialize_with = "null_as_empty")]
    pub cycle: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub price: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub reminder: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// Create an item without an id; the store assigns one on insert
    pub fn new(category: &str, item: &str, date: &str, reminder: &str) -> Self {
        Self {
            category: category.to_string(),
            item: item.to_string(),
            date: date.to_string(),
            reminder: reminder.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw field values as entered by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    pub id: Option<String>,
    pub category: String,
    pub item: String,
    pub date: String,
    pub cycle: String,
    pub price: String,
    pub notes: String,
    pub reminder: String,
}

impl ItemDraft {
    /// Check required fields and build the item to store
    pub fn validate(self) -> DomainResult<Item> {
        if !validate_form(&self.category, &self.item, &self.date, &self.reminder) {
            return Err(DomainError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        Ok(Item {
            id: self.id.unwrap_or_default(),
            category: self.category,
            item: self.item,
            date: self.date,
            cycle: self.cycle,
            price: self.price,
            notes: self.notes,
            reminder: self.reminder,
        })
    }
}

/// Category, name, expiry date and reminder must all be non-empty
pub fn validate_form(category: &str, item_name: &str, date: &str, reminder: &str) -> bool {
    !(category.is_empty() || item_name.is_empty() || date.is_empty() || reminder.is_empty())
}

/// Current time in milliseconds plus a random offset below 1000
pub fn generate_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let jitter: i64 = rand::thread_rng().gen_range(0..1000);
    (now + jitter).to_string()
}
