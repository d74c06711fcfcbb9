//! Item (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ItemCategory;

fn default_location() -> String {
    "Main Library".to_string()
}

/// A borrowable title or tool with a finite number of copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub category: ItemCategory,
    /// Copies owned by the library
    pub copies: u32,
    /// Copies currently checked out, never more than `copies`
    #[serde(default)]
    pub on_loan: u32,
    #[serde(default = "default_location")]
    pub location: String,
}

impl Item {
    pub fn new(id: i32, name: impl Into<String>, category: ItemCategory, copies: u32) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            copies,
            on_loan: 0,
            location: default_location(),
        }
    }

    pub fn available_copies(&self) -> u32 {
        self.copies.saturating_sub(self.on_loan)
    }

    pub fn is_available(&self) -> bool {
        self.on_loan < self.copies
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (ID: {}, Type: {}, Available: {}/{}, Location: {})",
            self.name,
            self.id,
            self.category,
            self.available_copies(),
            self.copies,
            self.location
        )
    }
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub category: ItemCategory,
    #[validate(range(min = 1, message = "an item needs at least one copy"))]
    pub copies: u32,
    pub location: Option<String>,
}

/// Item search filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ItemQuery {
    /// Restrict to one category
    pub category: Option<ItemCategory>,
    /// Only items with at least one copy on the shelf
    pub available: Option<bool>,
}

impl ItemQuery {
    pub fn matches(&self, item: &Item) -> bool {
        self.category.map_or(true, |c| c == item.category)
            && self.available.map_or(true, |a| a == item.is_available())
    }
}
