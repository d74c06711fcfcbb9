//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ItemCategory
// ---------------------------------------------------------------------------

/// Classification of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Book,
    Dvd,
    Magazine,
    GardeningTool,
    CarpentryTool,
    MakerspaceTool,
    /// Reference material, consulted on site only
    Reference,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 7] = [
        ItemCategory::Book,
        ItemCategory::Dvd,
        ItemCategory::Magazine,
        ItemCategory::GardeningTool,
        ItemCategory::CarpentryTool,
        ItemCategory::MakerspaceTool,
        ItemCategory::Reference,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            ItemCategory::Book => "book",
            ItemCategory::Dvd => "dvd",
            ItemCategory::Magazine => "magazine",
            ItemCategory::GardeningTool => "gardening_tool",
            ItemCategory::CarpentryTool => "carpentry_tool",
            ItemCategory::MakerspaceTool => "makerspace_tool",
            ItemCategory::Reference => "reference",
        }
    }

    pub fn is_borrowable(&self) -> bool {
        !matches!(self, ItemCategory::Reference)
    }

    /// Training a patron must hold before borrowing items of this category
    pub fn required_training(&self) -> Option<Training> {
        match self {
            ItemCategory::GardeningTool => Some(Training::Gardening),
            ItemCategory::CarpentryTool => Some(Training::Carpentry),
            ItemCategory::MakerspaceTool => Some(Training::Makerspace),
            ItemCategory::Book
            | ItemCategory::Dvd
            | ItemCategory::Magazine
            | ItemCategory::Reference => None,
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemCategory::Book => "Book",
            ItemCategory::Dvd => "DVD",
            ItemCategory::Magazine => "Magazine",
            ItemCategory::GardeningTool => "Gardening Tool",
            ItemCategory::CarpentryTool => "Carpentry Tool",
            ItemCategory::MakerspaceTool => "Makerspace Tool",
            ItemCategory::Reference => "Reference",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    /// Accepts both display labels ("Gardening Tool") and keys ("gardening_tool")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        ItemCategory::ALL
            .into_iter()
            .find(|c| c.as_key() == normalized)
            .ok_or_else(|| format!("Invalid item category: {}", s))
    }
}

// ---------------------------------------------------------------------------
// PatronCategory
// ---------------------------------------------------------------------------

/// Age-derived patron classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PatronCategory {
    Minor,
    Regular,
    Elderly,
}

impl std::fmt::Display for PatronCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PatronCategory::Minor => "Minor",
            PatronCategory::Regular => "Regular",
            PatronCategory::Elderly => "Elderly",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

/// Equipment trainings a patron can complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Training {
    Gardening,
    Carpentry,
    Makerspace,
}
