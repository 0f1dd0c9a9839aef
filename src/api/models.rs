//! Wire and domain types for the catalog API.
//!
//! The API returns a series' category either as a bare id or as an expanded
//! `{id, name}` object depending on the serializer behind the endpoint. Both
//! shapes are folded into [`CategoryRef`] here, during decoding, so nothing
//! above this module ever sees the raw shape.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier shared by both entity types.
pub type EntityId = i64;

// ============================================================================
// Entity Kind
// ============================================================================

/// The two entity types managed by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Series,
}

impl EntityKind {
    /// Path segment of the collection endpoint (`{base}/{segment}/`).
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Series => "series",
        }
    }

    /// Lowercase singular noun for user-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Series => "series",
        }
    }

    /// Capitalized plural, used as the list screen heading.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Category => "Categories",
            Self::Series => "Series",
        }
    }

    pub fn load_failed_message(self) -> &'static str {
        match self {
            Self::Category => "Could not load categories. Please try again.",
            Self::Series => "Could not load series.",
        }
    }

    pub fn delete_failed_message(self) -> &'static str {
        match self {
            Self::Category => "Could not delete the category. Please try again.",
            Self::Series => "Could not delete the series.",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Category => "No categories available. Create a new one!",
            Self::Series => "No series available. Create a new one!",
        }
    }

    pub fn fetch_failed_message(self) -> &'static str {
        match self {
            Self::Category => "Could not load the category.",
            Self::Series => "Could not load the series.",
        }
    }

    /// Generic submit failure; the verb depends on whether the form was
    /// creating or updating.
    pub fn save_failed_message(self, editing: bool) -> &'static str {
        match (self, editing) {
            (Self::Category, false) => "Could not create the category. Check the data.",
            (Self::Category, true) => "Could not update the category. Check the data.",
            (Self::Series, false) => "Could not create the series. Check the data.",
            (Self::Series, true) => "Could not update the series. Check the data.",
        }
    }

    pub fn confirm_delete_message(self) -> &'static str {
        match self {
            Self::Category => "Are you sure you want to delete this category?",
            Self::Series => "Are you sure you want to delete this series?",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Common surface the list screen and cards need from either entity.
pub trait Entity: Clone + Send + 'static {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Short label used in the delete confirmation.
    fn label(&self) -> &str;

    fn image_url(&self) -> Option<&str>;
}

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn image_url(&self) -> Option<&str> {
        non_blank(self.image_url.as_deref())
    }
}

// ============================================================================
// Series
// ============================================================================

/// A series' reference to its category, already normalized.
///
/// `name` is only present when the endpoint expanded the relation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireCategoryRef")]
pub struct CategoryRef {
    pub id: EntityId,
    pub name: Option<String>,
}

/// Every shape the category field has been observed to take.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireCategoryRef {
    Id(EntityId),
    Text(String),
    Expanded {
        id: EntityId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl TryFrom<WireCategoryRef> for CategoryRef {
    type Error = String;

    fn try_from(wire: WireCategoryRef) -> Result<Self, Self::Error> {
        match wire {
            WireCategoryRef::Id(id) => Ok(Self { id, name: None }),
            WireCategoryRef::Text(raw) => raw
                .trim()
                .parse()
                .map(|id| Self { id, name: None })
                .map_err(|_| format!("invalid category id: {raw:?}")),
            WireCategoryRef::Expanded { id, name } => Ok(Self { id, name }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Series {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: Option<f64>,
    pub category: CategoryRef,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Entity for Series {
    const KIND: EntityKind = EntityKind::Series;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn image_url(&self) -> Option<&str> {
        non_blank(self.image_url.as_deref())
    }
}

/// Decimal fields come back as JSON numbers or, from Django-style
/// serializers, as strings like `"8.5"`.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireRating {
        Number(f64),
        Text(String),
    }

    match Option::<WireRating>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WireRating::Number(n)) => Ok(Some(n)),
        Some(WireRating::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(WireRating::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid rating: {s:?}"))),
    }
}

/// Format a rating the way it was typed: `8.5`, `7`, `10`.
pub fn format_rating(rating: f64) -> String {
    format!("{}", rating)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

// ============================================================================
// Request Payloads
// ============================================================================

/// Body of `POST /categories/` and `PUT /categories/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Body of `POST /series/` and `PUT /series/{id}/`.
///
/// `rating` serializes as `null` when the field was left empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPayload {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: Option<f64>,
    pub category: EntityId,
    pub image_url: String,
}

// ============================================================================
// Tests
// ============================================================================
