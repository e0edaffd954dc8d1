//! # Recipe Model
//!
//! A [`Recipe`] is identified by its `slug`, a case-sensitive key that is unique
//! across the collection. Everything else is plain data.
//!
//! ## Timestamps
//!
//! `createDate` and `updateDate` are milliseconds since the Unix epoch. The store
//! owns both: `createDate` is assigned once by `add` and never changes, and
//! `updateDate` moves forward on every successful mutation. Whatever a caller
//! puts in these fields before handing a recipe to the store is overwritten.
//!
//! ## Wire Format
//!
//! Field names serialize in camelCase (`imageUrl`, `ingredientGroups`, ...) so
//! snapshots stay readable by anything that already consumes them. Collection
//! fields default to empty when missing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source: String,
    pub tags: Vec<String>,
    pub ingredient_groups: Vec<IngredientGroup>,
    pub directions: Vec<DirectionStep>,
    pub create_date: i64,
    pub update_date: i64,
}

impl Recipe {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientGroup {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub name: String,
    pub prep: String,
    pub text: String,
}

impl Ingredient {
    /// An ingredient known only by its free text, as entered in the edit form.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionStep {
    pub text: String,
}

impl DirectionStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Wall-clock time in the unit recipes store their dates in.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
