use serde::{Deserialize, Serialize};

/// A stored recipe document.
///
/// Lives in exactly one partition at a time; the partition name is derived
/// from `category`. Serialized with camelCase keys, matching the persisted
/// document shape.
///
/// Identity caveat: `id` is unique within the owning partition only, and a
/// category-changing update reassigns it (see `RecipeStore::update`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: u32,
    pub category: String,
    pub created_by: String,
}

/// Write-side input for create and update. Field validation (non-blank
/// title/instructions, at least one ingredient, cooking time >= 1) happens
/// at the DTO layer before this reaches the store.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: u32,
    /// `None` or blank means: sentinel category on create, leave unchanged
    /// on update.
    pub category: Option<String>,
}

/// Composite predicate for advanced search. All provided criteria are ANDed;
/// absent or empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub category: Option<String>,
    pub max_cooking_time: Option<i64>,
    pub ingredient: Option<String>,
}
