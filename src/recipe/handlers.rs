use crate::category::directory::CategoryDirectory;
use crate::error::{ApiError, ValidationError};
use crate::recipe::store::RecipeStore;
use crate::recipe::types::{Recipe, RecipeDetails, SearchCriteria};

use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Write-side DTO. Identity never travels in the body; it comes from the
/// gateway-set header.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: u32,
    #[serde(default)]
    pub category: Option<String>,
}

impl RecipeRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        if self.instructions.trim().is_empty() {
            return Err(ValidationError::MissingInstructions);
        }
        if self.cooking_time < 1 {
            return Err(ValidationError::CookingTimeTooShort);
        }
        Ok(())
    }

    fn into_details(self) -> RecipeDetails {
        RecipeDetails {
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: self.cooking_time,
            category: self.category,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSearchParams {
    pub title: Option<String>,
    pub category: Option<String>,
    pub max_cooking_time: Option<i64>,
    pub ingredient: Option<String>,
}

/// Caller identity as asserted by the upstream gateway. Authentication and
/// role checks happen there; this layer only refuses requests that arrive
/// with no identity at all.
fn caller_identity(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-username")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|username| !username.is_empty())
        .ok_or(ApiError::MissingIdentity)
}

pub async fn handle_create_recipe(
    Extension(store): Extension<Arc<RecipeStore>>,
    headers: HeaderMap,
    Json(req): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let username = caller_identity(&headers)?;
    req.validate()?;

    let recipe = store.create(req.into_details(), &username);
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn handle_get_all_recipes(
    Extension(store): Extension<Arc<RecipeStore>>,
) -> Json<Vec<Recipe>> {
    Json(store.get_all().await)
}

pub async fn handle_get_recipe(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = store.find_by_id(&id)?;
    Ok(Json(recipe))
}

pub async fn handle_get_recipe_in_category(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = store
        .find_in_category(&category, &id)
        .ok_or(crate::error::StoreError::NotFound(id))?;
    Ok(Json(recipe))
}

pub async fn handle_update_recipe(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(id): Path<String>,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    req.validate()?;

    let updated = store.update(&id, req.into_details())?;
    Ok(Json(updated))
}

pub async fn handle_delete_recipe(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_delete_recipe_in_category(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    // The direct-partition delete is a no-op on absent ids; check first so
    // the route can answer 404 instead of a hollow 204.
    if store.find_in_category(&category, &id).is_none() {
        return Err(crate::error::StoreError::NotFound(id).into());
    }

    store.delete_in_category(&category, &id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_my_recipes(
    Extension(store): Extension<Arc<RecipeStore>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let username = caller_identity(&headers)?;
    Ok(Json(store.find_by_user(&username).await))
}

pub async fn handle_list_categories(
    Extension(directory): Extension<Arc<CategoryDirectory<Recipe>>>,
) -> Json<Vec<String>> {
    Json(directory.list_categories())
}

pub async fn handle_search_by_title(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(title): Path<String>,
) -> Json<Vec<Recipe>> {
    Json(store.search_by_title(&title).await)
}

pub async fn handle_search_by_category(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(category): Path<String>,
) -> Json<Vec<Recipe>> {
    Json(store.search_by_category(&category))
}

pub async fn handle_search_by_cooking_time(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(minutes): Path<i64>,
) -> Json<Vec<Recipe>> {
    Json(store.search_by_cooking_time(minutes).await)
}

pub async fn handle_search_by_ingredient(
    Extension(store): Extension<Arc<RecipeStore>>,
    Path(ingredient): Path<String>,
) -> Json<Vec<Recipe>> {
    Json(store.search_by_ingredient(&ingredient).await)
}

pub async fn handle_advanced_search(
    Extension(store): Extension<Arc<RecipeStore>>,
    Query(params): Query<AdvancedSearchParams>,
) -> Json<Vec<Recipe>> {
    let criteria = SearchCriteria {
        title: params.title,
        category: params.category,
        max_cooking_time: params.max_cooking_time,
        ingredient: params.ingredient,
    };
    Json(store.advanced_search(criteria).await)
}
