use crate::catalog::memory::PartitionCatalog;
use crate::category::directory::{CategoryDirectory, UNCATEGORIZED, partition_name};
use crate::error::StoreError;
use crate::recipe::types::{Recipe, RecipeDetails, SearchCriteria};

use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Upper bound on partitions scanned concurrently during a fan-out read.
const FAN_OUT_LIMIT: usize = 8;

/// The scatter-gather document store.
///
/// Every mutating operation resolves its target partition through the
/// category directory; every category-unaware read fans out across the
/// current partition set and merges the hits. The partition set is read
/// fresh on each operation, never cached.
pub struct RecipeStore {
    catalog: Arc<PartitionCatalog<Recipe>>,
    directory: Arc<CategoryDirectory<Recipe>>,
}

impl RecipeStore {
    pub fn new(
        catalog: Arc<PartitionCatalog<Recipe>>,
        directory: Arc<CategoryDirectory<Recipe>>,
    ) -> Self {
        Self { catalog, directory }
    }

    /// Stores a new recipe under the acting user.
    ///
    /// A blank or missing category falls back to the sentinel label. The
    /// partition is created on demand, so a never-before-seen category is
    /// not an error.
    pub fn create(&self, details: RecipeDetails, username: &str) -> Recipe {
        let category = match details.category {
            Some(category) if !category.trim().is_empty() => category,
            _ => UNCATEGORIZED.to_string(),
        };

        self.directory.ensure_exists(&category);

        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            title: details.title,
            ingredients: details.ingredients,
            instructions: details.instructions,
            cooking_time: details.cooking_time,
            category,
            created_by: username.to_string(),
        };

        self.catalog
            .insert(&partition_name(&recipe.category), &recipe.id, recipe.clone());

        tracing::debug!("Created recipe {} in category '{}'", recipe.id, recipe.category);
        recipe
    }

    /// Every recipe in every partition. Merge order is unspecified.
    pub async fn get_all(&self) -> Vec<Recipe> {
        self.scatter(|_| true).await
    }

    /// Direct single-partition lookup; no fan-out.
    pub fn find_in_category(&self, category: &str, id: &str) -> Option<Recipe> {
        self.catalog.find_one(&partition_name(category), id)
    }

    /// Fan-out lookup for callers that do not know the category.
    ///
    /// Scans partitions in directory order and short-circuits on the first
    /// hit; `NotFound` only after every category has been checked. This is
    /// the most expensive read in the store — prefer `find_in_category`
    /// when the category is known.
    pub fn find_by_id(&self, id: &str) -> Result<Recipe, StoreError> {
        for category in self.directory.list_categories() {
            if let Some(recipe) = self.find_in_category(&category, id) {
                return Ok(recipe);
            }
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    /// Updates the recipe with the given id.
    ///
    /// A blank or missing category in `details` leaves the category
    /// unchanged and the record updates in place, keeping its id, category
    /// and creator. A different non-empty category triggers a cross-partition
    /// move instead: the record is recreated in the target partition under a
    /// **fresh id** and the old copy removed. Callers holding the old id
    /// must re-resolve after a category change.
    pub fn update(&self, id: &str, details: RecipeDetails) -> Result<Recipe, StoreError> {
        let existing = self.find_by_id(id)?;

        let wants_move = details
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .is_some_and(|target| target != existing.category);
        if wants_move {
            return self.move_recipe(existing, details);
        }

        let updated = Recipe {
            id: existing.id.clone(),
            title: details.title,
            ingredients: details.ingredients,
            instructions: details.instructions,
            cooking_time: details.cooking_time,
            category: existing.category.clone(),
            created_by: existing.created_by.clone(),
        };

        self.catalog.insert(
            &partition_name(&existing.category),
            &existing.id,
            updated.clone(),
        );

        Ok(updated)
    }

    /// Cross-partition move: insert-then-delete, biased toward a transient
    /// duplicate over transient loss. The moved record keeps the original
    /// creator and receives a fresh id.
    fn move_recipe(
        &self,
        existing: Recipe,
        details: RecipeDetails,
    ) -> Result<Recipe, StoreError> {
        let moved = self.create(details, &existing.created_by);

        let old_partition = partition_name(&existing.category);
        if self.catalog.remove(&old_partition, &existing.id).is_none() {
            // A concurrent delete beat us to the old copy; the move still
            // converged on exactly one record.
            tracing::warn!(
                "Recipe {} was already gone from {} during move",
                existing.id,
                old_partition
            );
        }
        self.directory.drop_if_empty(&existing.category);

        tracing::info!(
            "Moved recipe {} from '{}' to '{}' as {}",
            existing.id,
            existing.category,
            moved.category,
            moved.id
        );
        Ok(moved)
    }

    /// Fan-out locate and remove; drops the owning partition if this was its
    /// last recipe.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let recipe = self.find_by_id(id)?;

        self.catalog.remove(&partition_name(&recipe.category), id);
        self.directory.drop_if_empty(&recipe.category);

        tracing::debug!("Deleted recipe {} from category '{}'", id, recipe.category);
        Ok(())
    }

    /// Direct-partition delete without the fan-out locate. Idempotent at
    /// this granularity: removing an id that is not in the partition is a
    /// no-op. Callers wanting not-found semantics check existence first.
    pub fn delete_in_category(&self, category: &str, id: &str) {
        self.catalog.remove(&partition_name(category), id);
        self.directory.drop_if_empty(category);
    }

    /// Every recipe created by the given user, from every partition.
    pub async fn find_by_user(&self, username: &str) -> Vec<Recipe> {
        let username = username.to_string();
        self.scatter(move |recipe| recipe.created_by == username)
            .await
    }

    /// Case-insensitive substring match against titles, across partitions.
    pub async fn search_by_title(&self, keyword: &str) -> Vec<Recipe> {
        let pattern = substring_matcher(keyword);
        self.scatter(move |recipe| pattern.is_match(&recipe.title))
            .await
    }

    /// All recipes of one category. An absent partition yields an empty
    /// result, not an error.
    pub fn search_by_category(&self, category: &str) -> Vec<Recipe> {
        let partition = partition_name(category);
        if !self.catalog.partition_exists(&partition) {
            return Vec::new();
        }
        self.catalog.find_all(&partition)
    }

    /// Recipes cooking in at most `max_minutes` (inclusive), across
    /// partitions. A negative bound matches nothing.
    pub async fn search_by_cooking_time(&self, max_minutes: i64) -> Vec<Recipe> {
        self.scatter(move |recipe| i64::from(recipe.cooking_time) <= max_minutes)
            .await
    }

    /// Case-insensitive substring match against any ingredient element,
    /// across partitions.
    pub async fn search_by_ingredient(&self, keyword: &str) -> Vec<Recipe> {
        let pattern = substring_matcher(keyword);
        self.scatter(move |recipe| {
            recipe
                .ingredients
                .iter()
                .any(|ingredient| pattern.is_match(ingredient))
        })
        .await
    }

    /// ANDs all provided criteria. With a category the search stays inside
    /// that single partition (absent partition yields an empty result);
    /// without one the same predicate fans out across every partition.
    pub async fn advanced_search(&self, criteria: SearchCriteria) -> Vec<Recipe> {
        let filter = criteria_filter(&criteria);

        match criteria.category {
            Some(ref category) if !category.is_empty() => {
                let partition = partition_name(category);
                if !self.catalog.partition_exists(&partition) {
                    return Vec::new();
                }
                self.catalog.find_matching(&partition, filter)
            }
            _ => self.scatter(filter).await,
        }
    }

    /// Scatter-gather: runs the same predicate against every live partition
    /// with bounded parallelism and concatenates the hits. The category set
    /// is read fresh from the directory; merge order across partitions is
    /// unspecified.
    async fn scatter<F>(&self, filter: F) -> Vec<Recipe>
    where
        F: Fn(&Recipe) -> bool + Send + Sync + 'static,
    {
        let filter = Arc::new(filter);
        let limiter = Arc::new(Semaphore::new(FAN_OUT_LIMIT));
        let mut scans = JoinSet::new();

        for category in self.directory.list_categories() {
            let catalog = self.catalog.clone();
            let filter = filter.clone();
            let limiter = limiter.clone();

            scans.spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .expect("fan-out semaphore closed");
                catalog.find_matching(&partition_name(&category), |recipe| filter(recipe))
            });
        }

        let mut merged = Vec::new();
        while let Some(scan) = scans.join_next().await {
            match scan {
                Ok(mut hits) => merged.append(&mut hits),
                Err(e) => tracing::error!("Partition scan failed: {}", e),
            }
        }
        merged
    }
}

/// Compiles a keyword into a case-insensitive literal substring matcher.
fn substring_matcher(keyword: &str) -> Regex {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .expect("escaped keyword is a valid pattern")
}

/// Builds the AND-of-provided-criteria predicate shared by both advanced
/// search paths. Empty strings count as absent, matching everything.
fn criteria_filter(criteria: &SearchCriteria) -> impl Fn(&Recipe) -> bool + Send + Sync + 'static {
    let title = criteria
        .title
        .as_deref()
        .filter(|keyword| !keyword.is_empty())
        .map(substring_matcher);
    let max_cooking_time = criteria.max_cooking_time;
    let ingredient = criteria
        .ingredient
        .as_deref()
        .filter(|keyword| !keyword.is_empty())
        .map(substring_matcher);

    move |recipe: &Recipe| {
        if let Some(ref pattern) = title
            && !pattern.is_match(&recipe.title)
        {
            return false;
        }
        if let Some(bound) = max_cooking_time
            && i64::from(recipe.cooking_time) > bound
        {
            return false;
        }
        if let Some(ref pattern) = ingredient
            && !recipe
                .ingredients
                .iter()
                .any(|element| pattern.is_match(element))
        {
            return false;
        }
        true
    }
}
