use crate::catalog::memory::PartitionCatalog;
use std::sync::Arc;

/// Namespace marker every recipe partition name carries.
pub const PARTITION_PREFIX: &str = "recipe_";

/// Fallback category for recipes stored without one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Derives the physical partition name for a category label.
///
/// Pure and deterministic: lower-cases, trims surrounding whitespace,
/// collapses internal whitespace runs to a single underscore, then prefixes
/// the namespace marker. Two labels that normalize to the same string map to
/// the same partition.
pub fn partition_name(category: &str) -> String {
    let normalized = category
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{PARTITION_PREFIX}{normalized}")
}

/// Partition lifecycle bookkeeping over the catalog.
///
/// The directory owns no state of its own; the set of categories is derived
/// from which partitions currently hold documents, read fresh on every call.
pub struct CategoryDirectory<V> {
    catalog: Arc<PartitionCatalog<V>>,
}

impl<V> CategoryDirectory<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(catalog: Arc<PartitionCatalog<V>>) -> Arc<Self> {
        Arc::new(Self { catalog })
    }

    /// De-prefixed labels of every partition that currently contains at
    /// least one document. Order is not meaningful and callers must not
    /// depend on it.
    pub fn list_categories(&self) -> Vec<String> {
        self.catalog
            .partition_names()
            .into_iter()
            .filter(|name| name.starts_with(PARTITION_PREFIX))
            .filter(|name| self.catalog.count_documents(name) > 0)
            .map(|name| name[PARTITION_PREFIX.len()..].to_string())
            .collect()
    }

    /// Creates the category's partition if absent. Idempotent.
    pub fn ensure_exists(&self, category: &str) {
        self.catalog.create_partition(&partition_name(category));
    }

    /// Drops the category's partition if it exists and holds zero documents;
    /// no-op otherwise. Safe to race with concurrent writers: partition
    /// creation is idempotent, so absence-then-recreate always converges.
    pub fn drop_if_empty(&self, category: &str) -> bool {
        self.catalog.drop_if_empty(&partition_name(category))
    }
}
