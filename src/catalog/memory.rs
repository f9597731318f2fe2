use dashmap::DashMap;

/// Concurrent in-memory catalog of named partitions.
///
/// Structure: `Partition name -> Document id -> Document`.
/// Used `DashMap` for high-concurrency access: per-entry locking gives
/// atomic single-document operations without a global lock.
pub struct PartitionCatalog<V> {
    partitions: DashMap<String, DashMap<String, V>>,
}

impl<V> PartitionCatalog<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            partitions: DashMap::new(),
        }
    }

    /// Creates the partition if absent. Idempotent; a partition that already
    /// exists is left untouched, documents included.
    pub fn create_partition(&self, name: &str) {
        self.partitions
            .entry(name.to_string())
            .or_insert_with(|| DashMap::new());
    }

    /// Removes the partition and everything in it.
    pub fn drop_partition(&self, name: &str) -> bool {
        self.partitions.remove(name).is_some()
    }

    /// Removes the partition only if it holds zero documents.
    ///
    /// The emptiness check and the removal happen under the same entry lock,
    /// so a document inserted concurrently either keeps the partition alive
    /// or lands after the drop and recreates it.
    pub fn drop_if_empty(&self, name: &str) -> bool {
        self.partitions
            .remove_if(name, |_, documents| documents.is_empty())
            .is_some()
    }

    pub fn partition_exists(&self, name: &str) -> bool {
        self.partitions.contains_key(name)
    }

    /// Names of every partition currently in the catalog, empty ones
    /// included. Order is whatever the underlying map yields.
    pub fn partition_names(&self) -> Vec<String> {
        self.partitions
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Number of documents in the partition; zero if it does not exist.
    pub fn count_documents(&self, name: &str) -> usize {
        self.partitions
            .get(name)
            .map(|documents| documents.len())
            .unwrap_or(0)
    }

    /// Upserts a document, creating the partition on demand.
    ///
    /// Goes through the partition entry lock rather than a plain lookup, so
    /// it cannot interleave with a concurrent `drop_if_empty` on the same
    /// name: the document lands either before the emptiness check or after
    /// the drop, never in a detached partition.
    pub fn insert(&self, name: &str, id: &str, document: V) {
        self.partitions
            .entry(name.to_string())
            .or_insert_with(|| DashMap::new())
            .insert(id.to_string(), document);
    }

    pub fn find_one(&self, name: &str, id: &str) -> Option<V> {
        let documents = self.partitions.get(name)?;
        let document = documents.get(id)?;
        Some(document.value().clone())
    }

    pub fn find_all(&self, name: &str) -> Vec<V> {
        let mut results = Vec::new();
        if let Some(documents) = self.partitions.get(name) {
            for entry in documents.iter() {
                results.push(entry.value().clone());
            }
        }
        results
    }

    /// All documents in the partition matching the predicate.
    pub fn find_matching<F>(&self, name: &str, predicate: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let mut results = Vec::new();
        if let Some(documents) = self.partitions.get(name) {
            for entry in documents.iter() {
                if predicate(entry.value()) {
                    results.push(entry.value().clone());
                }
            }
        }
        results
    }

    /// Removes a document, returning it if it was present. Leaves the
    /// partition in place even when this was its last document; emptying
    /// out a partition is the caller's policy, not the catalog's.
    pub fn remove(&self, name: &str, id: &str) -> Option<V> {
        let documents = self.partitions.get(name)?;
        documents.remove(id).map(|(_, document)| document)
    }
}

impl<V> Default for PartitionCatalog<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
