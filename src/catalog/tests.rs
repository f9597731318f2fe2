//! Partition Catalog Tests
//!
//! Validates partition lifecycle bookkeeping and local document mechanics.
//!
//! ## Test Scopes
//! - **Lifecycle**: create/drop idempotency and the drop-if-empty guard.
//! - **Documents**: insert/find/remove and predicate scans.
//! - **Races**: concurrent writers against the drop/create boundary.

#[cfg(test)]
mod tests {
    use crate::catalog::memory::PartitionCatalog;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct TestDoc {
        id: String,
        label: String,
    }

    fn doc(id: &str, label: &str) -> TestDoc {
        TestDoc {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_create_partition_is_idempotent() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.create_partition("recipe_dessert");
        catalog.insert("recipe_dessert", "a", doc("a", "cake"));

        // Creating again must not wipe existing documents
        catalog.create_partition("recipe_dessert");

        assert_eq!(catalog.partition_count(), 1);
        assert_eq!(catalog.count_documents("recipe_dessert"), 1);
    }

    #[test]
    fn test_insert_creates_partition_on_demand() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        assert!(!catalog.partition_exists("recipe_soup"));
        catalog.insert("recipe_soup", "a", doc("a", "broth"));

        assert!(catalog.partition_exists("recipe_soup"));
        assert_eq!(catalog.find_one("recipe_soup", "a"), Some(doc("a", "broth")));
    }

    #[test]
    fn test_insert_overwrites_existing_document() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.insert("recipe_soup", "a", doc("a", "original"));
        catalog.insert("recipe_soup", "a", doc("a", "updated"));

        assert_eq!(catalog.count_documents("recipe_soup"), 1);
        assert_eq!(
            catalog.find_one("recipe_soup", "a").unwrap().label,
            "updated"
        );
    }

    #[test]
    fn test_find_one_missing_partition_or_document() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        assert!(catalog.find_one("recipe_soup", "a").is_none());

        catalog.insert("recipe_soup", "a", doc("a", "broth"));
        assert!(catalog.find_one("recipe_soup", "b").is_none());
    }

    #[test]
    fn test_find_matching_applies_predicate() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        for i in 0..10 {
            let id = format!("doc-{i}");
            let label = if i % 2 == 0 { "even" } else { "odd" };
            catalog.insert("recipe_misc", &id, doc(&id, label));
        }

        let evens = catalog.find_matching("recipe_misc", |d| d.label == "even");
        assert_eq!(evens.len(), 5);

        let none = catalog.find_matching("recipe_gone", |_| true);
        assert!(none.is_empty());
    }

    #[test]
    fn test_remove_returns_document_and_keeps_partition() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.insert("recipe_soup", "a", doc("a", "broth"));

        let removed = catalog.remove("recipe_soup", "a");
        assert_eq!(removed, Some(doc("a", "broth")));

        // Emptying a partition does not drop it; that is the caller's call
        assert!(catalog.partition_exists("recipe_soup"));
        assert_eq!(catalog.count_documents("recipe_soup"), 0);

        assert!(catalog.remove("recipe_soup", "a").is_none());
    }

    #[test]
    fn test_drop_if_empty_keeps_populated_partition() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.insert("recipe_soup", "a", doc("a", "broth"));

        assert!(!catalog.drop_if_empty("recipe_soup"));
        assert!(catalog.partition_exists("recipe_soup"));
    }

    #[test]
    fn test_drop_if_empty_removes_empty_partition() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.create_partition("recipe_soup");
        assert!(catalog.drop_if_empty("recipe_soup"));
        assert!(!catalog.partition_exists("recipe_soup"));

        // Idempotent on absent partitions
        assert!(!catalog.drop_if_empty("recipe_soup"));
    }

    #[test]
    fn test_partition_names_lists_every_partition() {
        let catalog: PartitionCatalog<TestDoc> = PartitionCatalog::new();

        catalog.create_partition("recipe_dessert");
        catalog.insert("recipe_soup", "a", doc("a", "broth"));

        let mut names = catalog.partition_names();
        names.sort();
        assert_eq!(names, vec!["recipe_dessert", "recipe_soup"]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_drops_never_lose_documents() {
        let catalog: Arc<PartitionCatalog<TestDoc>> = Arc::new(PartitionCatalog::new());

        // Hammer the same partition with writers racing a dropper. Every
        // insert must survive: either it lands before a drop attempt (the
        // partition is non-empty, so the drop refuses) or after one (the
        // insert recreates the partition).
        let mut handles = Vec::new();
        for i in 0..50 {
            let writer = catalog.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("doc-{i}");
                writer.insert("recipe_contested", &id, doc(&id, "kept"));
            }));

            let dropper = catalog.clone();
            handles.push(tokio::spawn(async move {
                dropper.drop_if_empty("recipe_contested");
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(catalog.count_documents("recipe_contested"), 50);
    }
}
