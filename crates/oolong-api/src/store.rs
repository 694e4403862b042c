//! In-memory repository adapter.
//!
//! The document store behind the repository boundary for single-process
//! deployments and tests: an insertion-ordered map behind a read-write
//! lock. Every trait method is one atomic operation under the lock, which
//! is what the pipeline's concurrency model asks of an adapter.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use oolong_core::record::{generate_record_id, is_well_formed_record_id};
use oolong_core::{RepoError, Tea, TeaRepository};

/// Insertion-ordered in-memory tea store.
#[derive(Debug, Default)]
pub struct MemoryTeaStore {
    teas: RwLock<IndexMap<String, Tea>>,
}

impl MemoryTeaStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teas.read().len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teas.read().is_empty()
    }

    fn check_id(id: &str) -> Result<(), RepoError> {
        if is_well_formed_record_id(id) {
            Ok(())
        } else {
            Err(RepoError::InvalidId(id.to_string()))
        }
    }
}

#[async_trait]
impl TeaRepository for MemoryTeaStore {
    async fn list_all(&self) -> Result<Vec<Tea>, RepoError> {
        Ok(self.teas.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Tea, RepoError> {
        Self::check_id(id)?;
        self.teas
            .read()
            .get(id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn create(&self, mut tea: Tea) -> Result<Tea, RepoError> {
        tea.id = generate_record_id();
        self.teas.write().insert(tea.id.clone(), tea.clone());
        Ok(tea)
    }

    async fn update_by_id(&self, tea: Tea) -> Result<(), RepoError> {
        Self::check_id(&tea.id)?;
        let mut teas = self.teas.write();
        match teas.get_mut(&tea.id) {
            Some(slot) => {
                *slot = tea;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepoError> {
        Self::check_id(id)?;
        // shift_remove keeps the listing order of the remaining records.
        self.teas
            .write()
            .shift_remove(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea(name: &str, category: &str) -> Tea {
        Tea {
            id: String::new(),
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_well_formed_id() {
        let store = MemoryTeaStore::new();
        let created = store.create(tea("Green", "Unoxidized")).await.unwrap();

        assert!(is_well_formed_record_id(&created.id));
        assert_eq!(created.name, "Green");
    }

    #[tokio::test]
    async fn test_create_discards_client_supplied_id() {
        let store = MemoryTeaStore::new();
        let mut input = tea("Green", "Unoxidized");
        input.id = "f".repeat(24);

        let created = store.create(input).await.unwrap();
        assert_ne!(created.id, "f".repeat(24));
    }

    #[tokio::test]
    async fn test_find_round_trip() {
        let store = MemoryTeaStore::new();
        let created = store.create(tea("Sencha", "Green")).await.unwrap();

        let found = store.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_not_found() {
        let store = MemoryTeaStore::new();
        let err = store.find_by_id(&"a".repeat(24)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_find_malformed_id_is_invalid() {
        let store = MemoryTeaStore::new();
        let err = store.find_by_id("short").await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let store = MemoryTeaStore::new();
        let created = store.create(tea("Green", "Unoxidized")).await.unwrap();

        let mut updated = tea("Matcha", "Powdered");
        updated.id = created.id.clone();
        store.update_by_id(updated).await.unwrap();

        let found = store.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Matcha");
        assert_eq!(found.category, "Powdered");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryTeaStore::new();
        let mut input = tea("Matcha", "Powdered");
        input.id = "a".repeat(24);

        let err = store.update_by_id(input).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryTeaStore::new();
        let created = store.create(tea("Green", "Unoxidized")).await.unwrap();

        store.delete_by_id(&created.id).await.unwrap();
        assert!(store.is_empty());

        let err = store.find_by_id(&created.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryTeaStore::new();
        let err = store.delete_by_id(&"a".repeat(24)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryTeaStore::new();
        let first = store.create(tea("first", "a")).await.unwrap();
        let second = store.create(tea("second", "b")).await.unwrap();
        let third = store.create(tea("third", "c")).await.unwrap();

        store.delete_by_id(&second.id).await.unwrap();

        let listed = store.list_all().await.unwrap();
        let names: Vec<_> = listed.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, third.id);
    }

    #[tokio::test]
    async fn test_list_empty_store_is_empty_vec() {
        let store = MemoryTeaStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
