//! In-memory document collection for tests and database-less runs.

use std::sync::RwLock;

use crate::error::{Result, StoreError};

/// Insertion-ordered collection of documents keyed by a string id.
///
/// Every operation is a single critical section, so appends and replaces are
/// atomic with respect to each other.
pub struct MemoryCollection<T> {
    documents: RwLock<Vec<(String, T)>>,
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, id: &str, document: T) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if documents.iter().any(|(key, _)| key == id) {
            return Err(StoreError::Backend(format!("duplicate key '{}'", id)));
        }
        documents.push((id.to_string(), document));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<T> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        documents
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, document)| document.clone())
            .ok_or(StoreError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<T>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(documents.iter().map(|(_, document)| document.clone()).collect())
    }

    /// Overwrite the whole document stored under `id`.
    pub fn replace(&self, id: &str, document: T) -> Result<()> {
        self.update(id, |stored| *stored = document)
    }

    /// Mutate the stored document in place.
    pub fn update<F>(&self, id: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let (_, stored) = documents
            .iter_mut()
            .find(|(key, _)| key == id)
            .ok_or(StoreError::NotFound)?;
        apply(stored);
        Ok(())
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let position = documents
            .iter()
            .position(|(key, _)| key == id)
            .ok_or(StoreError::NotFound)?;
        documents.remove(position);
        Ok(())
    }
}

impl<T: Clone> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_preserves_insertion_order() {
        let collection = MemoryCollection::new();
        collection.insert("b", 2).unwrap();
        collection.insert("a", 1).unwrap();
        collection.insert("c", 3).unwrap();

        assert_eq!(collection.list().unwrap(), vec![2, 1, 3]);
    }

    #[test]
    fn empty_collection_lists_nothing() {
        let collection: MemoryCollection<String> = MemoryCollection::new();
        assert!(collection.list().unwrap().is_empty());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let collection = MemoryCollection::new();
        collection.insert("a", 1).unwrap();

        let err = collection.insert("a", 2).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(collection.get("a").unwrap(), 1);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let collection: MemoryCollection<u32> = MemoryCollection::new();

        assert!(matches!(collection.get("x"), Err(StoreError::NotFound)));
        assert!(matches!(collection.replace("x", 1), Err(StoreError::NotFound)));
        assert!(matches!(collection.remove("x"), Err(StoreError::NotFound)));
    }

    #[test]
    fn remove_twice_reports_not_found() {
        let collection = MemoryCollection::new();
        collection.insert("a", 1).unwrap();

        collection.remove("a").unwrap();
        assert!(matches!(collection.remove("a"), Err(StoreError::NotFound)));
    }

    #[test]
    fn update_mutates_in_place() {
        let collection = MemoryCollection::new();
        collection.insert("a", vec!["first".to_string()]).unwrap();

        collection
            .update("a", |log| log.push("second".to_string()))
            .unwrap();

        assert_eq!(collection.get("a").unwrap(), vec!["first", "second"]);
    }
}
