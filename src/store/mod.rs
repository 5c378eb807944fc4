//! In-memory record stores
//!
//! Each service owns one [`RecordStore`]. Records are keyed by their
//! caller-assigned id and listed in insertion order.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::{Author, Book, Record};
use crate::{Error, Result};

/// Store holding the author service's records
pub type AuthorStore = RecordStore<Author>;

/// Store holding the book service's records
pub type BookStore = RecordStore<Book>;

/// Insertion-ordered record store with O(1) lookup by id
pub struct RecordStore<R> {
    /// Records plus their insertion order (protected by RwLock so that
    /// the duplicate check and the insert in `create` are one step)
    records: RwLock<Records<R>>,
}

struct Records<R> {
    order: Vec<i64>,
    by_id: HashMap<i64, R>,
}

impl<R> Default for Records<R> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::default()),
        }
    }

    /// Create a store pre-populated with `records`
    ///
    /// Later duplicates of an id already seen are dropped.
    pub fn with_data(records: Vec<R>) -> Self {
        let mut inner = Records::default();
        for record in records {
            let id = record.id();
            if inner.by_id.contains_key(&id) {
                tracing::warn!(id, "Skipping duplicate seed record");
                continue;
            }
            inner.order.push(id);
            inner.by_id.insert(id, record);
        }

        Self {
            records: RwLock::new(inner),
        }
    }

    /// All records in insertion order
    pub async fn list(&self) -> Vec<R> {
        let records = self.records.read().await;
        records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id).cloned())
            .collect()
    }

    /// Look up a record by id
    pub async fn get(&self, id: i64) -> Option<R> {
        self.records.read().await.by_id.get(&id).cloned()
    }

    /// Insert `record` unless its id is already taken
    pub async fn create(&self, record: R) -> Result<()> {
        let id = record.id();
        let mut records = self.records.write().await;

        if records.by_id.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }

        records.order.push(id);
        records.by_id.insert(id, record);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_duplicate_id_leaves_store_unchanged() {
        let store = AuthorStore::new();

        store.create(Author::new(1, "Jane Austen")).await.unwrap();
        store.create(Author::new(2, "George Orwell")).await.unwrap();

        let result = store.create(Author::new(1, "Impostor")).await;
        assert!(matches!(result, Err(Error::DuplicateId(1))));

        let authors = store.list().await;
        assert_eq!(
            authors,
            vec![Author::new(1, "Jane Austen"), Author::new(2, "George Orwell")]
        );
    }

    #[tokio::test]
    async fn test_get_returns_stored_record() {
        let store = BookStore::new();
        let book = Book {
            id: 10,
            title: "Emma".to_string(),
            author_id: 4,
            year: Some(1815),
        };

        assert_eq!(store.get(10).await, None);
        store.create(book.clone()).await.unwrap();
        assert_eq!(store.get(10).await, Some(book));
        assert_eq!(store.get(11).await, None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = AuthorStore::new();
        for id in [5, 3, 9, 1] {
            store
                .create(Author::new(id, format!("author-{}", id)))
                .await
                .unwrap();
        }

        let ids: Vec<i64> = store.list().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 3, 9, 1]);
    }

    #[tokio::test]
    async fn test_with_data_skips_duplicates() {
        let store = AuthorStore::with_data(vec![
            Author::new(1, "first"),
            Author::new(1, "second"),
            Author::new(2, "third"),
        ]);

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(1).await.unwrap().name, "first");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_id() {
        let store = Arc::new(BookStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(Book {
                        id: 42,
                        title: format!("copy-{}", i),
                        author_id: 1,
                        year: None,
                    })
                    .await
            }));
        }

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(Error::DuplicateId(42)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.len().await, 1);
    }
}
