//! API server state for each service

use std::sync::Arc;

use crate::resolver::{AuthorDirectory, AuthorResolver};
use crate::store::{AuthorStore, BookStore};
use crate::types::default_authors;

/// Author service state
#[derive(Clone)]
pub struct AuthorsState {
    /// Author records
    pub store: Arc<AuthorStore>,

    /// Identity reported by the health endpoint
    pub node_id: String,
}

impl AuthorsState {
    pub fn new(store: Arc<AuthorStore>, node_id: impl Into<String>) -> Self {
        Self {
            store,
            node_id: node_id.into(),
        }
    }

    /// State whose store starts with the default authors
    pub fn seeded(node_id: impl Into<String>) -> Self {
        Self::new(Arc::new(AuthorStore::with_data(default_authors())), node_id)
    }
}

/// Book service state
#[derive(Clone)]
pub struct BooksState {
    /// Book records
    pub store: Arc<BookStore>,

    /// Resolves `autor_id` to a display name on every read
    pub resolver: AuthorResolver,

    /// Identity reported by the health endpoint
    pub node_id: String,
}

impl BooksState {
    pub fn new(
        store: Arc<BookStore>,
        resolver: AuthorResolver,
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            resolver,
            node_id: node_id.into(),
        }
    }

    /// Empty book store resolving authors through `directory` with default limits
    pub fn with_directory(directory: Arc<dyn AuthorDirectory>, node_id: impl Into<String>) -> Self {
        Self::new(
            Arc::new(BookStore::new()),
            AuthorResolver::new(directory),
            node_id,
        )
    }
}
