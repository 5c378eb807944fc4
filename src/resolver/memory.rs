//! Author directory reading an in-process author store

use std::sync::Arc;

use async_trait::async_trait;

use crate::resolver::AuthorDirectory;
use crate::store::AuthorStore;
use crate::types::{Author, AuthorId};
use crate::Result;

/// Resolves authors straight from an [`AuthorStore`], skipping the network
#[derive(Clone)]
pub struct MemoryAuthorDirectory {
    store: Arc<AuthorStore>,
}

impl MemoryAuthorDirectory {
    pub fn new(store: Arc<AuthorStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthorDirectory for MemoryAuthorDirectory {
    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>> {
        Ok(self.store.get(id).await)
    }
}
