//! Author name resolution
//!
//! The book service never stores author names. Every read asks an
//! [`AuthorDirectory`] for the author behind `autor_id` and falls back to
//! [`UNKNOWN_AUTHOR`] when the author is missing or the directory is
//! unavailable. Resolution never fails from the caller's point of view.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, FutureExt, StreamExt};

use crate::types::{Author, AuthorId, Book, BookWithAuthor, UNKNOWN_AUTHOR};
use crate::{Error, Result};

pub mod http;
pub mod memory;

pub use http::HttpAuthorDirectory;
pub use memory::MemoryAuthorDirectory;

/// Default bound on a single author lookup
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default number of lookups in flight while listing books
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 8;

/// Source of author records, typically the remote author service
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Fetch an author by id
    ///
    /// Returns `Ok(None)` when the directory answers that the author does
    /// not exist, and `Err` for any transport or protocol failure.
    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>>;
}

/// Turns author ids into display names for the book read paths
#[derive(Clone)]
pub struct AuthorResolver {
    directory: Arc<dyn AuthorDirectory>,
    timeout: Duration,
    concurrency: usize,
}

impl AuthorResolver {
    pub fn new(directory: Arc<dyn AuthorDirectory>) -> Self {
        Self {
            directory,
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Display name for `author_id`, or [`UNKNOWN_AUTHOR`]
    pub async fn resolve(&self, author_id: AuthorId) -> String {
        tracing::debug!(author_id, "Resolving author");

        match self.lookup(author_id).await {
            Ok(Some(author)) => {
                tracing::debug!(author_id, name = %author.name, "Author resolved");
                author.name
            }
            Ok(None) => {
                tracing::warn!(author_id, "Author not found");
                UNKNOWN_AUTHOR.to_string()
            }
            Err(e) => {
                tracing::error!(author_id, error = %e, "Author service lookup failed");
                UNKNOWN_AUTHOR.to_string()
            }
        }
    }

    /// Attach an author name to one book
    pub async fn enrich(&self, book: Book) -> BookWithAuthor {
        let author_name = self.resolve(book.author_id).await;
        BookWithAuthor { book, author_name }
    }

    /// Attach author names to `books`, keeping their order
    ///
    /// Up to `concurrency` lookups run at once.
    pub async fn enrich_all(&self, books: Vec<Book>) -> Vec<BookWithAuthor> {
        stream::iter(books)
            .map(|book| self.enrich(book))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn lookup(&self, author_id: AuthorId) -> Result<Option<Author>> {
        let fetch = AssertUnwindSafe(self.directory.fetch_author(author_id)).catch_unwind();

        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::internal("author lookup panicked")),
            Err(_) => Err(Error::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}
