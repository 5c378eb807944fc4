//! API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{AuthorsState, BooksState};
use crate::types::{Author, AuthorId, Book, BookId, BookWithAuthor};
use crate::Error;

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Confirmation body for successful creates
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub node_id: String,
    pub records: usize,
}

fn health_response(service: &str, node_id: &str, records: usize) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: service.to_string(),
        node_id: node_id.to_string(),
        records,
    })
}

// --- Author service ---

pub async fn authors_health(State(state): State<AuthorsState>) -> Json<HealthResponse> {
    health_response("authors", &state.node_id, state.store.len().await)
}

/// List all authors
pub async fn list_authors(State(state): State<AuthorsState>) -> Json<Vec<Author>> {
    tracing::info!("Listing all authors");
    Json(state.store.list().await)
}

/// Get one author
pub async fn get_author(
    State(state): State<AuthorsState>,
    Path(id): Path<AuthorId>,
) -> Result<Json<Author>, ApiError> {
    tracing::info!(author_id = id, "Looking up author");

    match state.store.get(id).await {
        Some(author) => {
            tracing::debug!(author_id = id, name = %author.name, "Author found");
            Ok(Json(author))
        }
        None => {
            tracing::warn!(author_id = id, "Author not found");
            Err(api_error(StatusCode::NOT_FOUND, "Autor no encontrado"))
        }
    }
}

/// Create an author
pub async fn create_author(
    State(state): State<AuthorsState>,
    Json(author): Json<Author>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!(author_id = author.id, name = %author.name, "Creating author");
    let name = author.name.clone();

    match state.store.create(author).await {
        Ok(()) => {
            tracing::info!(name = %name, "Author created");
            Ok(Json(MessageResponse {
                message: format!("Autor {} creado", name),
            }))
        }
        Err(Error::DuplicateId(id)) => {
            let detail = format!("ID de autor ya existe: {}", id);
            tracing::error!("{}", detail);
            Err(api_error(StatusCode::BAD_REQUEST, detail))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create author");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno al crear autor",
            ))
        }
    }
}

// --- Book service ---

pub async fn books_health(State(state): State<BooksState>) -> Json<HealthResponse> {
    health_response("books", &state.node_id, state.store.len().await)
}

/// List all books with their author names
///
/// Author lookups run on a separate task, so a fault while enriching
/// surfaces as a 500 rather than a dropped connection. Lookup failures
/// themselves never reach this point.
pub async fn list_books(
    State(state): State<BooksState>,
) -> Result<Json<Vec<BookWithAuthor>>, ApiError> {
    tracing::info!("Listing all books");

    let books = state.store.list().await;
    let resolver = state.resolver.clone();

    let enriched = tokio::spawn(async move { resolver.enrich_all(books).await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list books");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno al listar libros",
            )
        })?;

    tracing::info!(count = enriched.len(), "Books listed");
    Ok(Json(enriched))
}

/// Get one book with its author name
pub async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<BookId>,
) -> Result<Json<BookWithAuthor>, ApiError> {
    tracing::info!(book_id = id, "Looking up book");

    let Some(book) = state.store.get(id).await else {
        tracing::warn!(book_id = id, "Book not found");
        return Err(api_error(StatusCode::NOT_FOUND, "Libro no encontrado"));
    };

    let resolver = state.resolver.clone();
    let enriched = tokio::spawn(async move { resolver.enrich(book).await })
        .await
        .map_err(|e| {
            tracing::error!(book_id = id, error = %e, "Failed to get book");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno al obtener libro",
            )
        })?;

    tracing::debug!(book_id = id, title = %enriched.book.title, "Book found");
    Ok(Json(enriched))
}

/// Create a book
///
/// `autor_id` is stored as given; it is not checked against the author
/// service.
pub async fn create_book(
    State(state): State<BooksState>,
    Json(book): Json<Book>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!(book_id = book.id, title = %book.title, "Creating book");
    let title = book.title.clone();

    match state.store.create(book).await {
        Ok(()) => {
            tracing::info!(title = %title, "Book created");
            Ok(Json(MessageResponse {
                message: format!("Libro {} creado", title),
            }))
        }
        Err(Error::DuplicateId(id)) => {
            let detail = format!("ID de libro duplicado: {}", id);
            tracing::error!("{}", detail);
            Err(api_error(StatusCode::BAD_REQUEST, detail))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create book");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno al crear libro",
            ))
        }
    }
}
