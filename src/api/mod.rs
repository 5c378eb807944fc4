//! HTTP API servers for the author and book services

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;

pub use state::{AuthorsState, BooksState};

/// Collection path of the author service
pub const AUTHORS_PATH: &str = "/autores";
/// Collection path of the book service
pub const BOOKS_PATH: &str = "/libros";

/// Build the author service router
pub fn create_authors_router(state: AuthorsState) -> Router {
    Router::new()
        .route("/health", get(handlers::authors_health))
        .route(
            AUTHORS_PATH,
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route(&format!("{}/:id", AUTHORS_PATH), get(handlers::get_author))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the book service router
pub fn create_books_router(state: BooksState) -> Router {
    Router::new()
        .route("/health", get(handlers::books_health))
        .route(
            BOOKS_PATH,
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(&format!("{}/:id", BOOKS_PATH), get(handlers::get_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
