//! Biblioteca server binary
//!
//! Runs the author service or the book service. The service comes from the
//! first command-line argument when given, otherwise from configuration.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use biblioteca::api::{create_authors_router, create_books_router, AuthorsState, BooksState};
use biblioteca::config::{AppConfig, LogFormat, ServiceKind};
use biblioteca::resolver::{AuthorResolver, HttpAuthorDirectory};
use biblioteca::store::{AuthorStore, BookStore};
use biblioteca::types::default_authors;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("failed to load configuration")?;

    if let Some(arg) = std::env::args().nth(1) {
        config.service = arg.parse::<ServiceKind>()?;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config)?;

    let node_id = resolve_node_id(&config);
    tracing::info!(%node_id, service = config.service.as_str(), "Starting biblioteca node");

    let router = match config.service {
        ServiceKind::Authors => create_authors_router(build_authors_state(&config, node_id)),
        ServiceKind::Books => create_books_router(build_books_state(&config, node_id)?),
    };

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn resolve_node_id(config: &AppConfig) -> String {
    config
        .node_id
        .clone()
        .or_else(|| hostname::get().ok().and_then(|h| h.into_string().ok()))
        .unwrap_or_else(|| format!("biblioteca-{}", config.service.as_str()))
}

fn build_authors_state(config: &AppConfig, node_id: String) -> AuthorsState {
    let store = if config.authors.seed_defaults {
        let authors = default_authors();
        tracing::info!(count = authors.len(), "Seeding default authors");
        AuthorStore::with_data(authors)
    } else {
        AuthorStore::new()
    };

    AuthorsState::new(Arc::new(store), node_id)
}

fn build_books_state(config: &AppConfig, node_id: String) -> anyhow::Result<BooksState> {
    let books = &config.books;

    let directory = HttpAuthorDirectory::new(&books.author_service_url, books.request_timeout())
        .context("failed to build author service client")?;
    tracing::info!(
        url = %directory.base_url(),
        timeout_ms = books.request_timeout_ms,
        concurrency = books.resolve_concurrency,
        "Resolving authors over HTTP",
    );

    let resolver = AuthorResolver::new(Arc::new(directory))
        .with_timeout(books.request_timeout())
        .with_concurrency(books.resolve_concurrency);

    Ok(BooksState::new(Arc::new(BookStore::new()), resolver, node_id))
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("biblioteca=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
