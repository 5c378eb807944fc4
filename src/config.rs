use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::resolver::{DEFAULT_RESOLVE_CONCURRENCY, DEFAULT_RESOLVE_TIMEOUT};

const DEFAULT_AUTHORS_PORT: u16 = 8001;
const DEFAULT_BOOKS_PORT: u16 = 8000;
const DEFAULT_AUTHOR_SERVICE_URL: &str = "http://autores-service:8001";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceKind,
    pub node_id: Option<String>,
    pub server: ServerConfig,
    pub authors: AuthorsSection,
    pub books: BooksSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// Environment keys use `BIBLIOTECA_` as prefix and `__` between
    /// sections, e.g. `BIBLIOTECA_BOOKS__AUTHOR_SERVICE_URL`.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("BIBLIOTECA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BIBLIOTECA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Check settings the selected service depends on.
    pub fn validate(&self) -> Result<()> {
        if self.service == ServiceKind::Books {
            let url = self.books.author_service_url.trim();
            if url.is_empty() {
                bail!("books.author_service_url must be specified");
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!(
                    "books.author_service_url must be an http(s) URL, got '{}'",
                    url
                );
            }
            if self.books.request_timeout_ms == 0 {
                bail!("books.request_timeout_ms must be greater than zero");
            }
            if self.books.resolve_concurrency == 0 {
                bail!("books.resolve_concurrency must be greater than zero");
            }
        }

        Ok(())
    }

    /// Address to bind, with the per-service default port.
    pub fn bind_addr(&self) -> String {
        let port = self.server.port.unwrap_or(match self.service {
            ServiceKind::Authors => DEFAULT_AUTHORS_PORT,
            ServiceKind::Books => DEFAULT_BOOKS_PORT,
        });
        format!("{}:{}", self.server.host, port)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[serde(alias = "autores")]
    Authors,
    #[default]
    #[serde(alias = "libros")]
    Books,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Authors => "authors",
            ServiceKind::Books => "books",
        }
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "authors" | "autores" => Ok(ServiceKind::Authors),
            "books" | "libros" => Ok(ServiceKind::Books),
            other => anyhow::bail!("unsupported service: {}", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthorsSection {
    /// Start with the built-in author list
    pub seed_defaults: bool,
}

impl Default for AuthorsSection {
    fn default() -> Self {
        Self {
            seed_defaults: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BooksSection {
    pub author_service_url: String,
    pub request_timeout_ms: u64,
    pub resolve_concurrency: usize,
}

impl BooksSection {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BooksSection {
    fn default() -> Self {
        Self {
            author_service_url: DEFAULT_AUTHOR_SERVICE_URL.to_string(),
            request_timeout_ms: DEFAULT_RESOLVE_TIMEOUT.as_millis() as u64,
            resolve_concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
