//! Author directory backed by the author service's HTTP API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::AUTHORS_PATH;
use crate::resolver::AuthorDirectory;
use crate::types::{Author, AuthorId};
use crate::{Error, Result};

/// Fetches authors with `GET {base_url}/autores/{id}`
pub struct HttpAuthorDirectory {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAuthorDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn author_url(&self, id: AuthorId) -> String {
        format!("{}{}/{}", self.base_url, AUTHORS_PATH, id)
    }
}

#[async_trait]
impl AuthorDirectory for HttpAuthorDirectory {
    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>> {
        let response = self.http_client.get(self.author_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::upstream(format!(
                "GET author {} failed: {}",
                id,
                response.status()
            )));
        }

        let author: Author = response.json().await?;
        Ok(Some(author))
    }
}
