//! Snapshot Document Sources
//!
//! A snapshot is fetched exactly once per load, either with an HTTP(S) GET
//! against a relative path under a base URL, or read from a local file.
//! Failures surface as [`LoadError`]; nothing is retried.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::SourceConfig;
use crate::core::sheet::error::{LoadError, Result};
use crate::core::sheet::types::RawDocument;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Where the document comes from, for logs and errors.
    fn location(&self) -> String;

    /// Retrieve the raw document bytes.
    async fn fetch(&self) -> Result<Vec<u8>>;
}

// ============================================================================
// HTTP
// ============================================================================

pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Resolve `path` against `base_url`. The base is treated as a directory
    /// even without a trailing slash.
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let url = base.join(path)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let url = self.url.to_string();
        debug!(%url, "Fetching sheet document");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LoadError::Http { url, source })?;
        Ok(body.to_vec())
    }
}

// ============================================================================
// File
// ============================================================================

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        debug!(path = %self.path.display(), "Reading sheet document");
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Build the source described by configuration: HTTP when a base URL is
/// set, otherwise a local file at `path`.
pub fn source_from_config(config: &SourceConfig) -> Result<Box<dyn DocumentSource>> {
    match config.base_url.as_deref() {
        Some(base_url) => Ok(Box::new(HttpSource::new(
            base_url,
            &config.path,
            Duration::from_secs(config.timeout_secs),
        )?)),
        None => Ok(Box::new(FileSource::new(&config.path))),
    }
}

/// Fetch, parse and validate a document.
pub async fn load_document(source: &dyn DocumentSource) -> Result<RawDocument> {
    let bytes = source.fetch().await?;
    let document = RawDocument::from_slice(&bytes)?;

    info!(
        location = %source.location(),
        bytes = bytes.len(),
        actors = document.player_data.len(),
        "Sheet document loaded"
    );
    Ok(document)
}
