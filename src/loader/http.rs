//! HTTP dictionary loader
//!
//! Fetches a translation dictionary document from a URL. The response body
//! must be the full `{ "LANG": { "token": "text" } }` JSON object.
//!
//! # Example
//!
//! ```ignore
//! use keyplate::{DictionaryLoader, HttpLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = HttpLoader::new()?;
//!     let dictionary = loader.load("https://example.org/i18n.json").await?;
//!     println!("{:?}", dictionary.languages().collect::<Vec<_>>());
//!     Ok(())
//! }
//! ```

use crate::dictionary::TranslationDictionary;
use crate::error::{TemplateError, TemplateResult};
use crate::loader::source::DictionaryLoader;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Loads dictionaries over HTTP(S)
///
/// No retries are performed; a failed request fails the load.
#[derive(Clone)]
pub struct HttpLoader {
    /// HTTP client for async requests
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLoader {
    /// Default request timeout
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a loader with the default 30 second request timeout
    ///
    /// # Errors
    /// - `ConfigError` if the HTTP client cannot be built
    pub fn new() -> TemplateResult<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a loader with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> TemplateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TemplateError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for HttpLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLoader")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl DictionaryLoader for HttpLoader {
    async fn load(&self, reference: &str) -> TemplateResult<TranslationDictionary> {
        if !(reference.starts_with("http://") || reference.starts_with("https://")) {
            return Err(TemplateError::DictionaryLoadError(format!(
                "Not an HTTP(S) URL: {}",
                reference
            )));
        }

        let response = self.client.get(reference).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(TemplateError::DictionaryLoadError(format!(
                "Request to '{}' failed ({}): {}",
                reference, status, error_text
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TemplateError::DictionaryLoadError(format!(
                "Failed to parse response from '{}': {}",
                reference, e
            ))
        })?;

        let dictionary = TranslationDictionary::from_json(&json, reference)?;
        debug!(
            "Fetched {} language(s) from '{}'",
            dictionary.0.len(),
            reference
        );
        Ok(dictionary)
    }

    fn loader_name(&self) -> &str {
        "HTTP Loader"
    }
}
