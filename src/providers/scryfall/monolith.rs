use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tokio::time::{sleep, Duration};

use super::sf_utils;
use crate::classes::ScryfallCard;
use crate::providers::{
    AbstractProvider, BaseProvider, ProviderError, ProviderResult, RateLimiter,
};

/// Scryfall bulk data provider: resolves the current `default_cards` download
/// URI from the bulk-data listing and fetches the full catalog, persisting
/// the raw payload on disk so reruns skip the download.
pub struct ScryfallProvider {
    base: BaseProvider,
    rate_limiter: RateLimiter,
}

impl ScryfallProvider {
    const BULK_DATA_URL: &'static str = "https://api.scryfall.com/bulk-data";
    const DEFAULT_CARDS_TYPE: &'static str = "default_cards";

    pub fn new() -> Self {
        let headers = sf_utils::build_http_header();
        Self {
            base: BaseProvider::new("sf".to_string(), headers),
            // Scryfall asks for 50-100ms between requests
            rate_limiter: RateLimiter::new(10.0),
        }
    }

    /// Resolve the download URI of the `default_cards` bulk export.
    pub async fn default_cards_download_uri(&self) -> ProviderResult<String> {
        let listing = self.download(Self::BULK_DATA_URL, None).await?;
        let entries = listing
            .get("data")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::ParseError("bulk-data listing has no data array".to_string())
            })?;

        entries
            .iter()
            .find(|entry| {
                entry.get("type").and_then(|v| v.as_str()) == Some(Self::DEFAULT_CARDS_TYPE)
            })
            .and_then(|entry| entry.get("download_uri").and_then(|v| v.as_str()))
            .map(|uri| uri.to_string())
            .ok_or_else(|| {
                ProviderError::ParseError(
                    "no default_cards entry in bulk-data listing".to_string(),
                )
            })
    }

    /// Load the raw catalog, reusing `cache_path` when it already exists. A
    /// fresh download is written to disk before parsing.
    pub async fn default_cards(&self, cache_path: &Path) -> ProviderResult<Vec<ScryfallCard>> {
        let payload = if cache_path.exists() {
            info!("Using existing card data at {}", cache_path.display());
            fs::read_to_string(cache_path)?
        } else {
            info!("Downloading fresh card data");
            let uri = self.default_cards_download_uri().await?;
            info!("Download uri: {}", uri);
            let body = self.download_raw(&uri, None).await?;
            if let Some(parent) = cache_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(cache_path, &body)?;
            info!("Finished writing raw catalog to {}", cache_path.display());
            body
        };

        serde_json::from_str(&payload)
            .map_err(|e| ProviderError::ParseError(format!("default_cards parse error: {}", e)))
    }
}

impl Default for ScryfallProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AbstractProvider for ScryfallProvider {
    fn get_class_id(&self) -> &str {
        &self.base.class_id
    }

    fn get_class_name(&self) -> &str {
        "ScryfallProvider"
    }

    fn build_http_header(&self) -> HashMap<String, String> {
        self.base.headers.clone()
    }

    async fn download(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<Value> {
        self.rate_limiter.wait_if_needed().await;

        // Retry transient network failures before giving up
        for retry in 0..3 {
            match self.base.download_json(url, params.clone()).await {
                Ok(result) => return Ok(result),
                Err(ProviderError::NetworkError(msg)) if retry < 2 => {
                    warn!("Retrying {} after network error: {}", url, msg);
                    sleep(Duration::from_secs(3 - retry as u64)).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ProviderError::NetworkError(format!(
            "Max retries exceeded for {}",
            url
        )))
    }

    async fn download_raw(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<String> {
        self.rate_limiter.wait_if_needed().await;
        self.base.download_text(url, params).await
    }
}
