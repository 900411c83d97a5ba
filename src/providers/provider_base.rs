use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde_json::Value;
use std::collections::HashMap;

use super::{ProviderError, ProviderResult};

/// Abstract provider trait every upstream data source implements
#[async_trait]
pub trait AbstractProvider: Send + Sync {
    /// Short identifier for the provider
    fn get_class_id(&self) -> &str;

    /// Human-readable provider name
    fn get_class_name(&self) -> &str;

    /// HTTP headers the provider sends with every request
    fn build_http_header(&self) -> HashMap<String, String>;

    /// Download JSON content from a URL with optional query parameters
    async fn download(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<Value>;

    /// Download raw content (for bulk payloads parsed by the caller)
    async fn download_raw(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<String>;
}

/// Base provider struct that implements the shared HTTP plumbing
pub struct BaseProvider {
    pub class_id: String,
    pub client: Client,
    pub headers: HashMap<String, String>,
}

impl BaseProvider {
    pub fn new(class_id: String, headers: HashMap<String, String>) -> Self {
        let mut default_headers = reqwest::header::HeaderMap::new();
        for (key, value) in &headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                default_headers.insert(name, val);
            }
        }

        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            class_id,
            client,
            headers,
        }
    }

    /// Make an HTTP GET request
    pub async fn get_request(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<Response> {
        let mut request = self.client.get(url);
        if let Some(p) = params {
            request = request.query(&p);
        }

        request
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Request failed: {}", e)))
    }

    /// Download JSON content
    pub async fn download_json(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<Value> {
        let response = self.checked_response(url, params).await?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("JSON parse error: {}", e)))
    }

    /// Download text content
    pub async fn download_text(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<String> {
        let response = self.checked_response(url, params).await?;
        response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Text download error: {}", e)))
    }

    async fn checked_response(
        &self,
        url: &str,
        params: Option<HashMap<String, String>>,
    ) -> ProviderResult<Response> {
        let response = self.get_request(url, params).await?;
        if !response.status().is_success() {
            return Err(ProviderError::NetworkError(format!(
                "HTTP error {} from {}",
                response.status(),
                url
            )));
        }
        Ok(response)
    }
}

/// Rate limiter for API calls
pub struct RateLimiter {
    last_call: tokio::sync::Mutex<DateTime<Utc>>,
    min_interval: chrono::Duration,
}

impl RateLimiter {
    pub fn new(calls_per_second: f64) -> Self {
        let min_interval = chrono::Duration::milliseconds((1000.0 / calls_per_second) as i64);
        Self {
            last_call: tokio::sync::Mutex::new(DateTime::UNIX_EPOCH),
            min_interval,
        }
    }

    pub async fn wait_if_needed(&self) {
        let now = Utc::now();
        let mut last_call = self.last_call.lock().await;

        let elapsed = now - *last_call;
        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            drop(last_call);
            tokio::time::sleep(
                wait_time
                    .to_std()
                    .unwrap_or(std::time::Duration::from_millis(100)),
            )
            .await;
        }

        *self.last_call.lock().await = Utc::now();
    }
}
