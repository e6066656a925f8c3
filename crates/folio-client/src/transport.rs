//! HTTP transport seam.

use crate::config::ClientConfig;
use crate::errors::CaughtError;
use crate::request::ContentRequest;
use async_trait::async_trait;
use folio_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

/// A response as received, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    /// Request URL without its query string.
    pub url: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single request attempt. Retrying is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one `GET`. `Err` means no usable response was obtained.
    async fn send(
        &self,
        request: &ContentRequest,
    ) -> std::result::Result<RawResponse, CaughtError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    content_root: String,
    key: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("accept-version"),
            header_value(&config.version)?,
        );
        if let Some(gateway) = &config.gateway {
            headers.insert(
                HeaderName::from_static("cf-access-client-id"),
                header_value(&gateway.client_id)?,
            );
            headers.insert(
                HeaderName::from_static("cf-access-client-secret"),
                header_value(&gateway.client_secret)?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            content_root: config.content_root(),
            key: config.key.clone(),
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.content_root, endpoint.trim_start_matches('/'))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Config(format!("Invalid header value: {}", e)))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &ContentRequest,
    ) -> std::result::Result<RawResponse, CaughtError> {
        let url = self.url_for(&request.endpoint);
        debug!(url = %url, "Sending Content API request");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.key.as_str())])
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        // The content key travels in the query string; keep it out of logs.
        let mut response_url = response.url().clone();
        response_url.set_query(None);
        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
            url: response_url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_paths() {
        let transport =
            ReqwestTransport::new(&ClientConfig::new("https://cms.example.com", "k")).unwrap();
        assert_eq!(
            transport.url_for("/posts/"),
            "https://cms.example.com/ghost/api/content/posts/"
        );
        assert_eq!(
            transport.url_for("settings/"),
            "https://cms.example.com/ghost/api/content/settings/"
        );
    }

    #[test]
    fn test_invalid_header_is_a_config_error() {
        let config = ClientConfig::new("https://cms.example.com", "k").with_version("v5\n");
        assert!(matches!(ReqwestTransport::new(&config), Err(Error::Config(_))));
    }
}
