//! Retrying Content API client.

use crate::config::{ClientConfig, RetryPolicy};
use crate::errors::{CaughtError, FailedResponse, HttpFailure, handle_api_error};
use crate::request::ContentRequest;
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use folio_core::NormalizedError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed `GET` access to the CMS Content API with retry and backoff.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl ContentClient {
    /// Build a client talking HTTP through reqwest.
    pub fn new(config: ClientConfig) -> folio_core::Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config.retry))
    }

    /// Build a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetch `request` and decode the JSON body as `T`.
    ///
    /// Transient failures are retried per the [`RetryPolicy`]; the first
    /// terminal failure, or the last one once attempts run out, is
    /// normalized and returned.
    pub async fn get<T: DeserializeOwned>(
        &self,
        request: &ContentRequest,
    ) -> Result<T, NormalizedError> {
        let mut attempt = 1;
        loop {
            let error = match self.attempt(request).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.retry.should_retry(&error, attempt) {
                debug!(
                    endpoint = %request.endpoint,
                    attempt,
                    "Giving up on Content API request"
                );
                return Err(handle_api_error(error));
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                endpoint = %request.endpoint,
                attempt,
                status = ?error.status(),
                delay_ms = delay.as_millis() as u64,
                "Content API request failed, will retry"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &ContentRequest,
    ) -> Result<T, CaughtError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(failed_status(response));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

fn failed_status(response: RawResponse) -> CaughtError {
    CaughtError::Http(HttpFailure {
        message: format!("Request failed with status code {}", response.status),
        response: Some(FailedResponse {
            status: response.status,
            status_text: response.status_text,
            data: response.body,
        }),
        url: Some(response.url),
    })
}
