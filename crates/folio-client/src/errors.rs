//! Failure classification and normalization.

use folio_core::NormalizedError;
use tracing::error;

/// Response part of an HTTP failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResponse {
    pub status: u16,
    pub status_text: String,
    /// Response body as received.
    pub data: String,
}

/// A failure raised by the HTTP layer.
///
/// `response` is `None` when nothing came back (DNS, connect, timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub message: String,
    pub response: Option<FailedResponse>,
    /// Request URL without its query string.
    pub url: Option<String>,
}

/// Anything caught while performing a content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaughtError {
    Http(HttpFailure),
    /// Not shaped like an HTTP failure; carries whatever message it had.
    Other(Option<String>),
}

impl CaughtError {
    /// Wrap an arbitrary error value.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        CaughtError::Other(Some(err.to_string()))
    }

    /// A failure with no information at all.
    pub fn unknown() -> Self {
        CaughtError::Other(None)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CaughtError::Http(HttpFailure {
                response: Some(response),
                ..
            }) => Some(response.status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CaughtError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| {
            let mut u = u.clone();
            u.set_query(None);
            u.to_string()
        });

        if let Some(status) = err.status() {
            return CaughtError::Http(HttpFailure {
                message: err.to_string(),
                response: Some(FailedResponse {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                    data: String::new(),
                }),
                url,
            });
        }

        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            return CaughtError::Http(HttpFailure {
                message: err.to_string(),
                response: None,
                url,
            });
        }

        CaughtError::Other(Some(err.to_string()))
    }
}

impl From<serde_json::Error> for CaughtError {
    fn from(err: serde_json::Error) -> Self {
        CaughtError::Other(Some(format!("invalid response body: {}", err)))
    }
}

/// Log `error` and reduce it to the normalized error the caller must return.
///
/// HTTP failures render as `API request failed: <status> - <message>`, with
/// `undefined` in place of the status when no response was received.
/// Everything else renders as `Unknown error: <message>`.
pub fn handle_api_error(error: CaughtError) -> NormalizedError {
    match error {
        CaughtError::Http(failure) => {
            let status = failure.response.as_ref().map(|r| r.status);
            let data = failure.response.as_ref().map(|r| r.data.as_str());
            error!(
                message = %failure.message,
                status = ?status,
                data = ?data,
                url = ?failure.url,
                "API Error"
            );

            match failure.response {
                Some(response) => {
                    let message = if response.status_text.is_empty() {
                        failure.message
                    } else {
                        response.status_text
                    };
                    NormalizedError::http_status(response.status, message, failure.url)
                }
                None => NormalizedError::transport(failure.message, failure.url),
            }
        }
        CaughtError::Other(message) => {
            error!(error = ?message, "Unknown error");
            NormalizedError::unknown(message)
        }
    }
}
