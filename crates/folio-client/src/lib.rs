//! CMS Content API client for Folio.
//!
//! [`ContentClient`] issues authenticated `GET` requests, retries transient
//! failures with exponential backoff and reduces every terminal failure to a
//! [`folio_core::NormalizedError`] through [`errors::handle_api_error`].

pub mod client;
pub mod config;
pub mod errors;
pub mod request;
pub mod transport;

pub use client::ContentClient;
pub use config::{ClientConfig, GatewayCredentials, RetryPolicy};
pub use errors::{CaughtError, FailedResponse, HttpFailure, handle_api_error};
pub use request::{ContentRequest, QueryValue};
pub use transport::{RawResponse, ReqwestTransport, Transport};
