//! Content accessors for Folio.
//!
//! [`ContentService`] composes the Content API client and the run cache:
//! every accessor derives a cache key from its parameters, returns cached
//! data when present and otherwise fetches, adapts and stores the result.

pub mod adapter;
pub mod locale;
pub mod posts;
pub mod service;
pub mod settings;

pub use adapter::{PostAdapter, extract_tag_info};
pub use posts::{
    DEFAULT_HIGHLIGHT_FIELDS, DEFAULT_HIGHLIGHT_LIMIT, DEFAULT_INCLUDE, PageOptions,
};
pub use service::ContentService;
pub use settings::DEFAULT_SETTINGS_FIELDS;
