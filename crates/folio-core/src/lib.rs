//! Folio Core
//!
//! Content types, locale vocabulary and error handling shared by the
//! Folio crates. This crate has minimal dependencies and defines the
//! shape of the data fetched from the CMS Content API.

pub mod error;
pub mod locale;
pub mod post;
pub mod settings;

pub use error::{Error, ErrorKind, NormalizedError, Result};
pub use locale::Locale;
pub use post::{Post, PostTag, PostsEnvelope, RawPost, TagInfo};
pub use settings::{SettingsEnvelope, SiteData, SiteInformation, SiteNavigation};
