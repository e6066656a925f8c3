//! Site settings types.

use serde::{Deserialize, Serialize};

/// A navigation entry configured in the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNavigation {
    pub label: String,
    pub url: String,
}

/// Global site settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteInformation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub navigation: Vec<SiteNavigation>,
}

/// `{ "settings": {...} }` wrapper used by the settings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsEnvelope {
    settings: SiteInformation,
}

impl SettingsEnvelope {
    pub fn into_settings(self) -> SiteInformation {
        self.settings
    }
}

/// Site bootstrap data consumed by every page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteData {
    pub site_title: String,
    pub site_description: String,
    pub logo_url: String,
    pub cover_image_url: String,
}

impl SiteData {
    /// Placeholder used when the settings could not be fetched.
    pub fn unavailable() -> Self {
        Self {
            site_title: "Error".to_string(),
            site_description: "Failed to initialize site data".to_string(),
            logo_url: String::new(),
            cover_image_url: "https://example.com/default-cover.jpg".to_string(),
        }
    }
}
