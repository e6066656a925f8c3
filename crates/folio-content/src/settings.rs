//! Site settings accessors.

use crate::service::ContentService;
use folio_client::ContentRequest;
use folio_core::{Error, Result, SettingsEnvelope, SiteData, SiteInformation};
use tracing::error;

const SETTINGS_ENDPOINT: &str = "settings/";

pub const DEFAULT_SETTINGS_FIELDS: &str =
    "title,description,logo,icon,cover_image,twitter,timezone,navigation";

impl ContentService {
    /// Global site settings with image URLs pointed at the CDN.
    pub async fn get_site_information(&self, fields: &str) -> Result<SiteInformation> {
        let request = ContentRequest::new(SETTINGS_ENDPOINT).param("fields", fields);

        self.cached("site_information", fields, move |service| {
            let request = request.clone();
            async move {
                let envelope: SettingsEnvelope = service.client.get(&request).await?;
                Ok::<_, Error>(service.adapter.adapt_settings(envelope.into_settings()))
            }
        })
        .await
    }

    /// Data every layout needs. Falls back to a placeholder when the
    /// settings cannot be fetched.
    pub async fn initialize_site_data(&self) -> SiteData {
        match self.get_site_information(DEFAULT_SETTINGS_FIELDS).await {
            Ok(info) => SiteData {
                site_title: info.title,
                site_description: info.description,
                logo_url: info.logo.unwrap_or_default(),
                cover_image_url: info.cover_image.unwrap_or_default(),
            },
            Err(e) => {
                error!(error = %e, "Failed to initialize site data");
                SiteData::unavailable()
            }
        }
    }
}
