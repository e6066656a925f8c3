//! Run configuration read from the environment.

use folio_cache::CacheStore;
use folio_client::{ClientConfig, GatewayCredentials};
use folio_content::PostAdapter;
use folio_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Settings for one generation run.
///
/// Field names are the lowercased environment variable names
/// (`GHOST_URL` -> `ghost_url`).
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// CMS origin.
    pub ghost_url: String,
    /// Content API key.
    pub ghost_key: String,
    #[serde(default = "default_version")]
    pub ghost_version: String,
    #[serde(default = "default_timeout_ms")]
    pub ghost_timeout_ms: u64,
    /// Public URL of the generated site.
    pub site_url: String,
    /// Image proxy host that asset URLs are rewritten to.
    #[serde(default)]
    pub workers_source_url: Option<String>,
    #[serde(default)]
    pub cloudflare_access_id: Option<String>,
    #[serde(default)]
    pub cloudflare_access_secret: Option<String>,
    /// Default cache lifetime. Absent means entries live for the whole run.
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
}

fn default_version() -> String {
    "v5.0".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl SiteSettings {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::default())
    }

    /// Values are kept as strings until serde asks for a number, so keys
    /// and versions such as `0123` or `5.0` reach the client unchanged.
    pub fn from_source(env: config::Environment) -> Result<Self> {
        let settings: Self = config::Config::builder()
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("GHOST_URL", &self.ghost_url),
            ("GHOST_KEY", &self.ghost_key),
            ("SITE_URL", &self.site_url),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Gateway credentials, when both halves are set.
    pub fn gateway(&self) -> Option<GatewayCredentials> {
        match (&self.cloudflare_access_id, &self.cloudflare_access_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some(GatewayCredentials {
                    client_id: id.clone(),
                    client_secret: secret.clone(),
                })
            }
            _ => None,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.ghost_url, &self.ghost_key)
            .with_version(&self.ghost_version)
            .with_timeout(Duration::from_millis(self.ghost_timeout_ms));
        match self.gateway() {
            Some(gateway) => config.with_gateway(gateway),
            None => config,
        }
    }

    pub fn adapter(&self) -> Result<PostAdapter> {
        PostAdapter::new(&self.site_url, self.workers_source_url.as_deref())
    }

    pub fn cache(&self) -> CacheStore {
        CacheStore::with_default_ttl(self.cache_ttl_secs.map(Duration::from_secs))
    }
}
