//! Adaptation of raw CMS records for the rendering layer.

use folio_core::{Error, Post, PostTag, RawPost, Result, SiteInformation, TagInfo};
use tracing::debug;
use url::Url;

const TYPE_PREFIX: &str = "type-";
const CATEGORY_PREFIX: &str = "category-";
const SERIES_PREFIX: &str = "series-";
const HASH_PREFIX: &str = "hash-";

/// Value of a derived field when no tag provides it.
pub const DEFAULT_TAG_VALUE: &str = "default";

/// Derive type, category, series and general tags from a tag list.
///
/// `type-` and `category-` tags contribute their slug remainder, `series-`
/// tags their display name. Internal `hash-` tags are skipped; every other
/// tag is collected by name.
pub fn extract_tag_info(tags: &[PostTag]) -> TagInfo {
    let mut info = TagInfo {
        post_type: DEFAULT_TAG_VALUE.to_string(),
        post_category: DEFAULT_TAG_VALUE.to_string(),
        post_series: DEFAULT_TAG_VALUE.to_string(),
        post_general_tags: Vec::new(),
    };

    for tag in tags {
        if let Some(post_type) = tag.slug.strip_prefix(TYPE_PREFIX) {
            info.post_type = post_type.to_string();
        } else if let Some(category) = tag.slug.strip_prefix(CATEGORY_PREFIX) {
            info.post_category = category.to_string();
        } else if tag.slug.starts_with(SERIES_PREFIX) {
            info.post_series = tag.name.clone();
        } else if !tag.slug.starts_with(HASH_PREFIX) {
            info.post_general_tags.push(tag.name.clone());
        }
    }

    info
}

/// Rewrites CMS records into frontend shape.
#[derive(Debug, Clone)]
pub struct PostAdapter {
    site_url: Url,
    cdn_host: Option<String>,
}

impl PostAdapter {
    /// `cdn_host` may be a bare host or a full URL; only its host is used.
    pub fn new(site_url: &str, cdn_host: Option<&str>) -> Result<Self> {
        let site_url = Url::parse(site_url)?;
        let cdn_host = match cdn_host.map(str::trim).filter(|h| !h.is_empty()) {
            None => None,
            Some(host) if host.contains("://") => Some(
                Url::parse(host)?
                    .host_str()
                    .ok_or_else(|| Error::Config(format!("CDN URL has no host: {}", host)))?
                    .to_string(),
            ),
            Some(host) => Some(host.trim_end_matches('/').to_string()),
        };
        Ok(Self { site_url, cdn_host })
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Frontend URL of a post: `<site>/posts/<id>`.
    pub fn post_url(&self, id: &str) -> Result<Url> {
        let base = self.site_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/posts/{}", base, id))?)
    }

    /// Point an asset URL at the CDN host. Unparseable URLs pass through.
    pub fn rewrite_asset(&self, origin: &str) -> String {
        let Some(host) = &self.cdn_host else {
            return origin.to_string();
        };
        match Url::parse(origin) {
            Ok(mut url) => match url.set_host(Some(host)) {
                Ok(()) => url.to_string(),
                Err(e) => {
                    debug!(url = %origin, error = %e, "Cannot rewrite asset host");
                    origin.to_string()
                }
            },
            Err(e) => {
                debug!(url = %origin, error = %e, "Asset URL is not absolute, leaving as is");
                origin.to_string()
            }
        }
    }

    pub fn adapt_post(&self, raw: RawPost) -> Result<Post> {
        let tag_info = extract_tag_info(&raw.tags);
        Ok(Post {
            url: self.post_url(&raw.id)?,
            feature_image: raw.feature_image.as_deref().map(|img| self.rewrite_asset(img)),
            id: raw.id,
            title: raw.title,
            primary_tag: raw.primary_tag,
            tags: raw.tags,
            published_at: raw.published_at,
            comment_id: raw.comment_id,
            excerpt: raw.excerpt,
            html: raw.html,
            tag_info,
        })
    }

    pub fn adapt_settings(&self, mut settings: SiteInformation) -> SiteInformation {
        for image in [
            &mut settings.logo,
            &mut settings.icon,
            &mut settings.cover_image,
        ] {
            if let Some(url) = image.as_mut() {
                *url = self.rewrite_asset(url);
            }
        }
        settings
    }
}
