//! Command handlers.

use folio_content::{
    ContentService, DEFAULT_HIGHLIGHT_FIELDS, DEFAULT_HIGHLIGHT_LIMIT, DEFAULT_INCLUDE,
    PageOptions,
};
use folio_core::Locale;
use serde::Serialize;
use serde_json::json;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn highlights(
    service: &ContentService,
    limit: u32,
    fields: &str,
    include: &str,
) -> anyhow::Result<()> {
    let posts = service.get_highlight_posts(limit, fields, include).await?;
    print_json(&posts)
}

pub async fn posts(service: &ContentService, include: &str) -> anyhow::Result<()> {
    let posts = service.get_posts(include).await?;
    print_json(&posts)
}

pub async fn settings(service: &ContentService, fields: &str) -> anyhow::Result<()> {
    let info = service.get_site_information(fields).await?;
    print_json(&info)
}

pub async fn site(service: &ContentService) -> anyhow::Result<()> {
    print_json(&service.initialize_site_data().await)
}

pub async fn locale(
    service: &ContentService,
    locale: Locale,
    page: u32,
    limit: u32,
) -> anyhow::Result<()> {
    let posts = service
        .list_posts_by_locale(locale, PageOptions { page, limit })
        .await?;
    print_json(&posts)
}

pub async fn translation(
    service: &ContentService,
    key: &str,
    locale: Locale,
) -> anyhow::Result<()> {
    let post = service.get_post_by_group_and_locale(key, locale).await;
    print_json(&post)
}

/// Touch every accessor a full site build uses, twice over for the locale
/// pages, and report how much the cache absorbed.
pub async fn build(service: &ContentService) -> anyhow::Result<()> {
    let site = service.initialize_site_data().await;
    let highlights = service
        .get_highlight_posts(DEFAULT_HIGHLIGHT_LIMIT, DEFAULT_HIGHLIGHT_FIELDS, DEFAULT_INCLUDE)
        .await?;
    let posts = service.get_posts(DEFAULT_INCLUDE).await?;

    let mut per_locale = serde_json::Map::new();
    for locale in Locale::ALL {
        let listed = service
            .list_posts_by_locale(locale, PageOptions::default())
            .await?;
        // Index page and RSS feed both ask for the same listing.
        service
            .list_posts_by_locale(locale, PageOptions::default())
            .await?;
        per_locale.insert(locale.to_string(), json!(listed.len()));
    }

    let stats = service.cache().stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.entries,
        "Build fetch complete"
    );

    print_json(&json!({
        "site_title": site.site_title,
        "highlights": highlights.len(),
        "posts": posts.len(),
        "posts_by_locale": per_locale,
        "cache": {
            "hits": stats.hits,
            "misses": stats.misses,
            "evictions": stats.evictions,
            "entries": stats.entries,
        },
    }))
}
