//! Post accessors.

use crate::locale::{locale_filter, translation_filter};
use crate::service::ContentService;
use folio_cache::{Ttl, compose_key};
use folio_client::ContentRequest;
use folio_core::{Error, Locale, Post, PostsEnvelope, Result};
use tracing::{debug, warn};

const POSTS_ENDPOINT: &str = "posts/";

pub const DEFAULT_HIGHLIGHT_LIMIT: u32 = 12;
pub const DEFAULT_HIGHLIGHT_FIELDS: &str = "id,title,url,feature_image,primary_tag,published_at";
pub const DEFAULT_INCLUDE: &str = "tags";

/// Pagination for locale listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { page: 1, limit: 15 }
    }
}

impl ContentService {
    /// Posts for the home page showcase.
    ///
    /// `fields` trims the returned records and must name `id`, which every
    /// post needs; an empty list asks for all fields.
    pub async fn get_highlight_posts(
        &self,
        limit: u32,
        fields: &str,
        include: &str,
    ) -> Result<Vec<Post>> {
        if !selects_id(fields) {
            return Err(Error::Config(format!(
                "post fields must include `id`, got `{}`",
                fields
            )));
        }

        let request = ContentRequest::new(POSTS_ENDPOINT)
            .param("limit", limit)
            .param("fields", fields)
            .param("include", include);

        self.cached("featured_posts", (limit, fields, include), move |service| {
            let request = request.clone();
            async move { service.fetch_posts(request).await }
        })
        .await
    }

    /// Every post, with `include` relations expanded.
    pub async fn get_posts(&self, include: &str) -> Result<Vec<Post>> {
        let request = ContentRequest::new(POSTS_ENDPOINT).param("include", include);

        self.cached("all_posts", include, move |service| {
            let request = request.clone();
            async move { service.fetch_posts(request).await }
        })
        .await
    }

    /// One page of posts written in `locale`, newest first.
    pub async fn list_posts_by_locale(
        &self,
        locale: Locale,
        options: PageOptions,
    ) -> Result<Vec<Post>> {
        let request = ContentRequest::new(POSTS_ENDPOINT)
            .param("filter", locale_filter(locale))
            .param("include", DEFAULT_INCLUDE)
            .param("order", "published_at desc")
            .param("page", options.page)
            .param("limit", options.limit);

        self.cached(
            "posts_by_locale",
            (locale, options.page, options.limit),
            move |service| {
                let request = request.clone();
                async move { service.fetch_posts(request).await }
            },
        )
        .await
    }

    /// The `locale` variant of translation group `group_key`, if it exists.
    ///
    /// Never fails: a CMS error is logged and reported as `None` without
    /// being cached, so a later call asks again. A variant that does not
    /// exist is remembered for the rest of the run.
    pub async fn get_post_by_group_and_locale(
        &self,
        group_key: &str,
        locale: Locale,
    ) -> Option<Post> {
        let key = compose_key("post_by_group", &[&group_key, &locale]);
        if let Some(hit) = self.cache.get::<Option<Post>>(&key) {
            return hit;
        }

        let request = ContentRequest::new(POSTS_ENDPOINT)
            .param("filter", translation_filter(group_key, locale))
            .param("include", DEFAULT_INCLUDE)
            .param("limit", 1u32);

        match self.fetch_posts(request).await {
            Ok(posts) => {
                let post = posts.into_iter().next();
                match &post {
                    Some(_) => self.cache.set(key, post.clone()),
                    None => {
                        debug!(group = %group_key, locale = %locale, "No translation variant");
                        self.cache.set_with_ttl(key, None::<Post>, Ttl::Never);
                    }
                }
                post
            }
            Err(e) => {
                warn!(
                    group = %group_key,
                    locale = %locale,
                    error = %e,
                    "Failed to fetch translation variant"
                );
                None
            }
        }
    }

    async fn fetch_posts(&self, request: ContentRequest) -> Result<Vec<Post>> {
        let envelope: PostsEnvelope = self.client.get(&request).await?;
        envelope
            .into_posts()
            .into_iter()
            .map(|raw| self.adapter.adapt_post(raw))
            .collect()
    }
}

fn selects_id(fields: &str) -> bool {
    fields.trim().is_empty() || fields.split(',').any(|field| field.trim() == "id")
}
