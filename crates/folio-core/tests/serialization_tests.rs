//! Deserialization tests for CMS payloads.

use folio_core::*;
use pretty_assertions::assert_eq;

#[test]
fn test_posts_envelope_unwraps() {
    let json = r#"{
        "posts": [
            {
                "id": "65a1",
                "title": "Hello",
                "url": "https://cms.example.com/hello/",
                "feature_image": null,
                "published_at": "2024-05-01T10:00:00.000Z",
                "tags": [{"id": "t1", "slug": "type-article", "name": "Article"}]
            }
        ],
        "meta": {"pagination": {"page": 1, "limit": 15, "pages": 1, "total": 1}}
    }"#;

    let envelope: PostsEnvelope = serde_json::from_str(json).expect("deserialize");
    let posts = envelope.into_posts();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "65a1");
    assert_eq!(posts[0].feature_image, None);
    assert_eq!(posts[0].tags[0].slug, "type-article");
    assert!(posts[0].published_at.is_some());
}

#[test]
fn test_trimmed_post_fields_default() {
    let json = r#"{"posts": [{"id": "1"}]}"#;
    let envelope: PostsEnvelope = serde_json::from_str(json).expect("deserialize");
    let post = &envelope.into_posts()[0];

    assert_eq!(post.title, "");
    assert!(post.tags.is_empty());
    assert_eq!(post.html, None);
}

#[test]
fn test_posts_envelope_requires_posts_key() {
    assert!(serde_json::from_str::<PostsEnvelope>("{}").is_err());
    assert!(
        serde_json::from_str::<PostsEnvelope>(r#"{"errors":[{"message":"x"}]}"#).is_err()
    );

    let empty: PostsEnvelope = serde_json::from_str(r#"{"posts": []}"#).expect("deserialize");
    assert!(empty.into_posts().is_empty());
}

#[test]
fn test_settings_envelope_unwraps() {
    let json = r#"{
        "settings": {
            "title": "Folio",
            "description": "Notes",
            "logo": "https://cms.example.com/content/images/logo.png",
            "navigation": [{"label": "Home", "url": "/"}]
        }
    }"#;

    let envelope: SettingsEnvelope = serde_json::from_str(json).expect("deserialize");
    let settings = envelope.into_settings();

    assert_eq!(settings.title, "Folio");
    assert_eq!(settings.navigation.len(), 1);
    assert_eq!(settings.cover_image, None);
}

#[test]
fn test_adapted_post_flattens_tag_info() {
    let post = Post {
        id: "1".to_string(),
        title: "Hello".to_string(),
        url: "https://blog.example.com/posts/1".parse().expect("url"),
        feature_image: None,
        primary_tag: None,
        tags: vec![],
        published_at: None,
        comment_id: None,
        excerpt: None,
        html: None,
        tag_info: TagInfo {
            post_type: "article".to_string(),
            post_category: "default".to_string(),
            post_series: "default".to_string(),
            post_general_tags: vec![],
        },
    };

    let value = serde_json::to_value(&post).expect("serialize");
    assert_eq!(value["post_type"], "article");
    assert_eq!(value["url"], "https://blog.example.com/posts/1");

    let parsed: Post = serde_json::from_value(value).expect("deserialize");
    assert_eq!(parsed, post);
}
