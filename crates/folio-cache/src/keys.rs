//! Cache key generation utilities.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Serialized arguments longer than this are replaced by a digest.
const MAX_INLINE_ARGS: usize = 128;

/// Join an operation name and its parameters into a key.
///
/// `compose_key("featured_posts", &[&12, &"id,title", &"tags"])` gives
/// `featured_posts:12:id,title:tags`.
pub fn compose_key(name: &str, parts: &[&dyn Display]) -> String {
    let mut key = name.to_string();
    for part in parts {
        key.push(':');
        key.push_str(&part.to_string());
    }
    key
}

/// Derive a key from a prefix and the serialized form of `args`.
///
/// Scalars render bare and a flat tuple or list of scalars renders
/// colon-separated, so `derive_key("featured_posts", &(12, "id,title", "tags"))`
/// equals the [`compose_key`] form. Anything nested renders as JSON.
/// Equal arguments always produce equal keys. Long renderings are
/// shortened to the first 8 bytes of their SHA-256 digest.
pub fn derive_key<A: Serialize + ?Sized>(prefix: &str, args: &A) -> serde_json::Result<String> {
    let rendered = match serde_json::to_value(args)? {
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(render_scalar)
            .collect::<Vec<_>>()
            .join(":"),
        value if is_scalar(&value) => render_scalar(&value),
        value => value.to_string(),
    };

    if rendered.len() <= MAX_INLINE_ARGS {
        return Ok(format!("{}:{}", prefix, rendered));
    }

    let mut hasher = Sha256::new();
    hasher.update(rendered.as_bytes());
    let hash = hasher.finalize();
    Ok(format!("{}:#{}", prefix, hex::encode(&hash[..8])))
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check if a key matches a prefix pattern.
pub fn matches_prefix(key: &str, prefix: &str) -> bool {
    key.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_key() {
        let key = compose_key("featured_posts", &[&12, &"id,title,url", &"tags"]);
        assert_eq!(key, "featured_posts:12:id,title,url:tags");
        assert_eq!(compose_key("site_information", &[]), "site_information");
    }

    #[test]
    fn test_derive_key_is_deterministic() {
        let a = derive_key("posts", &(5, "id,title", "tags")).unwrap();
        let b = derive_key("posts", &(5, "id,title", "tags")).unwrap();
        let c = derive_key("posts", &(6, "id,title", "tags")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "posts:5:id,title:tags");
    }

    #[test]
    fn test_derive_key_matches_composed_key() {
        assert_eq!(
            derive_key("featured_posts", &(12, "id,title", "tags")).unwrap(),
            compose_key("featured_posts", &[&12, &"id,title", &"tags"])
        );
        assert_eq!(derive_key("all_posts", "tags").unwrap(), "all_posts:tags");
        assert_eq!(derive_key("flag", &()).unwrap(), "flag:null");
    }

    #[test]
    fn test_derive_key_keeps_nested_arguments_as_json() {
        let key = derive_key("search", &serde_json::json!({"q": "rust"})).unwrap();
        assert_eq!(key, r#"search:{"q":"rust"}"#);

        let key = derive_key("batch", &(1, vec!["a", "b"])).unwrap();
        assert_eq!(key, r#"batch:[1,["a","b"]]"#);
    }

    #[test]
    fn test_derive_key_hashes_long_arguments() {
        let long = "x".repeat(500);
        let key = derive_key("posts", &long).unwrap();

        assert!(key.starts_with("posts:#"));
        assert_eq!(key.len(), "posts:#".len() + 16);
        assert_ne!(key, derive_key("posts", &"y".repeat(500)).unwrap());
    }

    #[test]
    fn test_matches_prefix() {
        assert!(matches_prefix("all_posts:tags", "all_posts:"));
        assert!(!matches_prefix("featured_posts:12", "all_posts:"));
    }
}
