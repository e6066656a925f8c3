//! Internal-tag conventions for localized posts.
//!
//! The CMS exposes internal tags (`#lang-en`) with a `hash-` slug prefix,
//! so a post's language lives in `hash-lang-<locale>` and its translation
//! group in `hash-i18n-<key>`.

use folio_core::Locale;

pub const LANG_TAG_PREFIX: &str = "hash-lang-";
pub const I18N_TAG_PREFIX: &str = "hash-i18n-";

/// `hash-lang-<locale>`
pub fn lang_tag(locale: Locale) -> String {
    format!("{}{}", LANG_TAG_PREFIX, locale)
}

/// `hash-i18n-<key>`
pub fn i18n_tag(key: &str) -> String {
    format!("{}{}", I18N_TAG_PREFIX, key)
}

/// Filter expression selecting every post written in `locale`.
pub fn locale_filter(locale: Locale) -> String {
    format!("tag:{}", lang_tag(locale))
}

/// Filter expression selecting the `locale` variant of a translation group.
pub fn translation_filter(key: &str, locale: Locale) -> String {
    format!("tag:{}+tag:{}", i18n_tag(key), lang_tag(locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters() {
        assert_eq!(locale_filter(Locale::En), "tag:hash-lang-en");
        assert_eq!(
            translation_filter("intro-to-solitude", Locale::Ja),
            "tag:hash-i18n-intro-to-solitude+tag:hash-lang-ja"
        );
    }
}
