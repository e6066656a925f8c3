//! Site locales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the site publishes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    Ja,
    En,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 3] = [Locale::Zh, Locale::Ja, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    /// Value for the HTML `lang` attribute.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Locale::Zh => "zh-CN",
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Locale::Zh),
            "ja" => Ok(Locale::Ja),
            "en" => Ok(Locale::En),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}
