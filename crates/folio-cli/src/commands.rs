//! CLI command definitions.

use clap::{Subcommand, ValueEnum};
use folio_content::{
    DEFAULT_HIGHLIGHT_FIELDS, DEFAULT_HIGHLIGHT_LIMIT, DEFAULT_INCLUDE, DEFAULT_SETTINGS_FIELDS,
};
use folio_core::Locale;

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the home page showcase posts
    Highlights {
        /// Number of posts
        #[arg(short, long, default_value_t = DEFAULT_HIGHLIGHT_LIMIT)]
        limit: u32,

        /// Comma-separated post fields
        #[arg(long, default_value = DEFAULT_HIGHLIGHT_FIELDS)]
        fields: String,

        /// Relations to expand
        #[arg(long, default_value = DEFAULT_INCLUDE)]
        include: String,
    },

    /// Fetch every post
    Posts {
        /// Relations to expand
        #[arg(long, default_value = DEFAULT_INCLUDE)]
        include: String,
    },

    /// Fetch global site settings
    Settings {
        /// Comma-separated settings fields
        #[arg(long, default_value = DEFAULT_SETTINGS_FIELDS)]
        fields: String,
    },

    /// Print the data every layout needs
    Site,

    /// List posts written in one locale
    Locale {
        /// Locale code (zh, ja, en)
        #[arg(value_parser = parse_locale)]
        locale: Locale,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Posts per page
        #[arg(short, long, default_value_t = 15)]
        limit: u32,
    },

    /// Find the variant of a translation group in one locale
    Translation {
        /// Translation group key
        key: String,

        /// Locale code (zh, ja, en)
        #[arg(value_parser = parse_locale)]
        locale: Locale,
    },

    /// Fetch everything a full site build touches and report cache usage
    Build,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    value.parse()
}
