//! Folio CLI entrypoint.

use clap::Parser;
use folio_client::ContentClient;
use folio_content::ContentService;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, LogFormat};
use config::SiteSettings;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Fetch blog content from the CMS", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let settings = SiteSettings::load()?;
    debug!(cms = %settings.ghost_url, site = %settings.site_url, "Loaded settings");

    let client = ContentClient::new(settings.client_config())?;
    let service = ContentService::new(client, settings.cache(), settings.adapter()?);

    match cli.command {
        Commands::Highlights {
            limit,
            fields,
            include,
        } => handlers::highlights(&service, limit, &fields, &include).await?,
        Commands::Posts { include } => handlers::posts(&service, &include).await?,
        Commands::Settings { fields } => handlers::settings(&service, &fields).await?,
        Commands::Site => handlers::site(&service).await?,
        Commands::Locale {
            locale,
            page,
            limit,
        } => handlers::locale(&service, locale, page, limit).await?,
        Commands::Translation { key, locale } => {
            handlers::translation(&service, &key, locale).await?
        }
        Commands::Build => handlers::build(&service).await?,
    }

    Ok(())
}
