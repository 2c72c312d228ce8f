//! notion_to_text - print a notion.so page as a folded outline or JSON.
//!
//! Usage:
//!   notion_to_text <page-id-or-url> [-v] [--format outline|json] [--indent N]
//!
//! The session token is read from `NOTION_TOKEN` (a `.env` file is honoured).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use notion_reader::{render_outline, ClientConfig, NotionClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Outline,
    Json,
}

#[derive(Parser)]
#[command(name = "notion_to_text")]
#[command(about = "Print a notion.so page as a folded outline or JSON")]
#[command(version)]
struct Cli {
    /// Page id (hyphenated or bare) or page URL
    page: String,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value = "outline")]
    format: OutputFormat,

    /// Spaces per outline level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// YAML config file; environment variables override it
    #[arg(long, env = "NOTION_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "notion_reader=debug"
    } else {
        "notion_reader=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?.merge_env(|key| std::env::var(key).ok())?,
        None => ClientConfig::from_env()?,
    };
    if config.token.is_none() {
        tracing::warn!("NOTION_TOKEN not set, only public pages will load");
    }

    let client = NotionClient::new(config)?;
    let page_id = client
        .resolve_page_id(&cli.page)
        .await
        .with_context(|| format!("looking up '{}'", cli.page))?;
    let page = client
        .get_page(&page_id)
        .await
        .with_context(|| format!("fetching page {}", page_id))?;

    match cli.format {
        OutputFormat::Outline => {
            print!("{}", render_outline(page.tree.root(), &" ".repeat(cli.indent)));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.tree.root())?);
        }
    }

    for err in page.tree.decode_errors() {
        tracing::warn!(block_id = err.block_id(), "{}", err);
    }
    Ok(())
}
