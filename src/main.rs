use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use catalog_admin::api::CatalogClient;
use catalog_admin::app::{App, AppEvent};
use catalog_admin::config::{Config, API_URL_ENV};
use catalog_admin::keybindings::KeybindingRegistry;
use catalog_admin::route::Route;
use catalog_admin::theme::ThemeVariant;
use catalog_admin::ui;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-admin",
    version,
    about = "Terminal admin for catalog categories and series"
)]
struct Args {
    /// API base URL (overrides CATALOG_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (default: ~/.config/catalog-admin/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial screen, e.g. /series or /categories/edit/3
    #[arg(long, value_name = "PATH", default_value = "/categories")]
    route: Route,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => {
            tracing::debug!("HOME not set, using default configuration");
            Config::default()
        }
    };

    let env_url = std::env::var(API_URL_ENV).ok();
    let api_url = config.resolve_api_url(args.api_url.as_deref(), env_url.as_deref());
    let client = CatalogClient::new(&api_url, config.request_timeout())
        .context("Failed to create API client")?;
    tracing::info!(base_url = client.base_url(), route = %args.route, "Starting catalog admin");

    let theme = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
        ThemeVariant::Dark
    });

    let mut keybindings = KeybindingRegistry::new();
    for warning in keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    let mut app = App::new(client.base_url(), theme, keybindings);
    let initial = app.navigate(args.route);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, client, initial, event_tx, event_rx).await?;

    Ok(())
}
