use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

mod api;
mod app;
mod bbcode;
mod config;
mod console;
mod editor;
mod events;
mod models;
mod state;
mod ui;

use api::{ApiClient, ConsteliaClient};
use app::App;
use config::{resolve_api_key, FileStore, LocalStore};
use state::NotificationLevel;

/// Terminal dashboard for the Constelia API.
#[derive(Parser, Debug)]
#[command(name = "comet", version, about)]
struct Cli {
    /// Settings file (TOML); created with defaults if missing
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the API key; overrides `api.key_file` for this run only
    #[arg(long)]
    key_file: Option<PathBuf>,
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    let log_path = data_dir.join("comet.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    let (config_path, data_dir) = match ProjectDirs::from("ai", "constelia", "comet") {
        Some(dirs) => (
            dirs.config_dir().join("config.toml"),
            dirs.data_dir().to_path_buf(),
        ),
        None => {
            let cwd = std::env::current_dir()?;
            (cwd.join("comet.toml"), cwd)
        }
    };
    let config_path = cli.config.unwrap_or(config_path);

    init_logging(&data_dir)?;
    log::info!("comet {} starting", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(FileStore::new(&config_path));
    let config = store.load()?;

    // A missing key is reported in the UI; calls fail with MissingApiKey.
    let (api_key, key_error) = match resolve_api_key(&config.api, cli.key_file.as_deref()) {
        Ok(key) => (key, None),
        Err(e) => (String::new(), Some(format!("{:#}", e))),
    };

    let http = ApiClient::new(Duration::from_secs(config.api.timeout_seconds))?;
    let api = Arc::new(ConsteliaClient::new(http, config.api.base_url.clone(), api_key));

    let mut app = App::new(config, api, store, data_dir.join("exports"));
    if let Some(message) = key_error {
        app.state
            .add_notification(message, NotificationLevel::Warning);
    }

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    result
}
