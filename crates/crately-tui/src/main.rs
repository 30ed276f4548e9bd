//! `crately-tui` — Terminal dashboard for warehouse inventory.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `crately-core`'s [`ItemStream`](crately_core::ItemStream). One screen:
//! the inventory table with search, sort, paging, and an add/edit form.
//!
//! Logs are written to a file (default `/tmp/crately-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task streams
//! snapshot updates from the controller into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use crately_config::{load_config_or_default, profile_to_client_config, select_profile};
use crately_core::{ClientConfig, Controller};

use crate::app::App;

/// Terminal dashboard for browsing and editing warehouse inventory.
#[derive(Parser, Debug)]
#[command(name = "crately-tui", version, about)]
struct Cli {
    /// Inventory service base URL (e.g., http://127.0.0.1:5000)
    #[arg(short = 'u', long, env = "CRATELY_URL")]
    base_url: Option<String>,

    /// Named profile from the config file
    #[arg(short = 'p', long, env = "CRATELY_PROFILE")]
    profile: Option<String>,

    /// Log file path (defaults to /tmp/crately-tui.log)
    #[arg(long, default_value = "/tmp/crately-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crately_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("crately-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the service connection. A `--base-url` flag wins outright;
/// otherwise the config file's profile (or the built-in local default)
/// decides.
fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    if let Some(ref raw) = cli.base_url {
        let url: Url = raw
            .parse()
            .map_err(|_| eyre!("invalid service URL: {raw}"))?;
        return Ok(ClientConfig {
            url,
            ..ClientConfig::default()
        });
    }

    let cfg = load_config_or_default();
    let (name, profile) = select_profile(&cfg, cli.profile.as_deref())?;
    info!(profile = %name, "resolved service profile");
    Ok(profile_to_client_config(&profile, &cfg.defaults)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_client_config(&cli)?;
    info!(url = %config.url, "starting crately-tui");

    let controller = Controller::new(config);
    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
