//! `agency-tui`: terminal admin console for the agency website backend.
//!
//! One tab per collection (blog, portfolio, services, messages,
//! applications), each a paginated, filterable list with a detail panel.
//! Admin tabs can delete items and change message or application status.
//!
//! Logs go to a file (default `/tmp/agency-tui.log`) so they never touch
//! the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use agency_config::Profile;
use agency_core::{ChannelNotifier, Site, SiteConfig};

use crate::app::App;

/// Terminal admin console for the agency website.
#[derive(Parser, Debug)]
#[command(name = "agency-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "AGENCY_PROFILE")]
    profile: Option<String>,

    /// Backend URL (overrides the profile)
    #[arg(short = 'b', long, env = "AGENCY_BACKEND")]
    backend: Option<String>,

    /// Admin bearer token (overrides the profile)
    #[arg(short = 't', long, env = "AGENCY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/agency-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Returns the guard that flushes the writer on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agency_tui={log_level},agency_core={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("agency-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Flags over the config profile; `--backend` alone is enough without one.
fn build_site_config(cli: &Cli) -> Result<SiteConfig> {
    let cfg = agency_config::load_config_or_default();
    let name = cfg.profile_name(cli.profile.as_deref()).to_owned();

    let mut profile = match cfg.profile(&name) {
        Ok(profile) => profile.clone(),
        Err(_) if cli.profile.is_none() && cli.backend.is_some() => Profile::default(),
        Err(e) => {
            return Err(eyre!(e)
                .wrap_err("no backend configured; run `agency config init` or pass --backend"));
        }
    };
    if let Some(ref backend) = cli.backend {
        profile.backend.clone_from(backend);
    }

    let mut site = agency_config::profile_to_site_config(&profile)?;
    if let Some(ref token) = cli.token {
        site.token = Some(SecretString::from(token.clone()));
    }
    Ok(site)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a panic restores the terminal.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = build_site_config(&cli)?;
    info!(backend = %config.backend, "starting agency-tui");

    let (notifier, toasts) = ChannelNotifier::new();
    let site = Site::new(config, Arc::new(notifier))?;

    let mut app = App::new(&site, toasts);
    app.run().await?;

    Ok(())
}
