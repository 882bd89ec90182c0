//! Med Alliance CLI - line-driven front end for the filter panel and profile editor.
//!
//! # Architecture
//!
//! ```text
//! main() -> load config -> HttpBackend -> fetch_profile -> App -> run()
//!                                                              |
//!                                                              v
//!                                       stdin line -> Command -> execute -> stdout
//! ```
//!
//! Logs go to stderr so they never interleave with command output.
//! Between commands the session is ticked with the wall-clock time that
//! passed, which is what expires the "Changes saved!" notice.

mod commands;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use medalliance_backend::{HttpBackend, HttpBackendConfig, ProfileBackend};
use medalliance_config::MedAllianceConfig;
use medalliance_engine::{App, AppOptions};

use crate::commands::{Command, execute, render_status};

const DEFAULT_LOG_FILTER: &str = "info";

fn init_tracing(config_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Config errors are reported after tracing is up, using the defaults meanwhile.
    let loaded = MedAllianceConfig::load();
    let config = match &loaded {
        Ok(Some(config)) => Some(config),
        Ok(None) | Err(_) => None,
    };
    init_tracing(config.and_then(MedAllianceConfig::log_filter));
    if let Err(err) = &loaded {
        tracing::warn!("{err}; continuing with defaults");
    }

    let defaults = MedAllianceConfig::default();
    let config = config.unwrap_or(&defaults);
    let backend_config = config.backend();
    let backend = Arc::new(
        HttpBackend::new(HttpBackendConfig {
            base_url: backend_config.base_url.clone(),
            token: backend_config.resolved_token(),
            timeout: backend_config.timeout(),
            allow_http: backend_config.allow_http,
        })
        .context("failed to build backend client")?,
    );
    tracing::info!(base_url = backend.base_url(), "backend configured");

    let profile = backend
        .fetch_profile()
        .await
        .context("failed to load the current profile")?;

    let mut app = App::new(
        profile,
        backend.clone(),
        backend,
        AppOptions {
            rules: config.rule_set(),
            success_message_duration: config.success_message_duration(),
        },
    );
    app.preload_lookups().await;

    run(&mut app).await
}

async fn run(app: &mut App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut last_tick = Instant::now();

    stdout.write_all(b"type `help` for commands\n").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;

        if line.trim().is_empty() {
            continue;
        }
        let output = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(app, command).await,
            Err(err) => format!("{err}"),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::debug!(state = %render_status(app), "session ended");
    Ok(())
}
