// Team matcher entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the balance service client
// 4. Create mpsc channels and spawn the app task
// 5. Run the TUI until the user quits
// 6. Wait for the app task to wind down

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use teammatch_app::app;
use teammatch_app::config;
use teammatch_client::HttpBalanceClient;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "teammatch=info,teammatch_tui=info,teammatch_app=info,teammatch_client=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    init_tracing(&cwd)?;
    info!("Team matcher starting up");

    let config = config::load_config().context("failed to load configuration")?;

    let client = HttpBalanceClient::new(
        &config.service.base_url,
        &config.service.balance_path,
        config.service.timeout(),
    )
    .context("failed to build balance client")?;
    info!(
        endpoint = client.endpoint(),
        timeout_secs = config.service.timeout_secs,
        "Balance client ready"
    );

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);
    let (outcome_tx, outcome_rx) = mpsc::channel(4);

    let tick = config.ui.tick();
    let app_state = app::AppState::new(config, Arc::new(client), outcome_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, outcome_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = teammatch_tui::run(ui_rx, cmd_tx, tick).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Team matcher shut down cleanly");
    Ok(())
}

/// Log to `<dir>/logs/teammatch.log`; the terminal belongs to the TUI.
fn init_tracing(dir: &Path) -> anyhow::Result<()> {
    let log_dir = dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join("teammatch.log"))
        .context("failed to open log file")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}
