//! Launches the interactive shell.

use std::sync::Arc;

use anyhow::{Context, Result};
use imagingiq_core::config::{Config, paths};
use imagingiq_core::logging;
use imagingiq_core::session::MemorySessionProvider;
use imagingiq_tui::Route;

pub async fn run(config: Config, route: Route) -> Result<()> {
    let logs_dir = paths::logs_dir();
    let _guard = logging::init_file_logging(&logs_dir)
        .with_context(|| format!("init logging in {}", logs_dir.display()))?;

    tracing::info!(
        accounts = config.provider.accounts.len(),
        latency_ms = config.provider.latency_ms,
        "using in-memory session provider"
    );
    let provider = Arc::new(MemorySessionProvider::from_config(&config.provider));

    imagingiq_tui::run_shell(config, provider, route).await
}
