//! Full-screen clinical shell for ImagingIQ.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
pub use features::{demo, gate, login, nav, scan};
use imagingiq_core::config::Config;
use imagingiq_core::session::SessionProvider;
pub use runtime::{Driver, TuiRuntime};
pub use state::Route;

/// Runs the interactive shell on `start` until the user quits.
///
/// Spawned provider calls and timers run on the runtime's workers while the
/// calling thread owns the terminal.
pub async fn run_shell(
    config: Config,
    provider: Arc<dyn SessionProvider>,
    start: Route,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("The ImagingIQ shell requires a terminal.");
    }

    tracing::info!(route = %start, "starting shell");
    let mut runtime = TuiRuntime::new(config, provider)?;
    runtime.run(start)
}
