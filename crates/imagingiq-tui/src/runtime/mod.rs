//! Shell runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: terminal runtime (`TuiRuntime`, event loop, rendering)
//! - `driver.rs`: headless core (state, inbox, effect dispatch)
//! - `inbox.rs`: inbox channel types
//! - `handlers.rs`: effect handler implementations

mod driver;
mod handlers;
mod inbox;

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
pub use driver::Driver;
use crossterm::event;
use imagingiq_core::config::Config;
use imagingiq_core::session::SessionProvider;
pub use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::events::UiEvent;
use crate::state::Route;
use crate::{render, terminal};

/// Tick cadence while something is animating (scan progress, spinners).
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Tick cadence when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(200);

/// Full-screen shell runtime.
///
/// Owns the terminal and the driver. Terminal state is restored on exit and
/// on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub driver: Driver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new runtime. Must be called from within a tokio runtime.
    pub fn new(config: Config, provider: Arc<dyn SessionProvider>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            driver: Driver::new(config, provider),
            last_tick: Instant::now(),
        })
    }

    /// Mounts `start` and runs the main event loop until quit.
    pub fn run(&mut self, start: Route) -> Result<()> {
        self.driver.start(start);
        let result = self.event_loop();
        self.driver.shutdown();
        let restored = terminal::restore_terminal();
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.driver.should_quit() {
            if self.driver.drain_inbox() > 0 {
                dirty = true;
            }

            for event in self.collect_terminal_events()? {
                self.driver.dispatch(event);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.driver.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Polls the terminal until the next tick is due.
    fn collect_terminal_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.driver.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        if event::poll(time_until_tick)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}
