//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use imagingiq_core::config;
use imagingiq_tui::Route;

mod commands;

#[derive(Parser)]
#[command(name = "imagingiq")]
#[command(version)]
#[command(about = "ImagingIQ clinical imaging shell")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Route to open the shell on (home, login, dashboard, profile)
    #[arg(long, default_value = "home")]
    route: Route,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, route } = cli;

    // default to the shell
    let Some(command) = command else {
        let config = config::Config::load().context("load config")?;
        return commands::shell::run(config, route).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
