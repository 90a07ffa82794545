#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the quake map dashboard.
//!
//! `summary` (the default) runs one refresh and prints every dashboard
//! section to the terminal. `serve` starts the HTTP API.

mod format;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quake_map_dashboard::{Dashboard, DashboardConfig, RefreshState};

use crate::terminal::TerminalRenderer;

#[derive(Parser)]
#[command(
    name = "quake_map_cli",
    about = "Seismicity dashboard for the Sagaing fault region"
)]
struct Cli {
    /// Path to a dashboard TOML config (overrides `QUAKE_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the last 12 months of events and print the dashboard
    Summary,
    /// Start the HTTP API server (`BIND_ADDR`, `PORT`)
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = terminal::init_logger();
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => {
            let dashboard = Dashboard::connect(config, TerminalRenderer::new(multi))?;
            let report = dashboard.refresh_now().await?;

            println!();
            match report.state {
                RefreshState::Ready => println!("Dashboard ready."),
                RefreshState::PartialFailure(feed) => {
                    println!("Dashboard loaded with errors ({feed} unavailable).");
                }
                state => println!("Dashboard refresh ended in state {state:?}."),
            }
        }
        Commands::Serve => {
            // actix-web runs its own single-threaded system; keep it off
            // the tokio workers.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(quake_map_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}
