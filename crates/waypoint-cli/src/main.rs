//! Waypoint CLI Application
//!
//! Command-line and MCP front end for the waypoint trip planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::ReconcilerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let max_trip_days = args.trip_day_limit();
    let Args {
        database_file,
        no_color,
        user,
        require_cover_image,
        command,
        ..
    } = args;

    let reconciler = ReconcilerBuilder::new()
        .with_database_path(database_file)
        .require_cover_image(require_cover_image)
        .max_trip_days(max_trip_days)
        .build()
        .await
        .context("Failed to initialize trip database")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Waypoint started for user '{user}'");

    match command {
        Some(Trip { command }) => {
            Cli::new(reconciler, renderer, user)
                .handle_trip_command(command)
                .await
        }
        Some(Day { command }) => {
            Cli::new(reconciler, renderer, user)
                .handle_day_command(command)
                .await
        }
        Some(Activity { command }) => {
            Cli::new(reconciler, renderer, user)
                .handle_activity_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(reconciler, user))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(reconciler, renderer, user).list_trips().await,
    }
}
