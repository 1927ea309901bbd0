//! Drill CLI Application
//!
//! Command-line interface for the drill training log.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use drill_core::TrainerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let trainer = TrainerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize trainer")?;

    info!("Drill started on {}", trainer.database_path().display());

    let cli = Cli::new(trainer, TerminalRenderer::new(!no_color), json);

    match command {
        Some(Import { command }) => cli.handle_import_command(command).await,
        Some(Exercise { command }) => cli.handle_exercise_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Session { command }) => cli.handle_session_command(command).await,
        None => cli.list_plans().await,
    }
}
