use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ExerciseCommands, ImportCommands, PlanCommands, SessionCommands};

/// Command-line interface for the Drill training log
///
/// Drill keeps exercises, reusable workout plans and recorded training
/// sessions in a local SQLite database. Plans and sessions can be imported
/// from Impetus interval-timer XML exports.
#[derive(Parser)]
#[command(version, about, name = "drill")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/drill/drill.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Drill CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Import Impetus XML files
    #[command(alias = "i")]
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Manage exercises
    #[command(alias = "e")]
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Inspect plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Inspect recorded sessions
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}
