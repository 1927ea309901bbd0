//! Subcommand definitions and their handlers.
//!
//! Clap argument structs stay in this crate and are converted into the
//! core parameter types with `From` impls:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Trainer
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use drill_core::{
    display::{CreateResult, DeleteResult, Exercises, PlanSummaries, SessionSummaries},
    import::{ImportFailure, ImportSummary},
    models::ExerciseType,
    params::{CreateExercise, Id},
    Trainer, TrainingError,
};
use log::warn;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Files to import
#[derive(Args)]
pub struct ImportFilesArgs {
    /// One or more Impetus XML export files
    #[arg(required = true, help = "Impetus XML files to import")]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import workouts as reusable plans
    #[command(alias = "p")]
    Plan(ImportFilesArgs),
    /// Import workouts as recorded sessions
    #[command(alias = "s")]
    Session(ImportFilesArgs),
}

/// Exercise type accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ExerciseTypeArg {
    /// Effort counted in repetitions
    Work,
    /// Recovery between efforts
    Rest,
    /// Lead-in before the first effort
    Preparation,
}

impl From<ExerciseTypeArg> for ExerciseType {
    fn from(val: ExerciseTypeArg) -> Self {
        match val {
            ExerciseTypeArg::Work => ExerciseType::Work,
            ExerciseTypeArg::Rest => ExerciseType::Rest,
            ExerciseTypeArg::Preparation => ExerciseType::Preparation,
        }
    }
}

/// Create a new exercise
#[derive(Args)]
pub struct CreateExerciseArgs {
    /// Name of the exercise
    pub name: String,
    #[arg(short = 't', long = "type", value_enum, help = "Semantic type of the exercise")]
    pub exercise_type: ExerciseTypeArg,
    #[arg(short, long, help = "Optional instructions for the exercise")]
    pub description: Option<String>,
}

impl From<CreateExerciseArgs> for CreateExercise {
    fn from(val: CreateExerciseArgs) -> Self {
        CreateExercise {
            name: val.name,
            description: val.description,
            exercise_type: val.exercise_type.into(),
        }
    }
}

/// Identifies a single exercise, plan or session
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Create an exercise
    #[command(alias = "c")]
    Create(CreateExerciseArgs),
    /// List all exercises
    #[command(aliases = ["l", "ls"])]
    List,
    /// Delete an exercise and every goal and record using it
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List all plans, newest first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with its loops and goals
    #[command(alias = "s")]
    Show(IdArgs),
    /// Permanently delete a plan
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// List all sessions, most recent first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a session with its records
    #[command(alias = "s")]
    Show(IdArgs),
    /// Permanently delete a session
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Clone, Copy)]
enum ImportMode {
    Plans,
    Sessions,
}

/// Runs parsed commands against a [`Trainer`] and prints the outcome.
pub struct Cli {
    trainer: Trainer,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(trainer: Trainer, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            trainer,
            renderer,
            json,
        }
    }

    pub async fn handle_import_command(&self, command: ImportCommands) -> Result<()> {
        match command {
            ImportCommands::Plan(args) => self.import_files(ImportMode::Plans, args.files).await,
            ImportCommands::Session(args) => {
                self.import_files(ImportMode::Sessions, args.files).await
            }
        }
    }

    pub async fn handle_exercise_command(&self, command: ExerciseCommands) -> Result<()> {
        match command {
            ExerciseCommands::Create(args) => {
                let exercise = self.trainer.create_exercise(&args.into()).await?;
                if self.json {
                    return self.renderer.render_json(&exercise);
                }
                self.renderer
                    .render(&CreateResult::new(exercise).to_string())
            }
            ExerciseCommands::List => {
                let exercises = self.trainer.list_exercises().await?;
                if self.json {
                    return self.renderer.render_json(&exercises);
                }
                self.renderer.render(&Exercises(exercises).to_string())
            }
            ExerciseCommands::Delete(args) => {
                let id = args.id;
                let Some(exercise) = self.trainer.delete_exercise(&args.into()).await? else {
                    bail!(TrainingError::NotFound {
                        entity: "Exercise",
                        id
                    });
                };
                if self.json {
                    return self.renderer.render_json(&exercise);
                }
                self.renderer
                    .render(&DeleteResult::new(exercise).to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let id = args.id;
                let Some(plan) = self.trainer.get_plan(&args.into()).await? else {
                    bail!(TrainingError::NotFound { entity: "Plan", id });
                };
                if self.json {
                    return self.renderer.render_json(&plan);
                }
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Delete(args) => {
                let id = args.id;
                let Some(plan) = self.trainer.delete_plan(&args.into()).await? else {
                    bail!(TrainingError::NotFound { entity: "Plan", id });
                };
                if self.json {
                    return self.renderer.render_json(&plan);
                }
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
        }
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::List => {
                let sessions = self.trainer.list_sessions().await?;
                if self.json {
                    return self.renderer.render_json(&sessions);
                }
                self.renderer.render(&SessionSummaries(sessions).to_string())
            }
            SessionCommands::Show(args) => {
                let id = args.id;
                let Some(session) = self.trainer.get_session(&args.into()).await? else {
                    bail!(TrainingError::NotFound {
                        entity: "Session",
                        id
                    });
                };
                if self.json {
                    return self.renderer.render_json(&session);
                }
                self.renderer.render(&session.to_string())
            }
            SessionCommands::Delete(args) => {
                let id = args.id;
                let Some(session) = self.trainer.delete_session(&args.into()).await? else {
                    bail!(TrainingError::NotFound {
                        entity: "Session",
                        id
                    });
                };
                if self.json {
                    return self.renderer.render_json(&session);
                }
                self.renderer
                    .render(&DeleteResult::new(session).to_string())
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self.trainer.list_plans().await?;
        if self.json {
            return self.renderer.render_json(&plans);
        }
        self.renderer.render(&PlanSummaries(plans).to_string())
    }

    /// Imports every file, reporting each one. A file that cannot be read
    /// does not stop the others; any failure makes the command fail.
    async fn import_files(&self, mode: ImportMode, files: Vec<PathBuf>) -> Result<()> {
        let mut summaries = Vec::with_capacity(files.len());
        for path in files {
            let result = match mode {
                ImportMode::Plans => self.trainer.import_plan_file(&path).await,
                ImportMode::Sessions => self.trainer.import_session_file(&path).await,
            };
            let summary = result.unwrap_or_else(|error| {
                warn!("Failed to import {}: {error}", path.display());
                ImportSummary {
                    source: Some(path.clone()),
                    failures: vec![ImportFailure {
                        element: path.display().to_string(),
                        error,
                    }],
                    ..ImportSummary::default()
                }
            });
            summaries.push(summary);
        }

        if self.json {
            self.renderer.render_json(&summaries)?;
        } else {
            let markdown: String = summaries.iter().map(ToString::to_string).collect();
            self.renderer.render(&markdown)?;
        }

        let mut total = ImportSummary::default();
        for summary in summaries {
            total.merge(summary);
        }
        if !total.is_success() {
            bail!(
                "{} of the imported elements failed ({} imported, {} skipped)",
                total.failures.len(),
                total.imported,
                total.skipped
            );
        }
        Ok(())
    }
}
