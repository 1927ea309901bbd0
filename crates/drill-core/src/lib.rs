//! Core library for the Drill interval-training tracker.
//!
//! This crate stores exercises, workout plans and recorded sessions in
//! SQLite and imports both from Impetus interval-timer XML exports.
//!
//! # Layout
//!
//! - **Domain Models** ([`models`]): exercises, plans with their loops and
//!   goals, sessions with their records
//! - **Persistence** ([`db`]): transactional SQLite access; a plan or
//!   session tree is written completely or not at all
//! - **Validation** ([`validation`]): ordinal index integrity and field
//!   checks shared by the persistence layer
//! - **Import** ([`import`]): Impetus XML parsing, exercise classification,
//!   and conversion into plans or sessions
//! - **Display** ([`display`]): markdown formatting for the CLI renderer
//!
//! # Quick Start
//!
//! ```rust
//! use drill_core::{
//!     models::ExerciseType,
//!     params::{CreatePlan, GoalInput, LoopInput},
//!     TrainerBuilder,
//! };
//! use jiff::Timestamp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let trainer = TrainerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let (burpees, _) = trainer
//!     .get_or_create_exercise(&drill_core::params::CreateExercise::new(
//!         "Burpees",
//!         ExerciseType::Work,
//!     ))
//!     .await?;
//!
//! let plan = trainer
//!     .create_plan(&CreatePlan {
//!         name: "Morning".to_string(),
//!         description: None,
//!         created: Timestamp::now(),
//!         loops: vec![LoopInput {
//!             loop_index: 0,
//!             rounds: Some(3),
//!             description: None,
//!             goals: vec![GoalInput {
//!                 goal_index: 0,
//!                 exercise_id: burpees.id,
//!                 duration: Some(30),
//!                 repetitions: None,
//!                 pause: false,
//!             }],
//!         }],
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod defaults;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod params;
pub mod trainer;
pub mod validation;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Exercises, LocalDateTime, PlanSummaries, SessionSummaries,
};
pub use error::{Result, TrainingError};
pub use import::{ImportSummary, PlanImporter, RepsTable, SessionImporter};
pub use models::{
    Exercise, ExerciseType, Goal, Loop, Plan, PlanSummary, Record, Session, SessionSummary,
};
pub use params::{
    CreateExercise, CreateGoal, CreateLoop, CreatePlan, CreateSession, GoalInput, Id, LoopInput,
    RecordInput,
};
pub use trainer::{Trainer, TrainerBuilder};
