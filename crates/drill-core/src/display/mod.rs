//! Markdown formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see
//! [`models`]); collections and operation outcomes go through the newtype
//! wrappers re-exported here so the CLI can render them with a single
//! `format!("{}", ...)`.
//!
//! ```rust
//! use drill_core::{
//!     display::CreateResult,
//!     models::{Exercise, ExerciseType},
//! };
//!
//! let exercise = Exercise {
//!     id: 7,
//!     name: "Plank".to_string(),
//!     description: String::new(),
//!     exercise_type: ExerciseType::Work,
//! };
//! let output = format!("{}", CreateResult::new(exercise));
//! assert!(output.contains("Created exercise with ID: 7"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Exercises, PlanSummaries, SessionSummaries};
pub use datetime::{Clock, LocalDateTime};
pub use results::{CreateResult, DeleteResult};
