//! Data models for exercises, plans and training sessions.
//!
//! A [`Plan`] is a reusable template: an ordered list of [`Loop`]s, each
//! repeated `rounds` times, each holding an ordered list of [`Goal`]s that
//! point at an [`Exercise`]. A [`Session`] is what actually happened: a flat,
//! time-ordered list of [`Record`]s with real start and end instants.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use drill_core::models::{Exercise, ExerciseType};
//!
//! let exercise = Exercise {
//!     id: 1,
//!     name: "Burpees".to_string(),
//!     description: String::new(),
//!     exercise_type: ExerciseType::Work,
//! };
//! assert!(exercise.exercise_type.counts_reps());
//! ```

pub mod exercise;
pub mod plan;
pub mod session;
pub mod summary;


pub use exercise::{Exercise, ExerciseType};
pub use plan::{Goal, Loop, Plan};
pub use session::{Record, Session};
pub use summary::{PlanSummary, SessionSummary};
