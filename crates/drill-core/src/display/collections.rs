//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{Exercise, PlanSummary, SessionSummary};

/// Newtype wrapper for displaying a list of exercises.
pub struct Exercises(pub Vec<Exercise>);

/// Newtype wrapper for displaying a list of plan summaries.
///
/// # Examples
///
/// ```rust
/// use drill_core::{display::PlanSummaries, models::PlanSummary};
/// use jiff::Timestamp;
///
/// let plan = PlanSummary {
///     id: 1,
///     name: "2020-03-14".to_string(),
///     description: "Tabata".to_string(),
///     created: Timestamp::now(),
///     last_updated: Timestamp::now(),
///     total_loops: 2,
///     total_goals: 3,
/// };
/// let output = format!("{}", PlanSummaries(vec![plan]));
/// assert!(output.contains("Tabata"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

/// Newtype wrapper for displaying a list of session summaries.
pub struct SessionSummaries(pub Vec<SessionSummary>);

fn fmt_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    empty: &str,
) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "{empty}");
    }
    for item in items {
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Exercises {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, &self.0, "No exercises found.")
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, &self.0, "No plans found.")
    }
}

impl fmt::Display for SessionSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, &self.0, "No sessions found.")
    }
}
