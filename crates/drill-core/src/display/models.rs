//! Display implementations for domain models.
//!
//! Plans render as a header, metadata bullets and one section per loop;
//! sessions render as a header followed by a numbered timeline of records.

use std::fmt;

use super::datetime::{Clock, LocalDateTime};
use crate::models::{
    Exercise, ExerciseType, Goal, Loop, Plan, PlanSummary, Record, Session, SessionSummary,
};

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", self.exercise_type)?;
        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Created: {}", LocalDateTime(&self.created))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.last_updated))?;
        writeln!(f, "- Total time: {}", Clock(self.total_duration()))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.loops.is_empty() {
            writeln!(f, "\nNo loops in this plan.")?;
            return Ok(());
        }

        writeln!(f, "\n## Loops")?;
        writeln!(f)?;
        for l in &self.loops {
            write!(f, "{l}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounds = if self.rounds == 1 {
            "1 round".to_string()
        } else {
            format!("{} rounds", self.rounds)
        };
        writeln!(f, "### Loop {} ({rounds})", self.loop_index)?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }
        for goal in &self.goals {
            writeln!(f, "{goal}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} [{}]",
            self.goal_index, self.exercise.name, self.exercise.exercise_type
        )?;
        if let Some(duration) = self.duration {
            write!(f, " {}", Clock(u64::from(duration)))?;
        }
        if let Some(repetitions) = self.repetitions {
            write!(f, " x{repetitions}")?;
        }
        if self.pause {
            write!(f, " (pause)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Started: {}", LocalDateTime(&self.start))?;
        if let Some(end) = self.end() {
            writeln!(f, "- Finished: {}", LocalDateTime(&end))?;
        }
        writeln!(f, "- Total reps: {}", self.total_reps())?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        if !self.notes.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }

        if self.records.is_empty() {
            writeln!(f, "\nNo records in this session.")?;
            return Ok(());
        }

        writeln!(f, "\n## Records")?;
        writeln!(f)?;
        for (position, record) in self.records.iter().enumerate() {
            writeln!(f, "{}. {record}", position + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.duration().as_secs().max(0) as u64;
        write!(
            f,
            "{} [{}] {}",
            self.exercise.name,
            self.exercise.exercise_type,
            Clock(seconds)
        )?;
        if self.reps > 0 {
            write!(f, " x{}", self.reps)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({} loops, {} goals)",
            self.name, self.id, self.total_loops, self.total_goals
        )?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created))?;
        writeln!(f)
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({} records, {} reps)",
            self.name, self.id, self.total_records, self.total_reps
        )?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        writeln!(f, "- **Started**: {}", LocalDateTime(&self.start))?;
        writeln!(f)
    }
}
