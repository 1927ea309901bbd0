//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    import::ImportSummary,
    models::{Exercise, Plan, Session},
};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Exercise> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created exercise with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Exercise> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted exercise '{}' (ID: {}) with all goals and records using it",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Session> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted session '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => writeln!(f, "## Import of {}", path.display())?,
            None => writeln!(f, "## Import")?,
        }
        writeln!(f)?;
        writeln!(f, "- Imported: {}", self.imported)?;
        if self.skipped > 0 {
            writeln!(f, "- Skipped (already imported): {}", self.skipped)?;
        }
        writeln!(f, "- Entities created: {}", self.entities_created)?;

        if !self.failures.is_empty() {
            writeln!(f, "\n### Failures")?;
            writeln!(f)?;
            for failure in &self.failures {
                writeln!(f, "- {}: {}", failure.element, failure.error)?;
            }
        }
        writeln!(f)
    }
}
