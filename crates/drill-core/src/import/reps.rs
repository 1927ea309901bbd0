//! Repetition lookup for WORK records created by the Session importer.
//!
//! Impetus exports only carry durations. A [`RepsTable`] maps exercise names
//! to the reps one execution stands for; names it does not know count as a
//! single rep.

use std::collections::HashMap;

use crate::defaults;

/// Exercise name to reps mapping with a fallback.
#[derive(Debug, Clone)]
pub struct RepsTable {
    entries: HashMap<String, u32>,
    fallback: u32,
}

impl RepsTable {
    /// An empty table falling back to [`defaults::IMPORT_WORK_REPS`].
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: defaults::IMPORT_WORK_REPS,
        }
    }

    /// Adds or replaces the reps for one exercise name.
    pub fn with_entry(mut self, name: impl Into<String>, reps: u32) -> Self {
        self.entries.insert(name.into(), reps);
        self
    }

    /// Changes the reps used for unknown names.
    pub fn with_fallback(mut self, reps: u32) -> Self {
        self.fallback = reps;
        self
    }

    /// Reps for one execution of the named exercise.
    pub fn reps_for(&self, name: &str) -> u32 {
        self.entries.get(name).copied().unwrap_or(self.fallback)
    }
}

impl Default for RepsTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_names_use_fallback() {
        let table = RepsTable::new().with_entry("Burpees", 12);
        assert_eq!(table.reps_for("Burpees"), 12);
        assert_eq!(table.reps_for("Squats"), 1);
        assert_eq!(table.with_fallback(5).reps_for("Squats"), 5);
    }
}
