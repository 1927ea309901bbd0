//! Reads Impetus workouts as reusable Plans.
//!
//! Each direct child of a workout becomes one Loop at its document position.
//! A top-level `btimer` is wrapped in a single-round Loop holding one Goal; a
//! `loop` keeps its `rounds` and turns every `btimer` child into a Goal at
//! its local position. Goals get the timer's duration, one repetition, and
//! `pause` set when the file's `pause` attribute is the literal text `0`.

use std::path::Path;

use log::{info, warn};
use roxmltree::Node;

use super::{
    element_children, element_label, parse_blocks, parse_date, parse_document, read_file,
    required_attr, Block, ExerciseResolver, ImportFailure, ImportSummary, Timer,
    DESCRIPTION_ATTRIB, SUMMARY_ATTRIB,
};
use crate::{
    db::Database,
    defaults,
    error::Result,
    params::{CreatePlan, GoalInput, LoopInput},
};

/// What happened to one workout element.
enum PlanOutcome {
    Created { entities: usize },
    Skipped,
}

/// Imports Impetus workouts into the database as Plans.
pub struct PlanImporter<'db> {
    db: &'db mut Database,
}

impl<'db> PlanImporter<'db> {
    pub fn new(db: &'db mut Database) -> Self {
        Self { db }
    }

    /// Imports every workout of the file at `path`.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let content = read_file(path)?;
        let mut summary = self.import_str(&content)?;
        summary.source = Some(path.to_path_buf());
        Ok(summary)
    }

    /// Imports every workout of an XML document.
    ///
    /// Only unreadable XML fails the whole call. A workout that fails is
    /// rolled back, recorded in [`ImportSummary::failures`] and skipped.
    pub fn import_str(&mut self, content: &str) -> Result<ImportSummary> {
        let document = parse_document(content)?;
        let mut summary = ImportSummary::default();

        for (position, workout) in element_children(document.root_element()).enumerate() {
            let label = element_label(workout, position);
            match self.import_workout(workout) {
                Ok(PlanOutcome::Created { entities }) => {
                    info!("Imported plan '{label}' ({entities} entities)");
                    summary.imported += 1;
                    summary.entities_created += entities;
                }
                Ok(PlanOutcome::Skipped) => {
                    warn!("Plan '{label}' was already imported, skipping");
                    summary.skipped += 1;
                }
                Err(error) => {
                    warn!("Failed to import plan '{label}': {error}");
                    summary.failures.push(ImportFailure {
                        element: label,
                        error,
                    });
                }
            }
        }

        Ok(summary)
    }

    fn import_workout(&mut self, workout: Node<'_, '_>) -> Result<PlanOutcome> {
        let name = required_attr(workout, DESCRIPTION_ATTRIB)?;
        let created = parse_date(name)?;
        let description = required_attr(workout, SUMMARY_ATTRIB)?;
        let blocks = parse_blocks(workout)?;

        let existing = self.db.find_plan(name, created)?;
        // Nothing to add to a stored plan: either it is complete already or
        // the workout is empty as well
        if existing
            .as_ref()
            .is_some_and(|plan| !plan.loops.is_empty() || blocks.is_empty())
        {
            return Ok(PlanOutcome::Skipped);
        }

        let db: &Database = self.db;
        let mut resolver = ExerciseResolver::new();
        let loops = blocks
            .iter()
            .enumerate()
            .map(|(position, block)| build_loop(db, &mut resolver, position as u32, block))
            .collect::<Result<Vec<_>>>()?;
        let tree_size: usize = loops.iter().map(|l| 1 + l.goals.len()).sum();

        match existing {
            Some(plan) => {
                self.db.extend_plan(plan.id, &loops)?;
                Ok(PlanOutcome::Created {
                    entities: tree_size + resolver.created,
                })
            }
            None => {
                self.db.create_plan(&CreatePlan {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    created,
                    loops,
                })?;
                Ok(PlanOutcome::Created {
                    entities: 1 + tree_size + resolver.created,
                })
            }
        }
    }
}

fn build_goal(
    db: &Database,
    resolver: &mut ExerciseResolver,
    goal_index: u32,
    timer: &Timer,
) -> Result<GoalInput> {
    Ok(GoalInput {
        goal_index,
        exercise_id: resolver.resolve(db, timer)?,
        duration: Some(timer.seconds),
        repetitions: Some(defaults::IMPORT_GOAL_REPETITIONS),
        // Goals pause only when the file's pause attribute reads exactly "0"
        pause: timer.raw_pause == "0",
    })
}

fn build_loop(
    db: &Database,
    resolver: &mut ExerciseResolver,
    loop_index: u32,
    block: &Block,
) -> Result<LoopInput> {
    match block {
        Block::Timer(timer) => Ok(LoopInput {
            loop_index,
            rounds: Some(1),
            description: None,
            goals: vec![build_goal(db, resolver, 0, timer)?],
        }),
        Block::Loop { rounds, timers } => {
            let goals = timers
                .iter()
                .enumerate()
                .map(|(position, timer)| build_goal(db, resolver, position as u32, timer))
                .collect::<Result<Vec<_>>>()?;
            Ok(LoopInput {
                loop_index,
                rounds: Some(*rounds),
                description: None,
                goals,
            })
        }
    }
}
