//! Plan, Loop and Goal construction and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{exercise_columns, exercise_queries::fetch_exercise, timestamp_column};
use crate::{
    defaults,
    error::{DatabaseResultExt, Result, TrainingError},
    models::{Goal, Loop, Plan, PlanSummary},
    params::{CreateGoal, CreateLoop, CreatePlan, GoalInput, LoopInput},
    validation::{
        ensure_not_blank, ensure_positive, ensure_positive_if_set, validate_goal_indexes,
        validate_indexes, validate_loop_and_goal_indexes,
    },
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (name, description, created, last_updated) VALUES (?1, ?2, ?3, ?4)";
const INSERT_LOOP_SQL: &str =
    "INSERT INTO loops (plan_id, rounds, loop_index, description) VALUES (?1, ?2, ?3, ?4)";
const INSERT_GOAL_SQL: &str = "INSERT INTO goals (loop_id, exercise_id, goal_index, duration, repetitions, pause) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, name, description, created, last_updated FROM plans WHERE id = ?1";
const FIND_PLAN_SQL: &str = "SELECT id, name, description, created, last_updated FROM plans WHERE name = ?1 AND created = ?2 ORDER BY id LIMIT 1";
const SELECT_LOOPS_BY_PLAN_SQL: &str = "SELECT id, plan_id, rounds, loop_index, description FROM loops WHERE plan_id = ?1 ORDER BY loop_index";
const SELECT_LOOP_SQL: &str =
    "SELECT id, plan_id, rounds, loop_index, description FROM loops WHERE id = ?1";
const SELECT_LOOP_INDEXES_SQL: &str = "SELECT loop_index FROM loops WHERE plan_id = ?1";
const SELECT_GOALS_BY_LOOP_SQL: &str = "SELECT g.id, g.loop_id, g.goal_index, g.duration, g.repetitions, g.pause, e.id, e.name, e.description, e.exercise_type FROM goals g JOIN exercises e ON e.id = g.exercise_id WHERE g.loop_id = ?1 ORDER BY g.goal_index";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const CHECK_LOOP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM loops WHERE id = ?1)";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET last_updated = ?1 WHERE id = ?2";
const UPDATE_PLAN_TIMESTAMP_BY_LOOP_SQL: &str =
    "UPDATE plans SET last_updated = ?1 WHERE id = (SELECT plan_id FROM loops WHERE id = ?2)";
const LIST_PLAN_SUMMARIES_SQL: &str = "SELECT p.id, p.name, p.description, p.created, p.last_updated, (SELECT COUNT(*) FROM loops l WHERE l.plan_id = p.id), (SELECT COUNT(*) FROM goals g JOIN loops l ON l.id = g.loop_id WHERE l.plan_id = p.id) FROM plans p ORDER BY p.created DESC, p.id DESC";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

fn plan_columns(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        description: row.get(2)?,
        created: timestamp_column(row, 3)?,
        last_updated: timestamp_column(row, 4)?,
        loops: Vec::new(),
    })
}

fn loop_columns(row: &rusqlite::Row) -> rusqlite::Result<Loop> {
    Ok(Loop {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        rounds: row.get(2)?,
        loop_index: row.get(3)?,
        description: row.get(4)?,
        goals: Vec::new(),
    })
}

fn goal_columns(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get::<_, i64>(0)? as u64,
        loop_id: row.get::<_, i64>(1)? as u64,
        goal_index: row.get(2)?,
        duration: row.get(3)?,
        repetitions: row.get(4)?,
        pause: row.get(5)?,
        exercise: exercise_columns(row, 6)?,
    })
}

fn plan_exists(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check plan existence")
}

fn validate_goal_fields(goal: &GoalInput) -> Result<()> {
    ensure_positive_if_set("duration", goal.duration)?;
    ensure_positive_if_set("repetitions", goal.repetitions)
}

/// Inserts one loop row. Index integrity is the caller's business.
fn insert_loop(conn: &Connection, plan_id: u64, input: &LoopInput) -> Result<u64> {
    let rounds = input.rounds_or_default();
    ensure_positive("rounds", rounds)?;

    conn.execute(
        INSERT_LOOP_SQL,
        params![
            plan_id as i64,
            rounds,
            input.loop_index,
            input.description_or_default()
        ],
    )
    .db_context("Failed to insert loop")?;

    let loop_id = conn.last_insert_rowid() as u64;
    debug!(
        "Created loop {loop_id} at index {} of plan {plan_id}",
        input.loop_index
    );
    Ok(loop_id)
}

/// Inserts one goal row after resolving its exercise. `location` is only used
/// to point at the offending goal when the exercise is missing.
fn insert_goal(conn: &Connection, loop_id: u64, goal: &GoalInput, location: &str) -> Result<u64> {
    validate_goal_fields(goal)?;

    if fetch_exercise(conn, goal.exercise_id)?.is_none() {
        return Err(TrainingError::reference(format!(
            "It was not possible to create Goal because there is no Exercise with ID {}. {location}",
            goal.exercise_id
        )));
    }

    conn.execute(
        INSERT_GOAL_SQL,
        params![
            loop_id as i64,
            goal.exercise_id as i64,
            goal.goal_index,
            goal.duration,
            goal.repetitions,
            goal.pause
        ],
    )
    .db_context("Failed to insert goal")?;

    Ok(conn.last_insert_rowid() as u64)
}

/// Inserts every loop of `loops` with all of its goals.
fn insert_loop_tree(conn: &Connection, plan_id: u64, loops: &[LoopInput]) -> Result<usize> {
    let mut inserted = 0;
    for input in loops {
        let loop_id = insert_loop(conn, plan_id, input)?;
        inserted += 1;
        for goal in &input.goals {
            let location = format!("Loop {}, Goal {}", input.loop_index, goal.goal_index);
            insert_goal(conn, loop_id, goal, &location)?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

impl super::Database {
    /// Creates a plan together with its whole loop/goal tree.
    ///
    /// Index integrity of the tree is checked before anything is written.
    /// The plan, loops and goals are then inserted in one transaction; a
    /// missing exercise or an invalid field rolls every row back.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<Plan> {
        ensure_not_blank("name", &params.name)?;
        validate_loop_and_goal_indexes(&params.loops)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let created = params.created.to_string();
        let description = params
            .description
            .as_deref()
            .unwrap_or(defaults::PLAN_DESCRIPTION);

        tx.execute(
            INSERT_PLAN_SQL,
            params![params.name, description, &created, &created],
        )
        .db_context("Failed to insert plan")?;

        let plan_id = tx.last_insert_rowid() as u64;
        let inserted = insert_loop_tree(&tx, plan_id, &params.loops)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created plan {plan_id} with {inserted} loops and goals");

        self.get_plan(plan_id)?
            .ok_or(TrainingError::NotFound { entity: "Plan", id: plan_id })
    }

    /// Appends loops to an existing plan in one transaction.
    ///
    /// The existing and new loop indexes are validated together as a single
    /// sequence, as are the goals of every new loop. An empty `loops` slice
    /// changes nothing and returns the plan as stored.
    pub fn extend_plan(&mut self, plan_id: u64, loops: &[LoopInput]) -> Result<Plan> {
        if loops.is_empty() {
            return self
                .get_plan(plan_id)?
                .ok_or(TrainingError::NotFound { entity: "Plan", id: plan_id });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, plan_id)? {
            return Err(TrainingError::NotFound { entity: "Plan", id: plan_id });
        }

        let mut indexes: Vec<u32> = {
            let mut stmt = tx
                .prepare(SELECT_LOOP_INDEXES_SQL)
                .db_context("Failed to prepare query")?;
            let existing = stmt
                .query_map(params![plan_id as i64], |row| row.get(0))
                .db_context("Failed to query loop indexes")?
                .collect::<rusqlite::Result<Vec<u32>>>()
                .db_context("Failed to read loop index")?;
            existing
        };
        indexes.extend(loops.iter().map(|l| l.loop_index));
        validate_indexes(&indexes, "Plan", "Loop")?;
        for l in loops {
            validate_goal_indexes(&l.goals)?;
        }

        insert_loop_tree(&tx, plan_id, loops)?;
        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_plan(plan_id)?
            .ok_or(TrainingError::NotFound { entity: "Plan", id: plan_id })
    }

    /// Adds a single loop (without goals) to a plan.
    ///
    /// Only field constraints are checked here; the position is trusted.
    /// Use [`Self::extend_plan`] for index-checked appends.
    pub fn add_loop(&mut self, params: &CreateLoop) -> Result<Loop> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, params.plan_id)? {
            return Err(TrainingError::NotFound {
                entity: "Plan",
                id: params.plan_id,
            });
        }

        let input = LoopInput {
            loop_index: params.loop_index,
            rounds: params.rounds,
            description: params.description.clone(),
            goals: Vec::new(),
        };
        let loop_id = insert_loop(&tx, params.plan_id, &input)?;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), params.plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Loop {
            id: loop_id,
            plan_id: params.plan_id,
            rounds: input.rounds_or_default(),
            loop_index: input.loop_index,
            description: input.description_or_default().to_string(),
            goals: Vec::new(),
        })
    }

    /// Adds a single goal to a loop, resolving its exercise.
    pub fn add_goal(&mut self, params: &CreateGoal) -> Result<Goal> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let loop_exists: bool = tx
            .query_row(CHECK_LOOP_EXISTS_SQL, params![params.loop_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check loop existence")?;
        if !loop_exists {
            return Err(TrainingError::NotFound {
                entity: "Loop",
                id: params.loop_id,
            });
        }

        let location = format!("Loop ID {}, Goal {}", params.loop_id, params.goal.goal_index);
        let goal_id = insert_goal(&tx, params.loop_id, &params.goal, &location)?;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_BY_LOOP_SQL,
            params![Timestamp::now().to_string(), params.loop_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        let exercise = fetch_exercise(&tx, params.goal.exercise_id)?.ok_or(
            TrainingError::NotFound {
                entity: "Exercise",
                id: params.goal.exercise_id,
            },
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Goal {
            id: goal_id,
            loop_id: params.loop_id,
            exercise,
            goal_index: params.goal.goal_index,
            duration: params.goal.duration,
            repetitions: params.goal.repetitions,
            pause: params.goal.pause,
        })
    }

    /// Retrieves a plan by its ID with loops and goals eagerly loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], plan_columns)
            .optional()
            .db_context("Failed to query plan")?;

        self.load_loops(plan)
    }

    /// Looks a plan up by name and creation instant.
    pub fn find_plan(&self, name: &str, created: Timestamp) -> Result<Option<Plan>> {
        let plan = self
            .connection
            .query_row(
                FIND_PLAN_SQL,
                params![name, created.to_string()],
                plan_columns,
            )
            .optional()
            .db_context("Failed to look up plan")?;

        self.load_loops(plan)
    }

    fn load_loops(&self, plan: Option<Plan>) -> Result<Option<Plan>> {
        let Some(mut plan) = plan else {
            return Ok(None);
        };
        plan.loops = self.get_loops(plan.id)?;
        Ok(Some(plan))
    }

    /// Loops of a plan ordered by index, each with its goals.
    pub fn get_loops(&self, plan_id: u64) -> Result<Vec<Loop>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_LOOPS_BY_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let mut loops = stmt
            .query_map(params![plan_id as i64], loop_columns)
            .db_context("Failed to query loops")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read loop row")?;

        for l in &mut loops {
            l.goals = self.get_goals(l.id)?;
        }
        Ok(loops)
    }

    /// Retrieves a single loop with its goals.
    pub fn get_loop(&self, id: u64) -> Result<Option<Loop>> {
        let found = self
            .connection
            .query_row(SELECT_LOOP_SQL, params![id as i64], loop_columns)
            .optional()
            .db_context("Failed to query loop")?;

        match found {
            Some(mut l) => {
                l.goals = self.get_goals(l.id)?;
                Ok(Some(l))
            }
            None => Ok(None),
        }
    }

    /// Goals of a loop ordered by index.
    pub fn get_goals(&self, loop_id: u64) -> Result<Vec<Goal>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_GOALS_BY_LOOP_SQL)
            .db_context("Failed to prepare query")?;

        let goals = stmt
            .query_map(params![loop_id as i64], goal_columns)
            .db_context("Failed to query goals")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read goal row")?;

        Ok(goals)
    }

    /// Lists all plans, newest first, with loop and goal counts.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLAN_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(PlanSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    created: timestamp_column(row, 3)?,
                    last_updated: timestamp_column(row, 4)?,
                    total_loops: row.get(5)?,
                    total_goals: row.get(6)?,
                })
            })
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan row")?;

        Ok(summaries)
    }

    /// Permanently deletes a plan with its loops and goals. Returns false
    /// when no such plan exists.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        Ok(rows_affected > 0)
    }
}
