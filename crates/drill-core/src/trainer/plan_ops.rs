//! Plan operations for the Trainer.

use jiff::Timestamp;

use super::Trainer;
use crate::{
    error::Result,
    models::{Goal, Loop, Plan, PlanSummary},
    params::{CreateGoal, CreateLoop, CreatePlan, Id, LoopInput},
};

impl Trainer {
    /// Creates a plan with its loop/goal tree in one transaction.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        self.with_database(move |db| db.create_plan(&params)).await
    }

    /// Appends index-checked loops to an existing plan.
    pub async fn extend_plan(&self, plan_id: u64, loops: Vec<LoopInput>) -> Result<Plan> {
        self.with_database(move |db| db.extend_plan(plan_id, &loops))
            .await
    }

    /// Adds a single loop to a plan.
    pub async fn add_loop(&self, params: &CreateLoop) -> Result<Loop> {
        let params = params.clone();
        self.with_database(move |db| db.add_loop(&params)).await
    }

    /// Adds a single goal to a loop.
    pub async fn add_goal(&self, params: &CreateGoal) -> Result<Goal> {
        let params = params.clone();
        self.with_database(move |db| db.add_goal(&params)).await
    }

    /// Retrieves a plan with its loops and goals.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        self.with_database(move |db| db.get_plan(id)).await
    }

    /// Looks a plan up by name and creation instant.
    pub async fn find_plan(&self, name: &str, created: Timestamp) -> Result<Option<Plan>> {
        let name = name.to_string();
        self.with_database(move |db| db.find_plan(&name, created))
            .await
    }

    /// Lists all plans as summaries, newest first.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        self.with_database(|db| db.list_plans()).await
    }

    /// Permanently deletes a plan. Returns the deleted plan, or `None` if it
    /// did not exist.
    pub async fn delete_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        self.with_database(move |db| {
            let Some(plan) = db.get_plan(id)? else {
                return Ok(None);
            };
            db.delete_plan(id)?;
            Ok(Some(plan))
        })
        .await
    }
}
