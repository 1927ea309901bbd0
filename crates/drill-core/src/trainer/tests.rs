//! Tests for the trainer module.

use jiff::{SignedDuration, Timestamp};
use tempfile::TempDir;

use super::*;
use crate::{
    models::ExerciseType,
    params::{CreateExercise, CreateGoal, CreateLoop, CreatePlan, CreateSession, GoalInput, Id, LoopInput, RecordInput},
};

/// Helper function to create a test trainer
async fn create_test_trainer() -> (TempDir, Trainer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let trainer = TrainerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create trainer");
    (temp_dir, trainer)
}

fn past(rfc3339: &str) -> Timestamp {
    rfc3339.parse().expect("valid timestamp")
}

async fn work_exercise(trainer: &Trainer, name: &str) -> u64 {
    trainer
        .create_exercise(&CreateExercise::new(name, ExerciseType::Work))
        .await
        .expect("Failed to create exercise")
        .id
}

#[tokio::test]
async fn test_builder_creates_missing_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("dir").join("drill.db");

    let trainer = TrainerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create trainer");

    assert_eq!(trainer.database_path(), db_path.as_path());
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_exercise_lifecycle() {
    let (_temp_dir, trainer) = create_test_trainer().await;

    let id = work_exercise(&trainer, "Burpees").await;
    let fetched = trainer
        .get_exercise(&Id { id })
        .await
        .expect("Failed to get exercise")
        .expect("Exercise should exist");
    assert_eq!(fetched.name, "Burpees");

    let (again, created) = trainer
        .get_or_create_exercise(&CreateExercise::new("Burpees", ExerciseType::Work))
        .await
        .expect("Failed to get or create");
    assert!(!created);
    assert_eq!(again.id, id);

    let deleted = trainer
        .delete_exercise(&Id { id })
        .await
        .expect("Failed to delete exercise");
    assert_eq!(deleted.map(|e| e.id), Some(id));

    let missing = trainer
        .delete_exercise(&Id { id })
        .await
        .expect("Delete of missing exercise should not fail");
    assert!(missing.is_none());
    assert!(trainer.list_exercises().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_create_and_get_plan() {
    let (_temp_dir, trainer) = create_test_trainer().await;
    let exercise_id = work_exercise(&trainer, "Squats").await;

    let plan = trainer
        .create_plan(&CreatePlan {
            name: "Legs".to_string(),
            description: Some("Leg day".to_string()),
            created: past("2020-01-01T08:00:00Z"),
            loops: vec![LoopInput {
                loop_index: 0,
                rounds: Some(3),
                description: None,
                goals: vec![GoalInput {
                    goal_index: 0,
                    exercise_id,
                    duration: Some(45),
                    repetitions: None,
                    pause: false,
                }],
            }],
        })
        .await
        .expect("Failed to create plan");

    let fetched = trainer
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(fetched, plan);
    assert_eq!(fetched.total_duration(), 135);

    let found = trainer
        .find_plan("Legs", past("2020-01-01T08:00:00Z"))
        .await
        .expect("Failed to find plan");
    assert_eq!(found.map(|p| p.id), Some(plan.id));
}

#[tokio::test]
async fn test_add_loop_and_goal() {
    let (_temp_dir, trainer) = create_test_trainer().await;
    let exercise_id = work_exercise(&trainer, "Lunges").await;

    let plan = trainer
        .create_plan(&CreatePlan {
            name: "Empty".to_string(),
            description: None,
            created: past("2020-01-01T08:00:00Z"),
            loops: vec![],
        })
        .await
        .expect("Empty plans are allowed");
    assert!(plan.loops.is_empty());

    let new_loop = trainer
        .add_loop(&CreateLoop {
            plan_id: plan.id,
            loop_index: 0,
            rounds: None,
            description: Some("Warm up".to_string()),
        })
        .await
        .expect("Failed to add loop");
    assert_eq!(new_loop.rounds, 1);

    let goal = trainer
        .add_goal(&CreateGoal {
            loop_id: new_loop.id,
            goal: GoalInput {
                goal_index: 0,
                exercise_id,
                duration: None,
                repetitions: Some(10),
                pause: true,
            },
        })
        .await
        .expect("Failed to add goal");
    assert_eq!(goal.exercise.name, "Lunges");

    let missing = trainer
        .add_loop(&CreateLoop {
            plan_id: 999,
            loop_index: 0,
            rounds: None,
            description: None,
        })
        .await;
    assert!(matches!(
        missing,
        Err(TrainingError::NotFound { entity: "Plan", id: 999 })
    ));
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (_temp_dir, trainer) = create_test_trainer().await;
    let exercise_id = work_exercise(&trainer, "Push ups").await;
    let start = past("2020-06-01T07:00:00Z");
    let end = start
        .checked_add(SignedDuration::from_secs(60))
        .expect("in range");

    let session = trainer
        .create_session(&CreateSession {
            name: "Morning".to_string(),
            description: None,
            notes: Some("Felt good".to_string()),
            start,
            records: vec![RecordInput {
                exercise_id,
                start,
                end,
                reps: Some(20),
            }],
        })
        .await
        .expect("Failed to create session");

    let record = trainer
        .add_record(
            session.id,
            &RecordInput {
                exercise_id,
                start: end,
                end: end.checked_add(SignedDuration::from_secs(60)).expect("in range"),
                reps: Some(15),
            },
        )
        .await
        .expect("Failed to add record");
    assert_eq!(record.session_id, session.id);

    let summaries = trainer.list_sessions().await.expect("Failed to list sessions");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_records, 2);
    assert_eq!(summaries[0].total_reps, 35);

    let deleted = trainer
        .delete_session(&Id { id: session.id })
        .await
        .expect("Failed to delete session")
        .expect("Session should exist");
    assert_eq!(deleted.records.len(), 2);
    assert!(trainer.list_sessions().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_import_plan_file() {
    let (temp_dir, trainer) = create_test_trainer().await;
    let path = temp_dir.path().join("export.xml");
    std::fs::write(
        &path,
        r#"<impetus>
  <workout desc="2020-03-14" summary="Tabata">
    <btimer desc="Get ready" time="10" work="0" pause="1"/>
    <loop rounds="8">
      <btimer desc="Burpees" time="20" work="1" pause="0"/>
      <btimer desc="Rest" time="10" work="0" pause="0"/>
    </loop>
  </workout>
</impetus>"#,
    )
    .expect("Failed to write import file");

    let summary = trainer
        .import_plan_file(&path)
        .await
        .expect("Failed to import plans");
    assert!(summary.is_success());
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.source.as_deref(), Some(path.as_path()));

    let plans = trainer.list_plans().await.expect("Failed to list plans");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].total_loops, 2);
    assert_eq!(plans[0].total_goals, 3);

    let again = trainer
        .import_plan_file(&path)
        .await
        .expect("Failed to re-import plans");
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 1);
}

#[tokio::test]
async fn test_import_session_file_uses_reps_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let trainer = TrainerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_reps_table(RepsTable::new().with_entry("Burpees", 12))
        .build()
        .await
        .expect("Failed to create trainer");

    let path = temp_dir.path().join("export.xml");
    std::fs::write(
        &path,
        r#"<impetus>
  <workout desc="2020-03-14" summary="Tabata">
    <loop rounds="2">
      <btimer desc="Burpees" time="20" work="1" pause="0"/>
      <btimer desc="Rest" time="10" work="0" pause="0"/>
    </loop>
  </workout>
</impetus>"#,
    )
    .expect("Failed to write import file");

    let summary = trainer
        .import_session_file(&path)
        .await
        .expect("Failed to import sessions");
    assert_eq!(summary.imported, 1);

    let sessions = trainer.list_sessions().await.expect("Failed to list sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].total_records, 4);
    assert_eq!(sessions[0].total_reps, 24);
}

#[tokio::test]
async fn test_missing_import_file_is_filesystem_error() {
    let (temp_dir, trainer) = create_test_trainer().await;
    let result = trainer
        .import_plan_file(temp_dir.path().join("missing.xml"))
        .await;
    assert!(matches!(result, Err(TrainingError::FileSystem { .. })));
}

#[tokio::test]
async fn test_import_from_memory_isolates_elements() {
    let (_temp_dir, trainer) = create_test_trainer().await;
    let xml = r#"<impetus>
  <workout desc="2020-05-01" summary="Ok">
    <btimer desc="Burpees" time="20" work="1" pause="0"/>
  </workout>
  <workout desc="2020-05-02" summary="Broken">
    <btimer desc="Burpees" time="twenty" work="1" pause="0"/>
  </workout>
</impetus>"#;

    let plans = trainer.import_plans(xml).await.expect("Failed to import plans");
    assert_eq!(plans.imported, 1);
    assert_eq!(plans.failures.len(), 1);
    assert_eq!(plans.failures[0].element, "2020-05-02");

    let sessions = trainer
        .import_sessions(xml)
        .await
        .expect("Failed to import sessions");
    assert_eq!(sessions.imported, 1);
    assert_eq!(sessions.failures.len(), 1);
}
