#![allow(dead_code)]

use drill_core::{
    models::{Exercise, ExerciseType},
    params::CreateExercise,
    Database, TrainerBuilder,
};
use jiff::Timestamp;
use tempfile::TempDir;

/// Helper function to create a test trainer
pub async fn create_test_trainer() -> (TempDir, drill_core::Trainer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let trainer = TrainerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create trainer");
    (temp_dir, trainer)
}

/// Helper function to create a file-backed test database
pub fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).expect("Failed to create database");
    (temp_dir, db)
}

pub fn exercise(db: &Database, name: &str, exercise_type: ExerciseType) -> Exercise {
    db.create_exercise(&CreateExercise::new(name, exercise_type))
        .expect("Failed to create exercise")
}

pub fn timestamp(rfc3339: &str) -> Timestamp {
    rfc3339.parse().expect("valid timestamp")
}

pub const TABATA_XML: &str = r#"<impetus>
  <workout desc="2020-03-14" summary="Tabata">
    <btimer desc="Get ready" time="10" work="0" pause="1"/>
    <loop rounds="8">
      <btimer desc="Burpees" time="20" work="1" pause="0"/>
      <btimer desc="Rest" time="10" work="0" pause="0"/>
    </loop>
  </workout>
</impetus>"#;
