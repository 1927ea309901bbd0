mod common;

use common::{create_test_db, exercise, timestamp};
use drill_core::{
    models::ExerciseType,
    params::{CreateExercise, CreatePlan, CreateSession, GoalInput, LoopInput, RecordInput},
    Database, TrainingError,
};
use jiff::{SignedDuration, Timestamp};

fn goal(goal_index: u32, exercise_id: u64) -> GoalInput {
    GoalInput {
        goal_index,
        exercise_id,
        duration: Some(30),
        repetitions: Some(1),
        pause: false,
    }
}

fn loop_input(loop_index: u32, goals: Vec<GoalInput>) -> LoopInput {
    LoopInput {
        loop_index,
        rounds: None,
        description: None,
        goals,
    }
}

fn plan_params(name: &str, loops: Vec<LoopInput>) -> CreatePlan {
    CreatePlan {
        name: name.to_string(),
        description: None,
        created: timestamp("2020-01-01T00:00:00Z"),
        loops,
    }
}

fn count(db: &Database) -> (usize, usize) {
    let plans = db.list_plans().expect("Failed to list plans");
    let loops = plans.iter().map(|p| p.total_loops as usize).sum();
    (plans.len(), loops)
}

fn record(exercise_id: u64, start: Timestamp, secs: i64, reps: Option<u32>) -> RecordInput {
    RecordInput {
        exercise_id,
        start,
        end: start
            .checked_add(SignedDuration::from_secs(secs))
            .expect("in range"),
        reps,
    }
}

fn session_params(records: Vec<RecordInput>) -> CreateSession {
    CreateSession {
        name: "Morning".to_string(),
        description: None,
        notes: None,
        start: timestamp("2020-06-01T07:00:00Z"),
        records,
    }
}

#[test]
fn test_plan_tree_round_trip() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);
    let rest = exercise(&db, "Rest", ExerciseType::Rest);

    let plan = db
        .create_plan(&plan_params(
            "Legs",
            vec![
                loop_input(0, vec![goal(0, squat.id)]),
                loop_input(1, vec![goal(0, squat.id), goal(1, rest.id)]),
            ],
        ))
        .expect("Failed to create plan");

    let fetched = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");

    let shape: Vec<(u32, Vec<u32>)> = fetched
        .loops
        .iter()
        .map(|l| (l.loop_index, l.goals.iter().map(|g| g.goal_index).collect()))
        .collect();
    assert_eq!(shape, vec![(0, vec![0]), (1, vec![0, 1])]);
    assert_eq!(fetched.loops[0].rounds, 1);
    assert_eq!(fetched.loops[1].goals[1].exercise.name, "Rest");
}

#[test]
fn test_plan_loops_in_any_input_order() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let plan = db
        .create_plan(&plan_params(
            "Shuffled",
            vec![
                loop_input(2, vec![goal(0, squat.id)]),
                loop_input(0, vec![goal(1, squat.id), goal(0, squat.id)]),
                loop_input(1, vec![goal(0, squat.id)]),
            ],
        ))
        .expect("Permuted indexes are valid");

    let indexes: Vec<u32> = plan.loops.iter().map(|l| l.loop_index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
}

#[test]
fn test_plan_with_missing_exercise_rolls_back() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let result = db.create_plan(&plan_params(
        "Broken",
        vec![
            loop_input(0, vec![goal(0, squat.id)]),
            loop_input(1, vec![goal(0, squat.id), goal(1, 4242)]),
        ],
    ));

    match result {
        Err(TrainingError::Reference { message }) => {
            assert!(message.contains("4242"));
            assert!(message.contains("Loop 1, Goal 1"));
        }
        other => panic!("Expected reference error, got {other:?}"),
    }
    assert_eq!(count(&db), (0, 0));
}

#[test]
fn test_plan_with_bad_indexes_writes_nothing() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let gap = db.create_plan(&plan_params(
        "Gap",
        vec![
            loop_input(0, vec![goal(0, squat.id)]),
            loop_input(2, vec![goal(0, squat.id)]),
        ],
    ));
    assert!(matches!(gap, Err(TrainingError::IndexIntegrity { .. })));

    let goal_gap = db.create_plan(&plan_params(
        "Goal gap",
        vec![loop_input(0, vec![goal(1, squat.id)])],
    ));
    match goal_gap {
        Err(TrainingError::IndexIntegrity { message }) => {
            assert!(message.contains("Missing first Loop"));
        }
        other => panic!("Expected index error, got {other:?}"),
    }

    let empty_loop = db.create_plan(&plan_params("Empty loop", vec![loop_input(0, vec![])]));
    assert!(matches!(empty_loop, Err(TrainingError::IndexIntegrity { .. })));

    assert_eq!(count(&db), (0, 0));
}

#[test]
fn test_plan_field_validation() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let blank = db.create_plan(&plan_params("   ", vec![]));
    assert!(matches!(blank, Err(TrainingError::Validation { ref field, .. }) if field == "name"));

    let mut zero_rounds = loop_input(0, vec![goal(0, squat.id)]);
    zero_rounds.rounds = Some(0);
    let result = db.create_plan(&plan_params("Zero", vec![zero_rounds]));
    assert!(matches!(result, Err(TrainingError::Validation { ref field, .. }) if field == "rounds"));

    let mut zero_duration = goal(0, squat.id);
    zero_duration.duration = Some(0);
    let result = db.create_plan(&plan_params("Zero", vec![loop_input(0, vec![zero_duration])]));
    assert!(matches!(result, Err(TrainingError::Validation { ref field, .. }) if field == "duration"));

    assert_eq!(count(&db), (0, 0));
}

#[test]
fn test_extend_plan_continues_loop_sequence() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let plan = db
        .create_plan(&plan_params("Growing", vec![loop_input(0, vec![goal(0, squat.id)])]))
        .expect("Failed to create plan");

    let restart = db.extend_plan(plan.id, &[loop_input(0, vec![goal(0, squat.id)])]);
    assert!(matches!(restart, Err(TrainingError::IndexIntegrity { .. })));

    let extended = db
        .extend_plan(plan.id, &[loop_input(1, vec![goal(0, squat.id)])])
        .expect("Failed to extend plan");
    assert_eq!(extended.loops.len(), 2);
    assert!(extended.last_updated >= plan.last_updated);

    let missing = db.extend_plan(9999, &[]);
    assert!(matches!(missing, Err(TrainingError::NotFound { entity: "Plan", .. })));
}

#[test]
fn test_extend_plan_with_no_loops_is_a_no_op() {
    let (_temp_dir, mut db) = create_test_db();
    let squat = exercise(&db, "Squats", ExerciseType::Work);

    let empty = db
        .create_plan(&plan_params("Empty", vec![]))
        .expect("Failed to create plan");
    let unchanged = db
        .extend_plan(empty.id, &[])
        .expect("Failed to extend empty plan");
    assert_eq!(unchanged.id, empty.id);
    assert!(unchanged.loops.is_empty());
    assert_eq!(unchanged.last_updated, empty.last_updated);

    let plan = db
        .create_plan(&plan_params("Full", vec![loop_input(0, vec![goal(0, squat.id)])]))
        .expect("Failed to create plan");
    let unchanged = db
        .extend_plan(plan.id, &[])
        .expect("Failed to extend plan");
    assert_eq!(unchanged.loops.len(), 1);
}

#[test]
fn test_find_plan_by_name_and_created() {
    let (_temp_dir, mut db) = create_test_db();
    let plan = db
        .create_plan(&plan_params("2020-01-01", vec![]))
        .expect("Failed to create plan");

    let found = db
        .find_plan("2020-01-01", timestamp("2020-01-01T00:00:00Z"))
        .expect("Failed to find plan");
    assert_eq!(found.map(|p| p.id), Some(plan.id));

    let other_day = db
        .find_plan("2020-01-01", timestamp("2020-01-02T00:00:00Z"))
        .expect("Failed to find plan");
    assert!(other_day.is_none());
}

#[test]
fn test_record_reps_must_match_exercise_type() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);
    let rest = exercise(&db, "Rest", ExerciseType::Rest);
    let start = timestamp("2020-06-01T07:00:00Z");

    let cases = [
        (work.id, 0, false),
        (work.id, 1, true),
        (rest.id, 1, false),
        (rest.id, 0, true),
    ];
    for (exercise_id, reps, should_pass) in cases {
        let result = db.create_session(&session_params(vec![record(
            exercise_id,
            start,
            20,
            Some(reps),
        )]));
        match (should_pass, result) {
            (true, Ok(session)) => assert_eq!(session.records[0].reps, reps),
            (false, Err(TrainingError::Validation { field, .. })) => assert_eq!(field, "reps"),
            (expected, other) => panic!("exercise {exercise_id} reps {reps}: expected pass={expected}, got {other:?}"),
        }
    }

    assert_eq!(db.list_sessions().expect("list").len(), 2);
}

#[test]
fn test_session_with_invalid_record_rolls_back() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);
    let start = timestamp("2020-06-01T07:00:00Z");

    let result = db.create_session(&session_params(vec![
        record(work.id, start, 20, Some(10)),
        record(777, start, 20, Some(10)),
    ]));
    match result {
        Err(TrainingError::Reference { message }) => assert!(message.contains("777")),
        other => panic!("Expected reference error, got {other:?}"),
    }
    assert!(db.list_sessions().expect("list").is_empty());
}

#[test]
fn test_record_time_validation() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);
    let start = timestamp("2020-06-01T07:00:00Z");

    let backwards = db.create_session(&session_params(vec![record(work.id, start, -5, Some(1))]));
    assert!(matches!(backwards, Err(TrainingError::Validation { ref field, .. }) if field == "end"));

    let future = Timestamp::now()
        .checked_add(SignedDuration::from_hours(24))
        .expect("in range");
    let result = db.create_session(&session_params(vec![record(work.id, future, 10, Some(1))]));
    assert!(matches!(result, Err(TrainingError::Validation { ref field, .. }) if field == "start"));

    let mut future_session = session_params(vec![]);
    future_session.start = future;
    let result = db.create_session(&future_session);
    assert!(matches!(result, Err(TrainingError::Validation { ref field, .. }) if field == "start"));

    let instant = db
        .create_session(&session_params(vec![record(work.id, start, 0, Some(1))]))
        .expect("Zero-length records are allowed");
    assert_eq!(instant.records[0].start, instant.records[0].end);
}

#[test]
fn test_add_record_to_missing_session() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);
    let result = db.add_record(
        31,
        &record(work.id, timestamp("2020-06-01T07:00:00Z"), 10, Some(1)),
    );
    assert!(matches!(result, Err(TrainingError::NotFound { entity: "Session", id: 31 })));
}

#[test]
fn test_get_or_create_exercise() {
    let (_temp_dir, db) = create_test_db();
    let params = CreateExercise::new("Push ups", ExerciseType::Work).with_description("Chest");

    let (first, created_first) = db.get_or_create_exercise(&params).expect("first call");
    let (second, created_second) = db.get_or_create_exercise(&params).expect("second call");
    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.id, second.id);

    let other = CreateExercise::new("Push ups", ExerciseType::Work).with_description("Diamond");
    let (third, created_third) = db.get_or_create_exercise(&other).expect("third call");
    assert!(created_third);
    assert_ne!(third.id, first.id);

    let (any, created_any) = db
        .get_or_create_exercise(&CreateExercise::new("Push ups", ExerciseType::Work))
        .expect("lookup without description");
    assert!(!created_any);
    assert_eq!(any.id, first.id);

    let (rest, created_rest) = db
        .get_or_create_exercise(&CreateExercise::new("Push ups", ExerciseType::Rest))
        .expect("different type");
    assert!(created_rest);
    assert_ne!(rest.id, first.id);
}

#[test]
fn test_blank_exercise_name_is_rejected() {
    let (_temp_dir, db) = create_test_db();
    let result = db.create_exercise(&CreateExercise::new("", ExerciseType::Rest));
    assert!(matches!(result, Err(TrainingError::Validation { ref field, .. }) if field == "name"));
}

#[test]
fn test_delete_exercise_cascades() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);
    let rest = exercise(&db, "Rest", ExerciseType::Rest);

    let plan = db
        .create_plan(&plan_params(
            "Cascade",
            vec![loop_input(0, vec![goal(0, work.id), goal(1, rest.id)])],
        ))
        .expect("Failed to create plan");
    let start = timestamp("2020-06-01T07:00:00Z");
    let session = db
        .create_session(&session_params(vec![
            record(work.id, start, 20, Some(5)),
            record(rest.id, start, 10, None),
        ]))
        .expect("Failed to create session");

    assert!(db.delete_exercise(work.id).expect("Failed to delete exercise"));
    assert!(!db.delete_exercise(work.id).expect("Second delete"));

    let plan = db.get_plan(plan.id).expect("get").expect("plan survives");
    assert_eq!(plan.loops[0].goals.len(), 1);
    assert_eq!(plan.loops[0].goals[0].exercise.id, rest.id);

    let session = db.get_session(session.id).expect("get").expect("session survives");
    assert_eq!(session.records.len(), 1);
    assert_eq!(session.records[0].exercise.id, rest.id);
}

#[test]
fn test_delete_plan_and_session_cascade() {
    let (_temp_dir, mut db) = create_test_db();
    let work = exercise(&db, "Burpees", ExerciseType::Work);

    let plan = db
        .create_plan(&plan_params("Gone", vec![loop_input(0, vec![goal(0, work.id)])]))
        .expect("Failed to create plan");
    let loop_id = plan.loops[0].id;
    assert!(db.delete_plan(plan.id).expect("delete plan"));
    assert!(db.get_plan(plan.id).expect("get").is_none());
    assert!(db.get_loop(loop_id).expect("get loop").is_none());
    assert!(db.get_goals(loop_id).expect("get goals").is_empty());
    assert!(!db.delete_plan(plan.id).expect("second delete"));

    let session = db
        .create_session(&session_params(vec![record(
            work.id,
            timestamp("2020-06-01T07:00:00Z"),
            20,
            Some(1),
        )]))
        .expect("Failed to create session");
    assert!(db.delete_session(session.id).expect("delete session"));
    assert!(db.get_records(session.id).expect("records").is_empty());

    // exercises are not owned by plans or sessions
    assert_eq!(db.list_exercises().expect("list").len(), 1);
}

#[test]
fn test_list_plans_newest_first() {
    let (_temp_dir, mut db) = create_test_db();
    for (name, created) in [
        ("old", "2019-01-01T00:00:00Z"),
        ("new", "2021-01-01T00:00:00Z"),
        ("mid", "2020-01-01T00:00:00Z"),
    ] {
        let mut params = plan_params(name, vec![]);
        params.created = timestamp(created);
        db.create_plan(&params).expect("Failed to create plan");
    }

    let names: Vec<String> = db
        .list_plans()
        .expect("Failed to list plans")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["new", "mid", "old"]);
}

#[test]
fn test_schema_survives_reopen() {
    let (temp_dir, db) = create_test_db();
    exercise(&db, "Plank", ExerciseType::Work);
    drop(db);

    let reopened = Database::new(temp_dir.path().join("test.db")).expect("reopen");
    assert_eq!(reopened.list_exercises().expect("list").len(), 1);
}
