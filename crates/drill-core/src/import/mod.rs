//! Import of Impetus XML exports.
//!
//! An Impetus file holds a root element whose children each describe one
//! workout. A workout element carries `desc` (a `YYYY-MM-DD` date that is
//! also used as the name) and `summary`, and contains `btimer` elements
//! (single timed exercises) and `loop` elements (a `rounds` attribute plus
//! `btimer` children):
//!
//! ```xml
//! <impetus>
//!   <workout desc="2020-03-14" summary="Tabata">
//!     <btimer desc="Get ready" time="10" work="0" pause="1"/>
//!     <loop rounds="8">
//!       <btimer desc="Burpees" time="20" work="1" pause="0"/>
//!       <btimer desc="Rest" time="10" work="0" pause="0"/>
//!     </loop>
//!   </workout>
//! </impetus>
//! ```
//!
//! The same file can be read as Plans ([`PlanImporter`]) or as Sessions
//! ([`SessionImporter`]). Both start from the mode-independent [`Block`]
//! list produced by [`parse_blocks`]. Every workout element is imported in
//! its own transaction: a broken element is reported in the
//! [`ImportSummary`] and the rest of the file carries on.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use roxmltree::{Document, Node};
use serde::{Serialize, Serializer};

use crate::{
    db::Database,
    error::{Result, TrainingError},
    models::ExerciseType,
    params::CreateExercise,
};

pub mod classifier;
pub mod plan_import;
pub mod reps;
pub mod session_import;

pub use classifier::{classify, classify_element};
pub use plan_import::PlanImporter;
pub use reps::RepsTable;
pub use session_import::{flatten_blocks, schedule_end, ScheduledTimer, SessionImporter};

pub(crate) const TIMER_TAG: &str = "btimer";
pub(crate) const LOOP_TAG: &str = "loop";
pub(crate) const DESCRIPTION_ATTRIB: &str = "desc";
pub(crate) const SUMMARY_ATTRIB: &str = "summary";
pub(crate) const TIME_ATTRIB: &str = "time";
pub(crate) const ROUNDS_ATTRIB: &str = "rounds";
pub(crate) const WORK_ATTRIB: &str = "work";
pub(crate) const PAUSE_ATTRIB: &str = "pause";

/// One `btimer` element, parsed and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    /// Exercise name (`desc`)
    pub name: String,
    /// Classified exercise type
    pub exercise_type: ExerciseType,
    /// Duration in seconds (`time`)
    pub seconds: u32,
    /// `pause` read as a 0/1 flag
    pub pause: bool,
    /// `pause` exactly as written in the file
    pub raw_pause: String,
}

/// A direct child of a workout element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A top-level `btimer`
    Timer(Timer),
    /// A `loop` with its timers in document order
    Loop { rounds: u32, timers: Vec<Timer> },
}

/// Outcome of importing one file or document.
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    /// File the summary belongs to, if the import came from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Workout elements stored
    pub imported: usize,
    /// Workout elements left alone because they were already stored
    pub skipped: usize,
    /// Rows created: plans, loops, goals, sessions, records and exercises
    pub entities_created: usize,
    /// Workout elements that failed, each rolled back on its own
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds another summary into this one (used for multi-file imports).
    pub fn merge(&mut self, other: ImportSummary) {
        self.imported += other.imported;
        self.skipped += other.skipped;
        self.entities_created += other.entities_created;
        self.failures.extend(other.failures);
    }
}

/// A workout element that could not be imported.
#[derive(Debug, Serialize)]
pub struct ImportFailure {
    /// `desc` of the element, or its position when it has none
    pub element: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: TrainingError,
}

fn serialize_error<S: Serializer>(error: &TrainingError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Reads an import file into memory.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TrainingError::FileSystem {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parses XML text, mapping syntax errors to [`TrainingError::Format`].
pub(crate) fn parse_document(content: &str) -> Result<Document<'_>> {
    Document::parse(content).map_err(|e| TrainingError::format(excerpt(content), e.to_string()))
}

fn excerpt(content: &str) -> String {
    const MAX: usize = 60;
    match content.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}

/// Element children of `node` in document order.
pub(crate) fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Renders an element with its attributes for error messages.
pub(crate) fn describe(node: Node<'_, '_>) -> String {
    let mut out = format!("<{}", node.tag_name().name());
    for attribute in node.attributes() {
        out.push_str(&format!(" {}=\"{}\"", attribute.name(), attribute.value()));
    }
    out.push('>');
    out
}

/// Name used in [`ImportFailure`] for a workout element.
pub(crate) fn element_label(node: Node<'_, '_>, position: usize) -> String {
    node.attribute(DESCRIPTION_ATTRIB)
        .map(String::from)
        .unwrap_or_else(|| format!("element #{position}"))
}

pub(crate) fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        TrainingError::format(describe(node), format!("missing required attribute '{name}'"))
    })
}

pub(crate) fn u32_attr(node: Node<'_, '_>, name: &str) -> Result<u32> {
    let raw = required_attr(node, name)?;
    raw.trim().parse::<u32>().map_err(|_| {
        TrainingError::format(
            raw,
            format!("attribute '{name}' of {} is not a non-negative integer", describe(node)),
        )
    })
}

/// Reads a 0/1 style flag; any non-zero integer counts as set.
pub(crate) fn flag_attr(node: Node<'_, '_>, name: &str) -> Result<bool> {
    let raw = required_attr(node, name)?;
    raw.trim().parse::<i64>().map(|v| v != 0).map_err(|_| {
        TrainingError::format(
            raw,
            format!("attribute '{name}' of {} is not an integer flag", describe(node)),
        )
    })
}

/// Parses a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(raw: &str) -> Result<Timestamp> {
    let date = Date::strptime("%Y-%m-%d", raw.trim())
        .map_err(|e| TrainingError::format(raw, format!("expected a YYYY-MM-DD date: {e}")))?;
    date.to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|e| TrainingError::format(raw, e.to_string()))
}

/// Parses and classifies one `btimer` element.
pub fn parse_timer(node: Node<'_, '_>) -> Result<Timer> {
    Ok(Timer {
        name: required_attr(node, DESCRIPTION_ATTRIB)?.to_string(),
        exercise_type: classify_element(node)?,
        seconds: u32_attr(node, TIME_ATTRIB)?,
        pause: flag_attr(node, PAUSE_ATTRIB)?,
        raw_pause: required_attr(node, PAUSE_ATTRIB)?.to_string(),
    })
}

/// Parses the children of a workout element into blocks.
///
/// Anything other than `btimer` at the top level, `loop` at the top level,
/// or `btimer` inside a `loop` is rejected.
pub fn parse_blocks(workout: Node<'_, '_>) -> Result<Vec<Block>> {
    element_children(workout)
        .map(|child| match child.tag_name().name() {
            TIMER_TAG => parse_timer(child).map(Block::Timer),
            LOOP_TAG => {
                let rounds = u32_attr(child, ROUNDS_ATTRIB)?;
                let timers = element_children(child)
                    .map(|timer| {
                        if timer.tag_name().name() != TIMER_TAG {
                            return Err(TrainingError::format(
                                describe(timer),
                                format!("only <{TIMER_TAG}> elements are allowed inside <{LOOP_TAG}>"),
                            ));
                        }
                        parse_timer(timer)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Block::Loop { rounds, timers })
            }
            _ => Err(TrainingError::format(
                describe(child),
                format!("expected <{TIMER_TAG}> or <{LOOP_TAG}>"),
            )),
        })
        .collect()
}

/// Get-or-create cache for the exercises of one workout element.
pub(crate) struct ExerciseResolver {
    ids: HashMap<(String, ExerciseType), u64>,
    pub(crate) created: usize,
}

impl ExerciseResolver {
    pub(crate) fn new() -> Self {
        Self {
            ids: HashMap::new(),
            created: 0,
        }
    }

    /// Id of the exercise for `timer`, looked up by name and type.
    pub(crate) fn resolve(&mut self, db: &Database, timer: &Timer) -> Result<u64> {
        let key = (timer.name.clone(), timer.exercise_type);
        if let Some(id) = self.ids.get(&key) {
            return Ok(*id);
        }
        let (exercise, created) =
            db.get_or_create_exercise(&CreateExercise::new(&timer.name, timer.exercise_type))?;
        if created {
            self.created += 1;
        }
        self.ids.insert(key, exercise.id);
        Ok(exercise.id)
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}s)",
            self.name,
            self.exercise_type.as_str(),
            self.seconds
        )
    }
}
