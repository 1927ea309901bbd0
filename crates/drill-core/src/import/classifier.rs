//! Derives an exercise type from the attributes of a `btimer` element.
//!
//! Impetus only knows "work" and "not work". Non-work timers with `pause=0`
//! are rests. Non-work timers with `pause=1` are accepted only when their
//! description reads like a lead-in phrase; anything else is a data problem
//! that needs a human to look at the file.
//!
//! Recognised lead-ins are currently classified as REST, not PREPARATION.
//! This mirrors the data already stored by earlier imports and is kept until
//! the product owner decides otherwise.

use roxmltree::Node;

use super::{describe, flag_attr, required_attr, DESCRIPTION_ATTRIB, PAUSE_ATTRIB, WORK_ATTRIB};
use crate::{
    error::{Result, TrainingError},
    models::ExerciseType,
};

/// Description fragments that mark a paused non-work timer as a lead-in.
pub const PREPARATION_DESCRIPTIONS: [&str; 3] = ["Start", "Now ", "Get ready"];

/// Returns true when `description` contains one of the lead-in phrases.
pub fn is_preparation_phrase(description: &str) -> bool {
    PREPARATION_DESCRIPTIONS
        .iter()
        .any(|chunk| description.contains(chunk))
}

/// Classifies already-parsed attributes. `None` means the combination is not
/// recognised.
pub fn classify(work: bool, pause: bool, description: &str) -> Option<ExerciseType> {
    match (work, pause) {
        (true, _) => Some(ExerciseType::Work),
        (false, false) => Some(ExerciseType::Rest),
        (false, true) if is_preparation_phrase(description) => Some(ExerciseType::Rest),
        (false, true) => None,
    }
}

/// Reads `work`, `pause` and `desc` from a `btimer` element and classifies
/// it, failing with [`TrainingError::Classification`] on an unknown pattern.
pub fn classify_element(node: Node<'_, '_>) -> Result<ExerciseType> {
    let work = flag_attr(node, WORK_ATTRIB)?;
    let pause = flag_attr(node, PAUSE_ATTRIB)?;
    let description = required_attr(node, DESCRIPTION_ATTRIB)?;

    classify(work, pause, description).ok_or_else(|| TrainingError::Classification {
        element: describe(node),
        reason: "paused non-work timer without a recognised preparation description".to_string(),
    })
}
