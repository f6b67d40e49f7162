use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// How a moved task's start violates a predecessor's finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The proposed start lands on a day strictly before the predecessor
    /// finishes.
    BeforePredecessor,
    /// The proposed start shares the predecessor's finish day.
    DuringOrEnd,
}

/// Outcome of a violated finish-to-start link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependencyConflict {
    /// Earliest permissible start given the predecessor.
    pub min_start_date: DateTime<Utc>,
    pub kind: ConflictKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveConflict {
    pub conflict: DependencyConflict,
    pub predecessor_id: i32,
}

/// Checks a proposed start date against the task's direct predecessors.
///
/// Comparison is day-granular: starting on a predecessor's finish day is a
/// `DuringOrEnd` violation, any earlier day is `BeforePredecessor`, the day
/// after is clean. Predecessors are walked in list order and the first
/// violated link wins; its finish becomes `min_start_date`. Returns `None`
/// when nothing is violated (unknown task ids, unknown predecessor ids, and
/// empty predecessor lists included), which is a normal outcome, not an
/// error.
pub fn detect_conflict_for_move(
    tasks: &[Task],
    task_id: i32,
    proposed_start: DateTime<Utc>,
) -> Option<MoveConflict> {
    let task = tasks.iter().find(|task| task.id == task_id)?;
    let proposed_day = proposed_start.date_naive();

    for pred_id in &task.predecessors {
        let predecessor = match tasks.iter().find(|task| task.id == *pred_id) {
            Some(predecessor) => predecessor,
            None => continue,
        };
        let predecessor_end_day = predecessor.end_date.date_naive();
        if proposed_day > predecessor_end_day {
            continue;
        }
        let kind = if proposed_day == predecessor_end_day {
            ConflictKind::DuringOrEnd
        } else {
            ConflictKind::BeforePredecessor
        };
        return Some(MoveConflict {
            conflict: DependencyConflict {
                min_start_date: predecessor.end_date,
                kind,
            },
            predecessor_id: *pred_id,
        });
    }

    None
}
