use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceAssignment;

/// Scheduling constraint kinds a task may carry. The constraint date lives
/// in [`Task::constraint_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    MustStartOn,
    MustFinishOn,
    StartNoEarlierThan,
    FinishNoLaterThan,
}

/// A scheduled unit of work. Owned and mutated by the backing store; the
/// engine reads snapshots and proposes updates through [`crate::store::ProjectStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Never precedes `start_date` after an applied update.
    pub end_date: DateTime<Utc>,
    /// Completed fraction, kept in [0, 1].
    #[serde(default)]
    pub progress: f64,
    /// Summary rows group other tasks and carry no work of their own.
    #[serde(default)]
    pub is_summary: bool,
    /// Finish-to-start predecessors, in user order.
    #[serde(default)]
    pub predecessors: Vec<i32>,
    /// Current assignment format.
    #[serde(default)]
    pub resource_assignments: Vec<ResourceAssignment>,
    /// Deprecated assignment format kept so old project files still load.
    /// Each id carries an implied 1.0 units.
    #[serde(default)]
    pub resource_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<ConstraintType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            end_date,
            progress: 0.0,
            is_summary: false,
            predecessors: Vec::new(),
            resource_assignments: Vec::new(),
            resource_ids: Vec::new(),
            constraint: None,
            constraint_date: None,
        }
    }

    /// Normalizes the current and legacy assignment formats into one list.
    ///
    /// The legacy `resource_ids` form only applies when no current-format
    /// assignments exist; each legacy id counts as full-time. Algorithms
    /// resolve assignments through this accessor (or
    /// [`Task::assignment_units`]) so the fallback lives in one place.
    pub fn effective_assignments(&self) -> Vec<ResourceAssignment> {
        if !self.resource_assignments.is_empty() {
            return self.resource_assignments.clone();
        }
        self.resource_ids
            .iter()
            .map(|id| ResourceAssignment::new(id.clone(), 1.0))
            .collect()
    }

    /// Units this task draws from `resource_id`, resolved through the same
    /// current/legacy fallback as [`Task::effective_assignments`].
    pub fn assignment_units(&self, resource_id: &str) -> Option<f64> {
        if !self.resource_assignments.is_empty() {
            return self
                .resource_assignments
                .iter()
                .find(|assignment| assignment.resource_id == resource_id)
                .map(|assignment| assignment.units);
        }
        if self.resource_ids.iter().any(|id| id == resource_id) {
            Some(1.0)
        } else {
            None
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }

    /// Task span in whole days, rounded up and never below one.
    pub fn duration_days(&self) -> i64 {
        span_days(self.start_date, self.end_date)
    }
}

/// Whole-day span between two instants, rounded up and clamped to >= 1.
pub(crate) fn span_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return 1;
    }
    let days = (seconds as f64 / 86_400.0).ceil() as i64;
    days.max(1)
}

/// Partial field set for the store's `update_task` primitive. `None` fields
/// keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessors: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_assignments: Option<Vec<ResourceAssignment>>,
}

impl TaskUpdate {
    /// An update that only moves the start date, the shape produced by a
    /// drag of the task bar's left edge.
    pub fn move_to(start_date: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(start_date),
            ..Self::default()
        }
    }

    /// An update carrying both ends of the interval, the shape produced by
    /// dragging a whole task bar.
    pub fn reschedule(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_predecessors(mut self, predecessors: Vec<i32>) -> Self {
        self.predecessors = Some(predecessors);
        self
    }
}
