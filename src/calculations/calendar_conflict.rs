use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::WorkCalendar;
use crate::resource::Resource;
use crate::task::Task;

/// A task scheduled across days its assigned resource does not work.
///
/// Rendered as a visual warning by the presentation layer; the schedule edit
/// itself stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConflict {
    pub task_id: i32,
    pub resource_id: String,
    pub calendar_id: String,
    /// Days inside the task's span the calendar marks non-working.
    pub non_working_days: Vec<NaiveDate>,
}

/// Cross-checks a task's scheduled days against the calendars of its
/// assigned resources.
///
/// A missing resource, a resource without a calendar, or an unknown calendar
/// id all mean "no conflict"; the checker never fails. Summary rows are
/// containers, not work, and are skipped. Assignments are walked in order
/// and the first one with offending days wins.
pub fn check_task_conflict(
    task: &Task,
    resources: &[Resource],
    calendars: &[WorkCalendar],
) -> Option<CalendarConflict> {
    if task.is_summary {
        return None;
    }
    let span_start = task.start_date.date_naive();
    let span_end = task.end_date.date_naive();
    if span_end < span_start {
        return None;
    }

    for assignment in task.effective_assignments() {
        let resource = match resources
            .iter()
            .find(|resource| resource.id == assignment.resource_id)
        {
            Some(resource) => resource,
            None => continue,
        };
        let calendar_id = match &resource.calendar_id {
            Some(calendar_id) => calendar_id,
            None => continue,
        };
        let calendar = match calendars.iter().find(|calendar| &calendar.id == calendar_id) {
            Some(calendar) => calendar,
            None => continue,
        };

        let non_working_days = calendar.non_working_days_in_range(span_start, span_end);
        if !non_working_days.is_empty() {
            return Some(CalendarConflict {
                task_id: task.id,
                resource_id: resource.id.clone(),
                calendar_id: calendar.id.clone(),
                non_working_days,
            });
        }
    }

    None
}
