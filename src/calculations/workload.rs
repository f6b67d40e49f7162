use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::task::Task;

/// Workload of one resource on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayWorkload {
    pub date: NaiveDate,
    /// Summed assignment units of every task active on this day.
    pub workload: f64,
    pub max_capacity: f64,
    pub is_overloaded: bool,
}

/// Per-day workload histogram for a resource across a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceHistogram {
    pub resource_id: String,
    pub resource_name: String,
    pub days: Vec<DayWorkload>,
    pub total_workload: f64,
    pub average_workload: f64,
}

/// Inclusive instant bounds of a calendar day.
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let day_start = date.and_hms_milli_opt(0, 0, 0, 0).unwrap().and_utc();
    let day_end = date.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc();
    (day_start, day_end)
}

/// Builds the per-day workload histogram for `resource` over
/// `[start_date, end_date]` inclusive.
///
/// A task loads a day when its interval touches any part of it. Units come
/// from the canonical assignment accessor, so legacy-format projects count
/// each assignment as full-time. Capacity comes pre-tagged from ingestion;
/// an inverted range yields an empty histogram with a zero average.
pub fn calculate_histogram(
    resource: &Resource,
    tasks: &[Task],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ResourceHistogram {
    let max_capacity = resource.capacity.as_fraction();
    let mut days = Vec::new();
    let mut total_workload = 0.0;

    let mut current = start_date;
    while current <= end_date {
        let (day_start, day_end) = day_bounds(current);
        let mut workload = 0.0;
        for task in tasks {
            if task.start_date > day_end || task.end_date < day_start {
                continue;
            }
            if let Some(units) = task.assignment_units(&resource.id) {
                workload += units;
            }
        }
        total_workload += workload;
        days.push(DayWorkload {
            date: current,
            workload,
            max_capacity,
            is_overloaded: workload > max_capacity,
        });
        current = current + Duration::days(1);
    }

    let average_workload = if days.is_empty() {
        0.0
    } else {
        total_workload / days.len() as f64
    };

    ResourceHistogram {
        resource_id: resource.id.clone(),
        resource_name: resource.name.clone(),
        days,
        total_workload,
        average_workload,
    }
}
