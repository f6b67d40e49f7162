use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A raw working-hour range for one day, bounds as real hours 0-24.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourRange {
    pub from: f64,
    pub to: f64,
}

impl HourRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    fn is_usable(&self) -> bool {
        self.from.is_finite() && self.to.is_finite() && self.from >= 0.0 && self.to > self.from
    }
}

/// Canonical working hours for one day, `HH:mm` formatted, with an optional
/// lunch-style break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<String>,
}

impl Default for DaySchedule {
    /// The fallback working window used when no usable ranges exist.
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            break_start: None,
            break_end: None,
        }
    }
}

/// Formats a real-valued hour as `HH:mm`, rounding the fraction to minutes.
pub fn format_hour(hour: f64) -> String {
    let mut hours = hour.trunc() as u32;
    let mut minutes = ((hour - hour.trunc()) * 60.0).round() as u32;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }
    format!("{hours:02}:{minutes:02}")
}

/// Merges an unordered list of raw hour ranges into one canonical day
/// schedule.
///
/// Ranges with a non-positive extent or a negative start are discarded; when
/// nothing survives the default 09:00-18:00 window is returned. Survivors
/// are sorted by start; the first adjacent gap becomes the break and later
/// gaps are dropped, which is lossy for day schedules with three or more
/// segments.
pub fn merge_hour_ranges(ranges: &[HourRange]) -> DaySchedule {
    let mut usable: Vec<HourRange> = ranges
        .iter()
        .copied()
        .filter(HourRange::is_usable)
        .collect();
    if usable.is_empty() {
        return DaySchedule::default();
    }
    usable.sort_by(|a, b| a.from.partial_cmp(&b.from).unwrap_or(std::cmp::Ordering::Equal));

    let mut schedule = DaySchedule {
        start: format_hour(usable[0].from),
        end: format_hour(usable[usable.len() - 1].to),
        break_start: None,
        break_end: None,
    };
    for pair in usable.windows(2) {
        let gap = pair[1].from - pair[0].to;
        if gap > 0.0 {
            schedule.break_start = Some(format_hour(pair[0].to));
            schedule.break_end = Some(format_hour(pair[1].from));
            break;
        }
    }
    schedule
}

/// Working-time calendar for a project or an individual resource.
///
/// Weekday availability is stored as the non-working complement; holidays
/// block otherwise-working dates. Raw hour ranges are merged into the
/// canonical [`DaySchedule`] when the calendar is built and the result is
/// immutable for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    pub id: String,
    pub name: String,
    non_working_days: HashSet<Weekday>,
    holidays: HashSet<NaiveDate>,
    day_hours: DaySchedule,
    pub hours_per_day: f64,
    pub working_days_per_week: u8,
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Standard Mon-Fri calendar with the default working window.
    pub fn standard(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
            holidays: HashSet::new(),
            day_hours: DaySchedule::default(),
            hours_per_day: 8.0,
            working_days_per_week: 5,
        }
    }

    /// Replaces the working window with the merge of `ranges`.
    pub fn with_hour_ranges(mut self, ranges: &[HourRange]) -> Self {
        self.day_hours = merge_hour_ranges(ranges);
        self
    }

    pub fn day_hours(&self) -> &DaySchedule {
        &self.day_hours
    }

    /// Set custom working days (e.g., Mon-Sat for 6-day weeks).
    pub fn set_working_days(&mut self, days: Vec<Weekday>) {
        self.non_working_days.clear();
        for day in Self::ALL_WEEKDAYS {
            if !days.contains(&day) {
                self.non_working_days.insert(day);
            }
        }
        self.working_days_per_week = (7 - self.non_working_days.len()) as u8;
    }

    /// Add a single holiday.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once.
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Whether work can be scheduled on `date`.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// Non-working dates inside `[start, end]`, in order.
    pub fn non_working_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if !self.is_working_day(current) {
                days.push(current);
            }
            current = current + Duration::days(1);
        }
        days
    }
}
