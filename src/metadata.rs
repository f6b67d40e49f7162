use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive project data owned by the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub project_description: String,
    pub project_start_date: NaiveDate,
    pub project_end_date: NaiveDate,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: String::new(),
            project_start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            project_end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        }
    }
}
