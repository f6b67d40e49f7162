pub mod calculations;
pub mod calendar;
pub mod graph;
pub mod metadata;
pub mod resolution;
pub mod resource;
pub mod store;
pub mod task;
pub(crate) mod task_validation;

pub use calculations::calendar_conflict::{CalendarConflict, check_task_conflict};
pub use calculations::cost::{
    CostBreakdown, CostDiagnostics, CostIssue, CostIssueKind, calculate_project_cost,
    diagnose_project_cost,
};
pub use calculations::dependency::{
    ConflictKind, DependencyConflict, MoveConflict, detect_conflict_for_move,
};
pub use calculations::workload::{DayWorkload, ResourceHistogram, calculate_histogram};
pub use calendar::{DaySchedule, HourRange, WorkCalendar, merge_hour_ranges};
pub use metadata::ProjectMetadata;
pub use resolution::{
    AcknowledgementStore, ConflictChoice, ConflictController, PendingConfirmation, PendingConflict,
};
pub use resource::{Resource, ResourceAssignment, ResourceCapacity, ResourceType};
pub use store::{InMemoryProject, ProjectStore, StoreError, StoreResult, validate_tasks};
pub use task::{ConstraintType, Task, TaskUpdate};
