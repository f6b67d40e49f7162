pub mod calendar_conflict;
pub mod cost;
pub mod dependency;
pub mod workload;
