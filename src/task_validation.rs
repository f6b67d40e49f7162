use crate::graph::DependencyDag;
use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.end_date < task.start_date {
        return Err(TaskValidationError::new(format!(
            "task {} ends {} before it starts {}",
            task.id, task.end_date, task.start_date
        )));
    }

    if !task.progress.is_finite() || task.progress < -EPSILON || task.progress > 1.0 + EPSILON {
        return Err(TaskValidationError::new(format!(
            "task {} has invalid progress {} (must be between 0 and 1)",
            task.id, task.progress
        )));
    }

    if task.constraint.is_some() && task.constraint_date.is_none() {
        return Err(TaskValidationError::new(format!(
            "task {} carries a constraint kind but no constraint date",
            task.id
        )));
    }

    if task.predecessors.iter().any(|pred| *pred == task.id) {
        return Err(TaskValidationError::new(format!(
            "task {} lists itself as a predecessor",
            task.id
        )));
    }

    for (idx, assignment) in task.resource_assignments.iter().enumerate() {
        if assignment.resource_id.trim().is_empty() {
            return Err(TaskValidationError::new(format!(
                "task {} assignment #{} requires a non-empty resource_id",
                task.id, idx
            )));
        }
        if !assignment.units.is_finite() || assignment.units < -EPSILON {
            return Err(TaskValidationError::new(format!(
                "task {} assignment for '{}' has invalid units {}",
                task.id, assignment.resource_id, assignment.units
            )));
        }
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }

    let dag = DependencyDag::build(tasks);
    if let Some(cycle) = dag.cycle_ids() {
        let chain = cycle
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("->");
        return Err(TaskValidationError::new(format!(
            "dependency cycle through tasks {chain}"
        )));
    }

    Ok(())
}
