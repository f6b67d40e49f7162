use std::fmt;

use crate::calendar::WorkCalendar;
use crate::metadata::ProjectMetadata;
use crate::resource::Resource;
use crate::task::{Task, TaskUpdate};
use crate::task_validation;

#[derive(Debug)]
pub enum StoreError {
    TaskNotFound(i32),
    DuplicateTask(i32),
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::TaskNotFound(id) => write!(f, "task {id} not found"),
            StoreError::DuplicateTask(id) => write!(f, "task {id} already exists"),
            StoreError::InvalidData(message) => write!(f, "invalid data: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

pub fn validate_tasks(tasks: &[Task]) -> StoreResult<()> {
    task_validation::validate_task_collection(tasks)
        .map_err(|err| StoreError::InvalidData(err.to_string()))
}

/// Read/write contract the engine consumes. Implemented by the reference
/// in-memory project below and by whatever persistence-backed store embeds
/// the engine.
pub trait ProjectStore {
    fn metadata(&self) -> &ProjectMetadata;

    /// Cloned snapshot of every task. Calculations read from the snapshot,
    /// so callers cannot mutate the list mid-pass.
    fn tasks(&self) -> Vec<Task>;

    fn find_task(&self, task_id: i32) -> Option<Task>;

    fn resources(&self) -> Vec<Resource>;

    fn find_resource(&self, resource_id: &str) -> Option<Resource>;

    fn calendars(&self) -> Vec<WorkCalendar>;

    fn find_calendar(&self, calendar_id: &str) -> Option<WorkCalendar>;

    fn add_task(&mut self, task: Task) -> StoreResult<()>;

    /// Merges the supplied fields into the stored task and returns the
    /// updated record.
    fn update_task(&mut self, task_id: i32, update: TaskUpdate) -> StoreResult<Task>;

    /// Returns whether a task was actually removed.
    fn delete_task(&mut self, task_id: i32) -> StoreResult<bool>;
}

/// Reference store holding the project in plain vectors.
#[derive(Debug, Default)]
pub struct InMemoryProject {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    calendars: Vec<WorkCalendar>,
}

impl InMemoryProject {
    pub fn new(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            tasks: Vec::new(),
            resources: Vec::new(),
            calendars: Vec::new(),
        }
    }

    /// Seeds the task list, validating structure (duplicate ids, inverted
    /// intervals, dependency cycles) before accepting it.
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> StoreResult<Self> {
        validate_tasks(&tasks)?;
        self.tasks = tasks;
        Ok(self)
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn add_calendar(&mut self, calendar: WorkCalendar) {
        self.calendars.push(calendar);
    }

    fn task_index(&self, task_id: i32) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    /// Merges a partial update into a stored task with the engine's silent
    /// normalizations: progress is clamped to [0, 1] and an inverted
    /// interval snaps the end to the start.
    fn merge_update(task: &mut Task, update: TaskUpdate) {
        if let Some(name) = update.name {
            task.name = name;
        }
        if let Some(start_date) = update.start_date {
            task.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            task.end_date = end_date;
        }
        if let Some(progress) = update.progress {
            task.progress = progress.clamp(0.0, 1.0);
        }
        if let Some(predecessors) = update.predecessors {
            task.predecessors = predecessors;
        }
        if let Some(assignments) = update.resource_assignments {
            task.resource_assignments = assignments;
        }
        if task.end_date < task.start_date {
            task.end_date = task.start_date;
        }
    }
}

impl ProjectStore for InMemoryProject {
    fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    fn tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn find_task(&self, task_id: i32) -> Option<Task> {
        self.tasks.iter().find(|task| task.id == task_id).cloned()
    }

    fn resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    fn find_resource(&self, resource_id: &str) -> Option<Resource> {
        self.resources
            .iter()
            .find(|resource| resource.id == resource_id)
            .cloned()
    }

    fn calendars(&self) -> Vec<WorkCalendar> {
        self.calendars.clone()
    }

    fn find_calendar(&self, calendar_id: &str) -> Option<WorkCalendar> {
        self.calendars
            .iter()
            .find(|calendar| calendar.id == calendar_id)
            .cloned()
    }

    fn add_task(&mut self, task: Task) -> StoreResult<()> {
        if self.task_index(task.id).is_some() {
            return Err(StoreError::DuplicateTask(task.id));
        }
        task_validation::validate_task(&task)
            .map_err(|err| StoreError::InvalidData(err.to_string()))?;
        self.tasks.push(task);
        Ok(())
    }

    fn update_task(&mut self, task_id: i32, update: TaskUpdate) -> StoreResult<Task> {
        let idx = self
            .task_index(task_id)
            .ok_or(StoreError::TaskNotFound(task_id))?;
        Self::merge_update(&mut self.tasks[idx], update);
        Ok(self.tasks[idx].clone())
    }

    fn delete_task(&mut self, task_id: i32) -> StoreResult<bool> {
        match self.task_index(task_id) {
            Some(idx) => {
                self.tasks.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
