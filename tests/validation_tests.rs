use chrono::{DateTime, TimeZone, Utc};
use schedule_consistency::{
    ConstraintType, InMemoryProject, ProjectStore, ResourceAssignment, StoreError, Task,
    TaskUpdate, validate_tasks,
};

fn instant(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, d, hour, 0, 0).unwrap()
}

fn task(id: i32, predecessors: Vec<i32>) -> Task {
    let mut task = Task::new(id, format!("T{id}"), instant(4, 8), instant(8, 17));
    task.predecessors = predecessors;
    task
}

#[test]
fn duplicate_task_ids_are_rejected() {
    let err = validate_tasks(&[task(1, vec![]), task(1, vec![])]).unwrap_err();
    assert!(err.to_string().contains("duplicate task id 1"));
}

#[test]
fn dependency_cycles_are_rejected() {
    let tasks = vec![task(1, vec![3]), task(2, vec![1]), task(3, vec![2])];
    let err = validate_tasks(&tasks).unwrap_err();
    assert!(err.to_string().contains("dependency cycle"));

    let seeded = InMemoryProject::default().with_tasks(tasks);
    assert!(matches!(seeded, Err(StoreError::InvalidData(_))));
}

#[test]
fn self_predecessor_is_rejected() {
    let err = validate_tasks(&[task(1, vec![1])]).unwrap_err();
    assert!(err.to_string().contains("lists itself"));
}

#[test]
fn inverted_interval_is_rejected_on_insert() {
    let backwards = Task::new(1, "Backwards", instant(8, 17), instant(4, 8));
    let mut project = InMemoryProject::default();
    let err = project.add_task(backwards).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn out_of_range_progress_is_rejected_on_insert() {
    let mut bad = task(1, vec![]);
    bad.progress = 1.5;
    let mut project = InMemoryProject::default();
    assert!(project.add_task(bad).is_err());
}

#[test]
fn negative_assignment_units_are_rejected() {
    let mut bad = task(1, vec![]);
    bad.resource_assignments = vec![ResourceAssignment::new("dev-1", -0.5)];
    let err = validate_tasks(&[bad]).unwrap_err();
    assert!(err.to_string().contains("invalid units"));
}

#[test]
fn constraint_kind_requires_a_date() {
    let mut bad = task(1, vec![]);
    bad.constraint = Some(ConstraintType::MustStartOn);
    let err = validate_tasks(&[bad]).unwrap_err();
    assert!(err.to_string().contains("no constraint date"));
}

#[test]
fn update_clamps_progress_instead_of_failing() {
    let mut project = InMemoryProject::default().with_tasks(vec![task(1, vec![])]).unwrap();
    let updated = project
        .update_task(
            1,
            TaskUpdate {
                progress: Some(1.5),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.progress, 1.0);

    let updated = project
        .update_task(
            1,
            TaskUpdate {
                progress: Some(-0.25),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.progress, 0.0);
}

#[test]
fn update_snaps_an_inverted_interval_to_the_start() {
    let mut project = InMemoryProject::default().with_tasks(vec![task(1, vec![])]).unwrap();
    // Moving the start past the stored end must not leave end < start.
    let updated = project
        .update_task(1, TaskUpdate::move_to(instant(12, 8)))
        .unwrap();
    assert_eq!(updated.start_date, instant(12, 8));
    assert_eq!(updated.end_date, instant(12, 8));
}
