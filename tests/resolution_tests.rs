use chrono::{DateTime, TimeZone, Utc};
use schedule_consistency::{
    ConflictChoice, ConflictController, ConflictKind, InMemoryProject, ProjectStore, Task,
    TaskUpdate,
};

fn instant(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, d, hour, 0, 0).unwrap()
}

/// Predecessor 1 runs 2026-02-10 .. 2026-02-15; successor 2 follows it.
fn controller() -> ConflictController<InMemoryProject> {
    let predecessor = Task::new(1, "Excavation", instant(10, 8), instant(15, 8));
    let mut successor = Task::new(2, "Foundation", instant(16, 8), instant(20, 8));
    successor.predecessors = vec![1];
    let project = InMemoryProject::default()
        .with_tasks(vec![predecessor, successor])
        .unwrap();
    ConflictController::new(project)
}

#[test]
fn update_without_start_change_applies_immediately() {
    let mut controller = controller();
    let update = TaskUpdate {
        name: Some("Foundation pour".to_string()),
        ..TaskUpdate::default()
    };

    assert!(controller.update_task(2, update).unwrap());
    assert!(!controller.has_pending());
    assert_eq!(
        controller.store().find_task(2).unwrap().name,
        "Foundation pour"
    );
}

#[test]
fn clean_move_applies_and_stays_idle() {
    let mut controller = controller();
    assert!(controller
        .update_task(2, TaskUpdate::move_to(instant(17, 8)))
        .unwrap());
    assert!(!controller.has_pending());
    assert_eq!(
        controller.store().find_task(2).unwrap().start_date,
        instant(17, 8)
    );
}

#[test]
fn conflicting_move_blocks_and_parks_the_update() {
    let mut controller = controller();
    let blocked = controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap();
    assert!(!blocked);

    let pending = controller.pending_conflict().unwrap();
    assert_eq!(pending.task_id, 2);
    assert_eq!(pending.predecessor_id, 1);
    assert_eq!(pending.conflict.kind, ConflictKind::BeforePredecessor);
    assert_eq!(pending.conflict.min_start_date, instant(15, 8));

    // The store never saw the blocked update.
    assert_eq!(
        controller.store().find_task(2).unwrap().start_date,
        instant(16, 8)
    );
}

#[test]
fn updates_are_refused_while_a_dialog_is_open() {
    let mut controller = controller();
    assert!(!controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap());

    // Even an unrelated rename is refused until the dialog closes.
    let refused = controller
        .update_task(
            1,
            TaskUpdate {
                name: Some("Digging".to_string()),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
    assert!(!refused);
    assert_eq!(controller.store().find_task(1).unwrap().name, "Excavation");
}

#[test]
fn cancel_clears_pending_and_keeps_stored_dates() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap();

    controller.resolve(ConflictChoice::Cancel).unwrap();

    assert!(!controller.has_pending());
    let task = controller.store().find_task(2).unwrap();
    assert_eq!(task.start_date, instant(16, 8));
    assert_eq!(task.end_date, instant(20, 8));
}

#[test]
fn resolve_when_idle_is_a_no_op() {
    let mut controller = controller();
    controller.resolve(ConflictChoice::Cancel).unwrap();
    assert!(!controller.has_pending());
}

#[test]
fn adjust_dates_moves_to_min_start_and_keeps_duration() {
    let mut controller = controller();
    // A 4-day drag to Feb 12-16, blocked by the predecessor ending Feb 15.
    controller
        .update_task(2, TaskUpdate::reschedule(instant(12, 8), instant(16, 8)))
        .unwrap();

    controller.resolve(ConflictChoice::AdjustDates).unwrap();

    assert!(!controller.has_pending());
    let task = controller.store().find_task(2).unwrap();
    assert_eq!(task.start_date, instant(15, 8));
    assert_eq!(task.end_date, instant(19, 8));
}

#[test]
fn adjust_dates_clamps_duration_to_one_day() {
    let mut controller = controller();
    // Inverted pending interval collapses to the one-day minimum.
    controller
        .update_task(2, TaskUpdate::reschedule(instant(12, 8), instant(11, 8)))
        .unwrap();

    controller.resolve(ConflictChoice::AdjustDates).unwrap();

    let task = controller.store().find_task(2).unwrap();
    assert_eq!(task.start_date, instant(15, 8));
    assert_eq!(task.end_date, instant(16, 8));
}

#[test]
fn remove_link_choice_unlinks_and_applies_the_move() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap();

    controller.resolve(ConflictChoice::RemoveLink).unwrap();

    assert!(!controller.has_pending());
    let task = controller.store().find_task(2).unwrap();
    assert!(task.predecessors.is_empty());
    assert_eq!(task.start_date, instant(12, 8));
}

#[test]
fn confirm_without_fix_opens_the_second_dialog_without_mutating() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap();

    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();

    let confirmation = controller.pending_confirmation().unwrap();
    assert_eq!(confirmation.task_id, 2);
    assert_eq!(confirmation.predecessor_id, 1);
    assert_eq!(confirmation.kind, ConflictKind::BeforePredecessor);
    assert_eq!(
        controller.store().find_task(2).unwrap().start_date,
        instant(16, 8)
    );
}

#[test]
fn accepting_the_confirmation_applies_and_acknowledges() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();

    controller.confirm_unresolved(true).unwrap();

    assert!(!controller.has_pending());
    assert_eq!(
        controller.store().find_task(2).unwrap().start_date,
        instant(13, 8)
    );
    assert!(controller.acknowledgements().is_acknowledged(1, 2));

    // The same pair no longer prompts: a further conflicting move applies
    // silently, keeping the stored end date.
    assert!(controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap());
    let task = controller.store().find_task(2).unwrap();
    assert_eq!(task.start_date, instant(12, 8));
    assert_eq!(task.end_date, instant(20, 8));
}

#[test]
fn declining_the_confirmation_discards_the_update() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();

    controller.confirm_unresolved(false).unwrap();

    assert!(!controller.has_pending());
    assert_eq!(
        controller.store().find_task(2).unwrap().start_date,
        instant(16, 8)
    );
    assert!(!controller.acknowledgements().is_acknowledged(1, 2));

    // Not acknowledged, so the next conflicting move prompts again.
    assert!(!controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap());
}

#[test]
fn remove_link_clears_the_acknowledgement_and_reprompts() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();
    controller.confirm_unresolved(true).unwrap();
    assert!(controller.acknowledgements().is_acknowledged(1, 2));

    controller.remove_link(2, 1).unwrap();
    assert!(!controller.acknowledgements().is_acknowledged(1, 2));
    assert!(controller.store().find_task(2).unwrap().predecessors.is_empty());

    // Relink and move into conflict again: the prompt is back.
    assert!(controller
        .update_task(2, TaskUpdate::default().with_predecessors(vec![1]))
        .unwrap());
    assert!(!controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap());
    assert!(controller.pending_conflict().is_some());
}

#[test]
fn remove_link_on_an_absent_pair_still_clears_stale_acknowledgements() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();
    controller.confirm_unresolved(true).unwrap();

    // Drop the link through a plain update first; the acknowledgement for
    // the now-dead pair would otherwise linger.
    controller
        .update_task(2, TaskUpdate::default().with_predecessors(vec![]))
        .unwrap();
    let before = controller.store().find_task(2).unwrap().predecessors.clone();

    controller.remove_link(2, 1).unwrap();

    assert_eq!(
        controller.store().find_task(2).unwrap().predecessors,
        before
    );
    assert!(!controller.acknowledgements().is_acknowledged(1, 2));
}

#[test]
fn non_conflicting_move_prunes_acknowledgements_for_dead_links() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();
    controller.confirm_unresolved(true).unwrap();
    assert!(controller.acknowledgements().is_acknowledged(1, 2));

    // A clean move that also rewrites the predecessor list to drop link 1.
    let update = TaskUpdate::move_to(instant(17, 8)).with_predecessors(vec![]);
    assert!(controller.update_task(2, update).unwrap());

    assert!(!controller.acknowledgements().is_acknowledged(1, 2));
}

#[test]
fn acknowledgement_survives_clean_moves_while_the_link_stands() {
    let mut controller = controller();
    controller
        .update_task(2, TaskUpdate::move_to(instant(13, 8)))
        .unwrap();
    controller.resolve(ConflictChoice::ConfirmWithoutFix).unwrap();
    controller.confirm_unresolved(true).unwrap();

    // Clean move with the link intact: the acknowledgement stays put.
    assert!(controller
        .update_task(2, TaskUpdate::move_to(instant(18, 8)))
        .unwrap());
    assert!(controller.acknowledgements().is_acknowledged(1, 2));

    // So a later conflicting move still applies without a prompt.
    assert!(controller
        .update_task(2, TaskUpdate::move_to(instant(12, 8)))
        .unwrap());
}
