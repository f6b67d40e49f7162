use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calculations::dependency::{ConflictKind, DependencyConflict, detect_conflict_for_move};
use crate::store::{ProjectStore, StoreResult};
use crate::task::TaskUpdate;

/// User-acknowledged unresolved conflicts for one project session.
///
/// Keyed by `(predecessor_id, successor_id)`; created with the controller
/// and dropped with it, so entries cannot leak across projects. Entries die
/// with their link: [`AcknowledgementStore::remove`] on an explicit unlink,
/// [`AcknowledgementStore::retain_valid_for_successor`] when a successor's
/// predecessor list changes shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcknowledgementStore {
    entries: HashSet<(i32, i32)>,
}

impl AcknowledgementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pair; re-adding is a no-op.
    pub fn acknowledge(&mut self, predecessor_id: i32, successor_id: i32) {
        self.entries.insert((predecessor_id, successor_id));
    }

    pub fn is_acknowledged(&self, predecessor_id: i32, successor_id: i32) -> bool {
        self.entries.contains(&(predecessor_id, successor_id))
    }

    pub fn remove(&mut self, predecessor_id: i32, successor_id: i32) -> bool {
        self.entries.remove(&(predecessor_id, successor_id))
    }

    /// Drops entries for `successor_id` whose predecessor no longer appears
    /// in `predecessors`.
    pub fn retain_valid_for_successor(&mut self, successor_id: i32, predecessors: &[i32]) {
        self.entries
            .retain(|(pred, succ)| *succ != successor_id || predecessors.contains(pred));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Remedies offered while a dependency-conflict dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictChoice {
    Cancel,
    AdjustDates,
    RemoveLink,
    ConfirmWithoutFix,
}

/// Payload of the open dependency-conflict dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingConflict {
    pub task_id: i32,
    pub updates: TaskUpdate,
    pub predecessor_id: i32,
    pub conflict: DependencyConflict,
}

/// Payload of the secondary keep-unresolved confirmation dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingConfirmation {
    pub task_id: i32,
    pub updates: TaskUpdate,
    pub predecessor_id: i32,
    pub kind: ConflictKind,
}

#[derive(Debug, Clone, PartialEq)]
enum PendingState {
    Idle,
    DependencyConflict(PendingConflict),
    ConfirmWithoutFix(PendingConfirmation),
}

/// Gatekeeper for task updates that might violate a finish-to-start link.
///
/// Wraps the store's `update_task` primitive: clean updates pass straight
/// through, conflicting moves park behind a dialog until the user picks a
/// remedy. At most one conflict is pending at a time; while one is open
/// every further update is refused so the dialog always describes the
/// latest blocked edit.
pub struct ConflictController<S: ProjectStore> {
    store: S,
    acknowledgements: AcknowledgementStore,
    pending: PendingState,
}

impl<S: ProjectStore> ConflictController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            acknowledgements: AcknowledgementStore::new(),
            pending: PendingState::Idle,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn acknowledgements(&self) -> &AcknowledgementStore {
        &self.acknowledgements
    }

    pub fn pending_conflict(&self) -> Option<&PendingConflict> {
        match &self.pending {
            PendingState::DependencyConflict(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        match &self.pending {
            PendingState::ConfirmWithoutFix(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        !matches!(self.pending, PendingState::Idle)
    }

    /// Applies `update` unless it moves the task into conflict with a
    /// predecessor. `Ok(false)` means the update was parked behind a dialog
    /// (or refused while one is already open) instead of applied. That is a
    /// normal outcome the caller must check, never an error.
    pub fn update_task(&mut self, task_id: i32, update: TaskUpdate) -> StoreResult<bool> {
        if self.has_pending() {
            return Ok(false);
        }

        let proposed_start = match update.start_date {
            Some(start) => start,
            None => {
                self.store.update_task(task_id, update)?;
                return Ok(true);
            }
        };

        let tasks = self.store.tasks();
        match detect_conflict_for_move(&tasks, task_id, proposed_start) {
            None => {
                let applied = self.store.update_task(task_id, update)?;
                // Acknowledgements must not outlive their link; re-check
                // against the predecessor list that actually got stored.
                self.acknowledgements
                    .retain_valid_for_successor(applied.id, &applied.predecessors);
                Ok(true)
            }
            Some(found) => {
                if self
                    .acknowledgements
                    .is_acknowledged(found.predecessor_id, task_id)
                {
                    self.store.update_task(task_id, update)?;
                    return Ok(true);
                }
                self.pending = PendingState::DependencyConflict(PendingConflict {
                    task_id,
                    updates: update,
                    predecessor_id: found.predecessor_id,
                    conflict: found.conflict,
                });
                Ok(false)
            }
        }
    }

    /// Resolves the open dependency-conflict dialog. A no-op when none is
    /// open; dismissing the dialog by clicking outside it maps to `Cancel`.
    pub fn resolve(&mut self, choice: ConflictChoice) -> StoreResult<()> {
        let pending = match &self.pending {
            PendingState::DependencyConflict(pending) => pending.clone(),
            _ => return Ok(()),
        };

        match choice {
            ConflictChoice::Cancel => {
                self.revert_to_stored(pending.task_id)?;
                self.pending = PendingState::Idle;
            }
            ConflictChoice::AdjustDates => {
                self.apply_adjusted_dates(&pending)?;
                self.pending = PendingState::Idle;
            }
            ConflictChoice::RemoveLink => {
                self.remove_link_and_apply(&pending)?;
                self.pending = PendingState::Idle;
            }
            ConflictChoice::ConfirmWithoutFix => {
                self.pending = PendingState::ConfirmWithoutFix(PendingConfirmation {
                    task_id: pending.task_id,
                    updates: pending.updates,
                    predecessor_id: pending.predecessor_id,
                    kind: pending.conflict.kind,
                });
            }
        }
        Ok(())
    }

    /// Closes the secondary confirmation dialog. Accepting records the
    /// acknowledgement and applies the parked update; declining discards it
    /// without touching the task.
    pub fn confirm_unresolved(&mut self, accept: bool) -> StoreResult<()> {
        let pending = match &self.pending {
            PendingState::ConfirmWithoutFix(pending) => pending.clone(),
            _ => return Ok(()),
        };
        self.pending = PendingState::Idle;
        if accept {
            self.acknowledgements
                .acknowledge(pending.predecessor_id, pending.task_id);
            self.store.update_task(pending.task_id, pending.updates)?;
        }
        Ok(())
    }

    /// Removes a finish-to-start link outside of any dialog flow. Removing
    /// an id that is not linked leaves the predecessor list untouched but
    /// still clears a stale acknowledgement for the pair.
    pub fn remove_link(&mut self, task_id: i32, predecessor_id: i32) -> StoreResult<()> {
        if let Some(task) = self.store.find_task(task_id) {
            let mut predecessors = task.predecessors;
            predecessors.retain(|id| *id != predecessor_id);
            let update = TaskUpdate {
                predecessors: Some(predecessors),
                ..TaskUpdate::default()
            };
            self.store.update_task(task_id, update)?;
        }
        self.acknowledgements.remove(predecessor_id, task_id);
        Ok(())
    }

    /// Pushes the store's current dates and progress back through the update
    /// primitive so any presentation copy re-reads clean values.
    fn revert_to_stored(&mut self, task_id: i32) -> StoreResult<()> {
        if let Some(stored) = self.store.find_task(task_id) {
            let revert = TaskUpdate {
                start_date: Some(stored.start_date),
                end_date: Some(stored.end_date),
                progress: Some(stored.progress),
                ..TaskUpdate::default()
            };
            self.store.update_task(task_id, revert)?;
        }
        Ok(())
    }

    fn apply_adjusted_dates(&mut self, pending: &PendingConflict) -> StoreResult<()> {
        let stored = self.store.find_task(pending.task_id);
        let start = pending
            .updates
            .start_date
            .or(stored.as_ref().map(|task| task.start_date));
        let end = pending
            .updates
            .end_date
            .or(stored.as_ref().map(|task| task.end_date));
        let mut duration = match (start, end) {
            (Some(start), Some(end)) => end - start,
            _ => Duration::zero(),
        };
        if duration < Duration::days(1) {
            duration = Duration::days(1);
        }

        let new_start = pending.conflict.min_start_date;
        let mut update = pending.updates.clone();
        update.start_date = Some(new_start);
        update.end_date = Some(new_start + duration);
        self.store.update_task(pending.task_id, update)?;
        Ok(())
    }

    fn remove_link_and_apply(&mut self, pending: &PendingConflict) -> StoreResult<()> {
        let mut predecessors = match self.store.find_task(pending.task_id) {
            Some(task) => task.predecessors,
            None => Vec::new(),
        };
        predecessors.retain(|id| *id != pending.predecessor_id);

        let mut update = pending.updates.clone();
        update.predecessors = Some(predecessors);
        self.store.update_task(pending.task_id, update)?;
        self.acknowledgements
            .remove(pending.predecessor_id, pending.task_id);
        Ok(())
    }
}
