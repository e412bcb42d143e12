//! Grace-window handling for remote file removals.
//!
//! A removed remote file leaves the active pool immediately but stays restorable until its
//! window elapses or the user confirms. Confirmed ids are kept so the host form can delete them.

use crate::model::{PendingRemoval, RemoteFile, RemoteFileId, UploaderState};

use super::UploaderEffect;

pub(super) fn request_removal<F>(
    state: &mut UploaderState<F>,
    id: RemoteFileId,
    now_ms: u64,
    effects: &mut Vec<UploaderEffect>,
) {
    let Some(index) = state.remote.iter().position(|file| file.id == id) else {
        return;
    };
    let file = state.remote.remove(index);
    effects.push(UploaderEffect::ExistingFileRemoved(file.clone()));
    state.pending_removals.push(PendingRemoval {
        file,
        removed_at_ms: now_ms,
    });
    if !state.sweep_active {
        state.sweep_active = true;
        effects.push(UploaderEffect::StartRemovalSweep);
    }
}

pub(super) fn undo_removal<F>(
    state: &mut UploaderState<F>,
    id: RemoteFileId,
    effects: &mut Vec<UploaderEffect>,
) {
    let Some(index) = state
        .pending_removals
        .iter()
        .position(|entry| entry.file.id == id)
    else {
        return;
    };
    let restored = state.pending_removals.remove(index).file;
    let at = restore_position(state, id);
    state.remote.insert(at, restored);
    stop_sweep_if_idle(state, effects);
}

pub(super) fn confirm_removal<F>(
    state: &mut UploaderState<F>,
    id: RemoteFileId,
    effects: &mut Vec<UploaderEffect>,
) {
    state.pending_removals.retain(|entry| entry.file.id != id);
    state.remote.retain(|file| file.id != id);
    mark_confirmed(state, id);
    stop_sweep_if_idle(state, effects);
}

/// The sweep interval could not be created. Clearing the flag lets the next removal retry.
pub(super) fn sweep_unavailable<F>(state: &mut UploaderState<F>) {
    state.sweep_active = false;
}

pub(super) fn sweep_removals<F>(
    state: &mut UploaderState<F>,
    now_ms: u64,
    effects: &mut Vec<UploaderEffect>,
) {
    let (expired, still_pending): (Vec<_>, Vec<_>) = state
        .pending_removals
        .drain(..)
        .partition(|entry| entry.remaining_ms(now_ms) <= 0);
    state.pending_removals = still_pending;
    for entry in expired {
        mark_confirmed(state, entry.file.id);
    }
    stop_sweep_if_idle(state, effects);
}

/// Adopts a new host list. Ids already removed in this session stay removed, pending entries the
/// host no longer lists are dropped, and the active pool is only replaced when its id sequence
/// actually differs.
pub(super) fn sync_remote<F>(
    state: &mut UploaderState<F>,
    files: Vec<RemoteFile>,
    effects: &mut Vec<UploaderEffect>,
) {
    state.host_order = files.iter().map(|file| file.id).collect();
    let host_order = &state.host_order;
    state
        .pending_removals
        .retain(|entry| host_order.contains(&entry.file.id));
    stop_sweep_if_idle(state, effects);
    let active: Vec<RemoteFile> = files
        .into_iter()
        .filter(|file| {
            !state.is_pending_removal(file.id) && !state.is_confirmed_removal(file.id)
        })
        .collect();
    let unchanged = active.len() == state.remote.len()
        && active
            .iter()
            .zip(&state.remote)
            .all(|(next, current)| next.id == current.id);
    if !unchanged {
        state.remote = active;
    }
}

fn mark_confirmed<F>(state: &mut UploaderState<F>, id: RemoteFileId) {
    if !state.confirmed_removals.contains(&id) {
        state.confirmed_removals.push(id);
    }
}

fn stop_sweep_if_idle<F>(state: &mut UploaderState<F>, effects: &mut Vec<UploaderEffect>) {
    if state.sweep_active && state.pending_removals.is_empty() {
        state.sweep_active = false;
        effects.push(UploaderEffect::StopRemovalSweep);
    }
}

/// Index in the active pool that keeps `id` in host order relative to its neighbours.
fn restore_position<F>(state: &UploaderState<F>, id: RemoteFileId) -> usize {
    let Some(rank) = state.host_order.iter().position(|candidate| *candidate == id) else {
        return state.remote.len();
    };
    state
        .remote
        .iter()
        .position(|file| {
            state
                .host_order
                .iter()
                .position(|candidate| *candidate == file.id)
                .map_or(true, |other| other > rank)
        })
        .unwrap_or(state.remote.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::UploaderConfig;
    use crate::model::{RemoteFileId, UploaderState, REMOVAL_GRACE_MS};
    use crate::reducer::{reduce_uploader, UploaderAction, UploaderEffect};
    use crate::test_support::{remote, TestFile};

    fn state_with_remote(ids: &[u64]) -> UploaderState<TestFile> {
        UploaderState::new(
            UploaderConfig::default(),
            ids.iter().map(|id| remote(*id, &format!("{id}.jpg"))).collect(),
        )
    }

    fn run(
        state: &mut UploaderState<TestFile>,
        action: UploaderAction<TestFile>,
    ) -> Vec<UploaderEffect> {
        reduce_uploader(state, action).expect("removal actions never fail")
    }

    fn remote_ids(state: &UploaderState<TestFile>) -> Vec<u64> {
        state.remote.iter().map(|file| file.id.0).collect()
    }

    #[test]
    fn request_moves_file_to_pending_and_starts_sweep_once() {
        let mut state = state_with_remote(&[1, 2, 3]);

        let effects = run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(2),
                now_ms: 1_000,
            },
        );
        assert_eq!(remote_ids(&state), vec![1, 3]);
        assert_eq!(state.pending_removals.len(), 1);
        assert_eq!(state.pending_removals[0].removed_at_ms, 1_000);
        assert_eq!(
            effects,
            vec![
                UploaderEffect::ExistingFileRemoved(remote(2, "2.jpg")),
                UploaderEffect::StartRemovalSweep,
            ]
        );

        let effects = run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(3),
                now_ms: 2_000,
            },
        );
        assert_eq!(
            effects,
            vec![UploaderEffect::ExistingFileRemoved(remote(3, "3.jpg"))]
        );
        assert_eq!(state.available_slots(), 9);
    }

    #[test]
    fn undo_inside_window_restores_host_position() {
        let mut state = state_with_remote(&[1, 2, 3]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(2),
                now_ms: 0,
            },
        );
        run(&mut state, UploaderAction::SweepRemovals { now_ms: 5_000 });
        assert_eq!(state.pending_removals.len(), 1);

        let effects = run(&mut state, UploaderAction::UndoRemoval { id: RemoteFileId(2) });
        assert_eq!(remote_ids(&state), vec![1, 2, 3]);
        assert!(state.pending_removals.is_empty());
        assert!(state.confirmed_removals.is_empty());
        assert_eq!(effects, vec![UploaderEffect::StopRemovalSweep]);
    }

    #[test]
    fn undo_restores_order_when_neighbours_are_also_removed() {
        let mut state = state_with_remote(&[1, 2, 3, 4]);
        for id in [1, 3, 2] {
            run(
                &mut state,
                UploaderAction::RequestRemoval {
                    id: RemoteFileId(id),
                    now_ms: 0,
                },
            );
        }
        run(&mut state, UploaderAction::UndoRemoval { id: RemoteFileId(3) });
        run(&mut state, UploaderAction::UndoRemoval { id: RemoteFileId(1) });
        assert_eq!(remote_ids(&state), vec![1, 3, 4]);
    }

    #[test]
    fn sweep_promotes_exactly_at_window_boundary() {
        let mut state = state_with_remote(&[7]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(7),
                now_ms: 500,
            },
        );

        run(
            &mut state,
            UploaderAction::SweepRemovals {
                now_ms: 500 + REMOVAL_GRACE_MS - 1,
            },
        );
        assert_eq!(state.pending_removals.len(), 1);
        assert!(state.confirmed_removals.is_empty());

        let effects = run(
            &mut state,
            UploaderAction::SweepRemovals {
                now_ms: 500 + REMOVAL_GRACE_MS,
            },
        );
        assert!(state.pending_removals.is_empty());
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(7)]);
        assert_eq!(effects, vec![UploaderEffect::StopRemovalSweep]);
    }

    #[test]
    fn undo_after_expiry_is_noop() {
        let mut state = state_with_remote(&[7]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(7),
                now_ms: 0,
            },
        );
        run(&mut state, UploaderAction::SweepRemovals { now_ms: 11_000 });
        let before = state.clone();

        let effects = run(&mut state, UploaderAction::UndoRemoval { id: RemoteFileId(7) });
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn confirm_is_immediate_and_idempotent() {
        let mut state = state_with_remote(&[1, 2]);
        for id in [1, 2] {
            run(
                &mut state,
                UploaderAction::RequestRemoval {
                    id: RemoteFileId(id),
                    now_ms: 0,
                },
            );
        }

        let effects = run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(1) });
        assert!(effects.is_empty());
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(1)]);
        assert_eq!(state.pending_removals.len(), 1);

        let again = run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(1) });
        assert!(again.is_empty());
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(1)]);

        let effects = run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(2) });
        assert_eq!(effects, vec![UploaderEffect::StopRemovalSweep]);
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(1), RemoteFileId(2)]);
    }

    #[test]
    fn confirm_records_id_that_was_never_pending() {
        let mut state = state_with_remote(&[7, 8]);

        let effects = run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(7) });
        assert!(effects.is_empty());
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(7)]);
        assert_eq!(remote_ids(&state), vec![8]);

        run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(7) });
        assert_eq!(state.confirmed_removals, vec![RemoteFileId(7)]);
    }

    #[test]
    fn sync_drops_pending_entries_the_host_no_longer_lists() {
        let mut state = state_with_remote(&[1, 2]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(1),
                now_ms: 0,
            },
        );

        let effects = run(&mut state, UploaderAction::SyncRemote(vec![remote(2, "2.jpg")]));
        assert!(state.pending_removals.is_empty());
        assert!(!state.sweep_active);
        assert_eq!(effects, vec![UploaderEffect::StopRemovalSweep]);

        run(&mut state, UploaderAction::UndoRemoval { id: RemoteFileId(1) });
        assert_eq!(remote_ids(&state), vec![2]);
        assert!(state.confirmed_removals.is_empty());
    }

    #[test]
    fn unavailable_sweep_is_requested_again_on_next_removal() {
        let mut state = state_with_remote(&[1, 2]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(1),
                now_ms: 0,
            },
        );
        assert!(state.sweep_active);

        let effects = run(&mut state, UploaderAction::SweepUnavailable);
        assert!(effects.is_empty());
        assert!(!state.sweep_active);
        assert_eq!(state.pending_removals.len(), 1);

        let effects = run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(2),
                now_ms: 1_000,
            },
        );
        assert_eq!(
            effects,
            vec![
                UploaderEffect::ExistingFileRemoved(remote(2, "2.jpg")),
                UploaderEffect::StartRemovalSweep,
            ]
        );
        assert!(state.sweep_active);
    }

    #[test]
    fn sync_with_identical_ids_keeps_existing_pool() {
        let mut state = state_with_remote(&[1, 2]);
        let before = state.remote.as_ptr();

        run(
            &mut state,
            UploaderAction::SyncRemote(vec![remote(1, "1.jpg"), remote(2, "2.jpg")]),
        );
        assert_eq!(state.remote.as_ptr(), before);
        assert_eq!(remote_ids(&state), vec![1, 2]);
    }

    #[test]
    fn sync_excludes_pending_and_confirmed_ids() {
        let mut state = state_with_remote(&[1, 2, 3]);
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(1),
                now_ms: 0,
            },
        );
        run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(2),
                now_ms: 0,
            },
        );
        run(&mut state, UploaderAction::ConfirmRemoval { id: RemoteFileId(2) });

        run(
            &mut state,
            UploaderAction::SyncRemote(vec![
                remote(1, "1.jpg"),
                remote(2, "2.jpg"),
                remote(3, "3.jpg"),
                remote(4, "4.jpg"),
            ]),
        );
        assert_eq!(remote_ids(&state), vec![3, 4]);
        assert_eq!(state.pending_removals.len(), 1);
    }

    #[test]
    fn request_for_unknown_remote_id_is_noop() {
        let mut state = state_with_remote(&[1]);
        let effects = run(
            &mut state,
            UploaderAction::RequestRemoval {
                id: RemoteFileId(99),
                now_ms: 0,
            },
        );
        assert!(effects.is_empty());
        assert!(!state.sweep_active);
    }
}
