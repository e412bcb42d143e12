//! Reducer actions, side-effect intents, and transition logic for one uploader instance.
//!
//! [`reduce_uploader`] is the only place uploader pools change. It never touches timers, the DOM,
//! or host callbacks; those are requested through [`UploaderEffect`] and carried out by the
//! effect executor.

mod removal;

use platform_host::FilePayload;
use thiserror::Error;

use crate::config::UploaderConfig;
use crate::model::{LocalFile, LocalFileId, RemoteFile, RemoteFileId, UploaderState};
use crate::progress::{advance, ProgressStep, PROGRESS_COMPLETE};
use crate::validation::validate_payload;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_uploader`].
pub enum UploaderAction<F> {
    /// Add a batch of user-selected files (browse or drop).
    AddFiles(Vec<F>),
    /// Remove one local file.
    RemoveLocal {
        /// File to remove.
        id: LocalFileId,
    },
    /// Empty the local and active remote pools.
    Clear,
    /// Start simulated uploads for every valid, not-yet-uploaded local file.
    StartUpload,
    /// Advance one file's simulated progress.
    ProgressTick {
        /// File whose interval fired.
        id: LocalFileId,
        /// Percentage points to add.
        increment: u8,
    },
    /// Attach a generated preview.
    PreviewReady {
        /// File the preview was generated for.
        id: LocalFileId,
        /// `data:` URL, or `None` when generation failed.
        preview: Option<String>,
    },
    /// Stage a remote file for deletion.
    RequestRemoval {
        /// Remote file to remove.
        id: RemoteFileId,
        /// Removal timestamp.
        now_ms: u64,
    },
    /// Restore a staged remote file.
    UndoRemoval {
        /// Remote file to restore.
        id: RemoteFileId,
    },
    /// Make a removal permanent without waiting for the grace window.
    ConfirmRemoval {
        /// Remote file to confirm.
        id: RemoteFileId,
    },
    /// Promote every staged removal whose grace window has elapsed.
    SweepRemovals {
        /// Sweep timestamp.
        now_ms: u64,
    },
    /// The host refused to start the sweep interval.
    SweepUnavailable,
    /// Re-synchronize with the host's current remote file list.
    SyncRemote(Vec<RemoteFile>),
    /// Replace the configuration.
    SetConfig(UploaderConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_uploader`] for the controller to execute.
pub enum UploaderEffect {
    /// Send the validated local payloads to `on_files_change`.
    FilesChanged,
    /// Send these uploaded files to `on_upload_complete`.
    UploadComplete(Vec<LocalFileId>),
    /// Send a message to `on_error`.
    ReportError(String),
    /// Tell the host a remote file was (optimistically) removed.
    ExistingFileRemoved(RemoteFile),
    /// Start the progress interval for a file.
    StartProgress(LocalFileId),
    /// Stop the progress interval for a file, if any.
    CancelProgress(LocalFileId),
    /// Read an image payload into a preview.
    GeneratePreview(LocalFileId),
    /// Start the shared grace-window sweep interval.
    StartRemovalSweep,
    /// Tear down the sweep interval.
    StopRemovalSweep,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Batch rejections. The reducer returns these before mutating anything.
pub enum UploaderError {
    /// Single-file mode already holds a file.
    #[error("Only one file allowed")]
    SingleFileOnly,
    /// Every slot is taken.
    #[error("Maximum {max_files} files allowed")]
    CapacityReached {
        /// Effective file cap.
        max_files: usize,
    },
}

/// Applies an [`UploaderAction`] to `state` and collects the resulting side effects.
///
/// Timer-driven actions re-check that their target still exists, so a late tick for a removed
/// file is ignored instead of resurrecting it.
///
/// # Errors
///
/// Returns [`UploaderError`] when an `AddFiles` batch cannot be accepted at all. The state is left
/// untouched in that case.
pub fn reduce_uploader<F: FilePayload>(
    state: &mut UploaderState<F>,
    action: UploaderAction<F>,
) -> Result<Vec<UploaderEffect>, UploaderError> {
    let mut effects = Vec::new();
    match action {
        UploaderAction::AddFiles(files) => add_files(state, files, &mut effects)?,
        UploaderAction::RemoveLocal { id } => {
            let Some(index) = state.local.iter().position(|file| file.id == id) else {
                return Ok(effects);
            };
            state.local.remove(index);
            effects.push(UploaderEffect::CancelProgress(id));
            effects.push(UploaderEffect::FilesChanged);
            // Dropping the last in-flight file can finish the batch.
            if let Some(uploaded) = take_batch_completion(state) {
                effects.push(UploaderEffect::UploadComplete(uploaded));
            }
        }
        UploaderAction::Clear => {
            effects.extend(
                state
                    .local
                    .drain(..)
                    .map(|file| UploaderEffect::CancelProgress(file.id)),
            );
            state.remote.clear();
            effects.push(UploaderEffect::FilesChanged);
        }
        UploaderAction::StartUpload => {
            let waiting: Vec<LocalFileId> = state
                .local
                .iter()
                .filter(|file| file.awaits_upload())
                .map(|file| file.id.clone())
                .collect();
            if !waiting.is_empty() {
                state.completion_reported = false;
            }
            effects.extend(waiting.into_iter().map(UploaderEffect::StartProgress));
        }
        UploaderAction::ProgressTick { id, increment } => {
            let Some(file) = state.local.iter_mut().find(|file| file.id == id) else {
                effects.push(UploaderEffect::CancelProgress(id));
                return Ok(effects);
            };
            if file.is_resolved() {
                effects.push(UploaderEffect::CancelProgress(id));
                return Ok(effects);
            }
            match advance(file.progress, increment) {
                ProgressStep::Advanced(progress) => file.progress = progress,
                ProgressStep::Completed => {
                    file.progress = PROGRESS_COMPLETE;
                    file.uploaded = true;
                    effects.push(UploaderEffect::CancelProgress(id));
                    if let Some(uploaded) = take_batch_completion(state) {
                        effects.push(UploaderEffect::UploadComplete(uploaded));
                    }
                }
            }
        }
        UploaderAction::PreviewReady { id, preview } => {
            if let Some(file) = state.local.iter_mut().find(|file| file.id == id) {
                file.preview = preview;
            }
        }
        UploaderAction::RequestRemoval { id, now_ms } => {
            removal::request_removal(state, id, now_ms, &mut effects);
        }
        UploaderAction::UndoRemoval { id } => removal::undo_removal(state, id, &mut effects),
        UploaderAction::ConfirmRemoval { id } => {
            removal::confirm_removal(state, id, &mut effects);
        }
        UploaderAction::SweepRemovals { now_ms } => {
            removal::sweep_removals(state, now_ms, &mut effects);
        }
        UploaderAction::SweepUnavailable => removal::sweep_unavailable(state),
        UploaderAction::SyncRemote(files) => removal::sync_remote(state, files, &mut effects),
        UploaderAction::SetConfig(config) => state.config = config,
    }
    Ok(effects)
}

fn add_files<F: FilePayload>(
    state: &mut UploaderState<F>,
    files: Vec<F>,
    effects: &mut Vec<UploaderEffect>,
) -> Result<(), UploaderError> {
    if files.is_empty() {
        return Ok(());
    }
    if state.config.single_file && state.occupied_slots() > 0 {
        return Err(UploaderError::SingleFileOnly);
    }
    let max_files = state.config.effective_max_files();
    let available = state.available_slots();
    if available == 0 {
        return Err(UploaderError::CapacityReached { max_files });
    }
    if files.len() > available {
        // The tail is dropped; the batch gets one message, not one per file.
        effects.push(UploaderEffect::ReportError(
            UploaderError::CapacityReached { max_files }.to_string(),
        ));
    }

    let mut added = Vec::with_capacity(available.min(files.len()));
    for payload in files.into_iter().take(available) {
        let error = validate_payload(&payload, &state.config).err();
        added.push(LocalFile {
            id: state.next_local_id(),
            name: payload.file_name(),
            preview: None,
            progress: 0,
            uploaded: false,
            error,
            payload,
        });
    }

    if state.config.single_file {
        effects.extend(
            state
                .local
                .drain(..)
                .map(|file| UploaderEffect::CancelProgress(file.id)),
        );
        state.remote.clear();
    }

    for file in &added {
        if state.config.show_preview && file.payload.is_image() {
            effects.push(UploaderEffect::GeneratePreview(file.id.clone()));
        }
        if state.config.auto_upload && file.is_valid() {
            effects.push(UploaderEffect::StartProgress(file.id.clone()));
        }
    }
    state.local.extend(added);
    state.completion_reported = false;
    effects.push(UploaderEffect::FilesChanged);
    Ok(())
}

/// Returns the uploaded ids when the current batch just finished, at most once per batch.
fn take_batch_completion<F>(state: &mut UploaderState<F>) -> Option<Vec<LocalFileId>> {
    if state.completion_reported || !state.local.iter().all(LocalFile::is_resolved) {
        return None;
    }
    let uploaded: Vec<LocalFileId> = state
        .local
        .iter()
        .filter(|file| file.uploaded)
        .map(|file| file.id.clone())
        .collect();
    if uploaded.is_empty() {
        return None;
    }
    state.completion_reported = true;
    Some(uploaded)
}
