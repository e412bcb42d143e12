//! Long-lived reducer container for one uploader instance.
//!
//! [`UploaderController`] owns the reactive state, the host callbacks, and every timer the
//! uploader starts. Views read [`UploaderController::state`] and send intents through
//! [`UploaderController::dispatch`]; effects are drained in emission order right after each
//! reduction.
#![allow(clippy::clone_on_copy)]

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use leptos::*;
use platform_host::{Clock, FilePayload, PreviewGenerator, PreviewFuture};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::UploaderConfig,
    effect_executor,
    model::{LocalFileId, RemoteFile, RemoteFileId, UploaderState},
    progress::random_increment,
    reducer::{reduce_uploader, UploaderAction},
    scheduler::{IntervalScheduler, TaskHandle},
};

/// Host notification hooks. Every hook is optional.
pub struct UploaderCallbacks<F: 'static> {
    /// Receives the validated local payloads after every local pool change.
    pub on_files_change: Option<Callback<Vec<F>>>,
    /// Receives the uploaded payloads once per finished batch.
    pub on_upload_complete: Option<Callback<Vec<F>>>,
    /// Receives rejection and capacity messages.
    pub on_error: Option<Callback<String>>,
    /// Receives each remote file the user removes, before its grace window starts.
    pub on_existing_file_remove: Option<Callback<RemoteFile>>,
}

impl<F: 'static> Default for UploaderCallbacks<F> {
    fn default() -> Self {
        Self {
            on_files_change: None,
            on_upload_complete: None,
            on_error: None,
            on_existing_file_remove: None,
        }
    }
}

impl<F: 'static> Clone for UploaderCallbacks<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for UploaderCallbacks<F> {}

/// Injected timer, clock, and preview services.
pub struct UploaderServices<F> {
    pub scheduler: Rc<dyn IntervalScheduler>,
    pub clock: Rc<dyn Clock>,
    pub preview: Rc<dyn PreviewGenerator<F>>,
    rng: RefCell<StdRng>,
}

impl<F> UploaderServices<F> {
    /// Bundles services with an entropy-seeded increment generator.
    pub fn new(
        scheduler: Rc<dyn IntervalScheduler>,
        clock: Rc<dyn Clock>,
        preview: Rc<dyn PreviewGenerator<F>>,
    ) -> Self {
        Self {
            scheduler,
            clock,
            preview,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Makes simulated progress reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    pub(crate) fn next_increment(&self) -> u8 {
        random_increment(&mut *self.rng.borrow_mut())
    }

    /// Short random prefix that keeps local ids distinct across instances on one page.
    pub(crate) fn id_salt(&self) -> String {
        let mut rng = self.rng.borrow_mut();
        let salt: String = (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect();
        salt
    }

    pub(crate) fn generate_preview(&self, file: &F) -> PreviewFuture {
        self.preview.generate_preview(file)
    }
}

/// Handle to one uploader's state and services. Cheap to copy into closures.
pub struct UploaderController<F: 'static> {
    /// Reactive uploader state.
    pub state: RwSignal<UploaderState<F>>,
    /// Clock reading refreshed on every removal and sweep, used for countdowns.
    pub now_ms: RwSignal<u64>,
    /// Most recent rejection or capacity message, shown inline under the dropzone.
    pub last_error: RwSignal<Option<String>>,
    pub(crate) callbacks: UploaderCallbacks<F>,
    pub(crate) services: StoredValue<UploaderServices<F>>,
    pub(crate) progress_tasks: StoredValue<HashMap<LocalFileId, TaskHandle>>,
    pub(crate) sweep_task: StoredValue<Option<TaskHandle>>,
}

impl<F: 'static> Clone for UploaderController<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for UploaderController<F> {}

impl<F: FilePayload> UploaderController<F> {
    /// Creates the reactive container in the current reactive owner.
    pub fn new(
        initial: UploaderState<F>,
        callbacks: UploaderCallbacks<F>,
        services: UploaderServices<F>,
    ) -> Self {
        let now_ms = services.clock.now_ms();
        let initial = initial.with_id_salt(services.id_salt());
        Self {
            state: create_rw_signal(initial),
            now_ms: create_rw_signal(now_ms),
            last_error: create_rw_signal(None),
            callbacks,
            services: store_value(services),
            progress_tasks: store_value(HashMap::new()),
            sweep_task: store_value(None),
        }
    }

    /// Reduces `action` and runs the resulting effects. Actions arriving after disposal are
    /// dropped.
    pub fn dispatch(&self, action: UploaderAction<F>) {
        let Some(mut next) = self.state.try_get_untracked() else {
            return;
        };
        let previous = next.clone();

        match reduce_uploader(&mut next, action) {
            Ok(effects) => {
                if next != previous {
                    self.state.set(next);
                }
                effect_executor::run_effects(*self, effects);
            }
            Err(err) => {
                logging::warn!("uploader rejected selection: {err}");
                self.report_error(err.to_string());
            }
        }
    }

    pub fn add_files(&self, files: Vec<F>) {
        if !files.is_empty() {
            self.last_error.set(None);
        }
        self.dispatch(UploaderAction::AddFiles(files));
    }

    pub fn remove_local(&self, id: LocalFileId) {
        self.dispatch(UploaderAction::RemoveLocal { id });
    }

    pub fn clear(&self) {
        self.last_error.set(None);
        self.dispatch(UploaderAction::Clear);
    }

    pub fn start_upload(&self) {
        self.dispatch(UploaderAction::StartUpload);
    }

    /// Stages a remote file for deletion, stamped with the service clock.
    pub fn request_removal(&self, id: RemoteFileId) {
        let now_ms = self.refresh_now();
        self.dispatch(UploaderAction::RequestRemoval { id, now_ms });
    }

    pub fn undo_removal(&self, id: RemoteFileId) {
        self.dispatch(UploaderAction::UndoRemoval { id });
    }

    pub fn confirm_removal(&self, id: RemoteFileId) {
        self.dispatch(UploaderAction::ConfirmRemoval { id });
    }

    pub fn sync_remote(&self, files: Vec<RemoteFile>) {
        self.dispatch(UploaderAction::SyncRemote(files));
    }

    pub fn set_config(&self, config: UploaderConfig) {
        self.dispatch(UploaderAction::SetConfig(config));
    }

    /// Cancels every running interval. Called when the owning view unmounts.
    pub fn dispose(&self) {
        self.progress_tasks.try_update_value(HashMap::clear);
        self.sweep_task.try_update_value(|task| *task = None);
    }

    pub(crate) fn report_error(&self, message: String) {
        if self.last_error.try_set(Some(message.clone())).is_some() {
            // Disposed.
            return;
        }
        if let Some(on_error) = self.callbacks.on_error {
            on_error.call(message);
        }
    }

    pub(crate) fn refresh_now(&self) -> u64 {
        let now_ms = self
            .services
            .try_with_value(|services| services.clock.now_ms())
            .unwrap_or_else(|| self.now_ms.get_untracked());
        self.now_ms.try_set(now_ms);
        now_ms
    }
}
