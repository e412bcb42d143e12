//! Executes reducer-emitted uploader effects against host callbacks and timers.

use std::rc::Rc;

use leptos::*;
use platform_host::FilePayload;

use crate::{
    model::LocalFileId,
    progress::PROGRESS_TICK,
    reducer::{UploaderAction, UploaderEffect},
    scheduler::REMOVAL_SWEEP_TICK,
    uploader_runtime::UploaderController,
    view::{uploaded_payloads, validated_payloads},
};

/// Runs `effects` in emission order.
pub(crate) fn run_effects<F: FilePayload>(
    controller: UploaderController<F>,
    effects: Vec<UploaderEffect>,
) {
    for effect in effects {
        run_effect(controller, effect);
    }
}

fn run_effect<F: FilePayload>(controller: UploaderController<F>, effect: UploaderEffect) {
    let callbacks = controller.callbacks;
    match effect {
        UploaderEffect::FilesChanged => {
            if let Some(on_files_change) = callbacks.on_files_change {
                on_files_change.call(controller.state.with_untracked(validated_payloads));
            }
        }
        UploaderEffect::UploadComplete(ids) => {
            let Some(on_upload_complete) = callbacks.on_upload_complete else {
                return;
            };
            let files = controller
                .state
                .with_untracked(|state| uploaded_payloads(state, &ids));
            if !files.is_empty() {
                on_upload_complete.call(files);
            }
        }
        UploaderEffect::ReportError(message) => controller.report_error(message),
        UploaderEffect::ExistingFileRemoved(file) => {
            if let Some(on_existing_file_remove) = callbacks.on_existing_file_remove {
                on_existing_file_remove.call(file);
            }
        }
        UploaderEffect::StartProgress(id) => start_progress(controller, id),
        UploaderEffect::CancelProgress(id) => {
            controller.progress_tasks.try_update_value(|tasks| {
                tasks.remove(&id);
            });
        }
        UploaderEffect::GeneratePreview(id) => generate_preview(controller, id),
        UploaderEffect::StartRemovalSweep => start_removal_sweep(controller),
        UploaderEffect::StopRemovalSweep => {
            controller.sweep_task.try_update_value(|task| *task = None);
        }
    }
}

fn start_progress<F: FilePayload>(controller: UploaderController<F>, id: LocalFileId) {
    let Some(scheduler) = controller
        .services
        .try_with_value(|services| services.scheduler.clone())
    else {
        return;
    };

    let tick_id = id.clone();
    let tick: Rc<dyn Fn()> = Rc::new(move || {
        let Some(increment) = controller
            .services
            .try_with_value(|services| services.next_increment())
        else {
            return;
        };
        controller.dispatch(UploaderAction::ProgressTick {
            id: tick_id.clone(),
            increment,
        });
    });

    match scheduler.every(PROGRESS_TICK, tick) {
        // Replacing an existing handle drops it, which stops the older interval.
        Ok(handle) => {
            controller.progress_tasks.try_update_value(|tasks| {
                tasks.insert(id, handle);
            });
        }
        Err(err) => logging::warn!("progress interval for {id} not started: {err}"),
    }
}

fn generate_preview<F: FilePayload>(controller: UploaderController<F>, id: LocalFileId) {
    let payload = controller
        .state
        .with_untracked(|state| state.find_local(&id).map(|file| file.payload.clone()));
    let Some(payload) = payload else {
        return;
    };
    let Some(pending) = controller
        .services
        .try_with_value(|services| services.generate_preview(&payload))
    else {
        return;
    };

    spawn_local(async move {
        match pending.await {
            Some(preview) => controller.dispatch(UploaderAction::PreviewReady {
                id,
                preview: Some(preview),
            }),
            None => logging::debug_warn!("no preview produced for {id}"),
        }
    });
}

fn start_removal_sweep<F: FilePayload>(controller: UploaderController<F>) {
    let Some(scheduler) = controller
        .services
        .try_with_value(|services| services.scheduler.clone())
    else {
        return;
    };

    let tick: Rc<dyn Fn()> = Rc::new(move || {
        let now_ms = controller.refresh_now();
        controller.dispatch(UploaderAction::SweepRemovals { now_ms });
    });

    match scheduler.every(REMOVAL_SWEEP_TICK, tick) {
        Ok(handle) => {
            controller.sweep_task.try_update_value(|task| *task = Some(handle));
        }
        Err(err) => {
            logging::warn!("removal sweep not started: {err}");
            controller.dispatch(UploaderAction::SweepUnavailable);
        }
    }
}
