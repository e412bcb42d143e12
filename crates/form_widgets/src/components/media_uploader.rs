use std::rc::Rc;

use leptos::ev::{DragEvent, Event};
use leptos::*;
use platform_host::{FilePayload, SystemClock};
use platform_host_web::{
    browser_files_from_list, browser_files_from_transfer, BrowserFile, FileReaderPreviewGenerator,
};
use system_ui::prelude::*;

use crate::{
    config::UploaderConfig,
    model::{RemoteFile, UploaderState},
    scheduler::BrowserScheduler,
    uploader_runtime::{UploaderCallbacks, UploaderController, UploaderServices},
    view::{
        all_uploaded, can_add_more, confirmed_field_values, display_entries, entry_by_key,
        format_file_size, has_in_flight, recently_removed, selected_count, DisplayEntry,
        EntryStatus, RecentlyRemoved,
    },
};

fn status_label(status: &EntryStatus) -> String {
    match status {
        EntryStatus::Stored => "Saved".to_string(),
        EntryStatus::Queued => "Ready".to_string(),
        EntryStatus::Uploading(progress) => format!("{progress}%"),
        EntryStatus::Uploaded => "Uploaded".to_string(),
        EntryStatus::Invalid(message) => message.clone(),
    }
}

fn status_tone(status: &EntryStatus) -> TextTone {
    match status {
        EntryStatus::Stored | EntryStatus::Queued => TextTone::Secondary,
        EntryStatus::Uploading(_) => TextTone::Primary,
        EntryStatus::Uploaded => TextTone::Success,
        EntryStatus::Invalid(_) => TextTone::Danger,
    }
}

fn status_token(status: &EntryStatus) -> &'static str {
    match status {
        EntryStatus::Stored => "stored",
        EntryStatus::Queued => "queued",
        EntryStatus::Uploading(_) => "uploading",
        EntryStatus::Uploaded => "uploaded",
        EntryStatus::Invalid(_) => "invalid",
    }
}

#[component]
/// File and media uploader with simulated progress and undoable removal of stored files.
///
/// Confirmed removals are rendered as hidden inputs named `config.removed_field_name` so the
/// surrounding form can delete them on submit.
pub fn MediaUploader(
    #[prop(optional)] config: UploaderConfig,
    /// Files the host already stores. Re-read whenever the signal changes.
    #[prop(optional, into)]
    existing_files: MaybeSignal<Vec<RemoteFile>>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] on_files_change: Option<Callback<Vec<BrowserFile>>>,
    #[prop(optional)] on_upload_complete: Option<Callback<Vec<BrowserFile>>>,
    #[prop(optional)] on_error: Option<Callback<String>>,
    #[prop(optional)] on_existing_file_remove: Option<Callback<RemoteFile>>,
) -> impl IntoView {
    let accept = config.accept.as_attribute();
    let single_file = config.single_file;
    let max_files = config.effective_max_files();
    let auto_upload = config.auto_upload;
    let field_name = config.removed_field_name.clone();

    let controller = UploaderController::new(
        UploaderState::new(config, existing_files.get_untracked()),
        UploaderCallbacks {
            on_files_change,
            on_upload_complete,
            on_error,
            on_existing_file_remove,
        },
        UploaderServices::new(
            Rc::new(BrowserScheduler),
            Rc::new(SystemClock),
            Rc::new(FileReaderPreviewGenerator),
        ),
    );
    on_cleanup(move || controller.dispose());

    create_effect(move |_| {
        let files = existing_files.get();
        controller.sync_remote(files);
    });

    let state = controller.state;
    let can_add = Signal::derive(move || state.with(can_add_more));
    let entry_keys = Signal::derive(move || {
        state.with(|state| {
            display_entries(state)
                .iter()
                .map(DisplayEntry::key)
                .collect::<Vec<_>>()
        })
    });
    let removed = Signal::derive(move || {
        let now_ms = controller.now_ms.get();
        state.with(|state| recently_removed(state, now_ms))
    });
    let confirmed = Signal::derive(move || state.with(confirmed_field_values));
    let input_ref = create_node_ref::<html::Input>();

    view! {
        <FieldGroup
            layout_class="media-uploader"
            title=label.unwrap_or_default()
            description=description.unwrap_or_default()
            error=Signal::derive(move || controller.last_error.get())
        >
            <Stack gap=LayoutGap::Md>
                <DropZone
                    accepting=can_add
                    aria_label="File drop area"
                    on_drop=Callback::new(move |ev: DragEvent| {
                        controller.add_files(browser_files_from_transfer(ev.data_transfer()));
                    })
                >
                    <Stack gap=LayoutGap::Sm align=LayoutAlign::Center>
                        <Icon icon=IconName::Upload size=IconSize::Lg />
                        <Text>
                            {if single_file { "Drop a file here" } else { "Drop files here" }}
                        </Text>
                        <Button
                            leading_icon=IconName::Add
                            disabled=Signal::derive(move || !can_add.get())
                            on_click=Callback::new(move |_| {
                                if let Some(input) = input_ref.get_untracked() {
                                    input.click();
                                }
                            })
                        >
                            "Browse files"
                        </Button>
                        <Text role=TextRole::Caption tone=TextTone::Secondary live=true>
                            {move || {
                                format!("{} of {max_files} selected", state.with(selected_count))
                            }}
                        </Text>
                    </Stack>
                    <input
                        type="file"
                        node_ref=input_ref
                        hidden=true
                        multiple=!single_file
                        accept=accept
                        data-ui-slot="file-input"
                        on:change=move |ev: Event| {
                            let input = event_target::<web_sys::HtmlInputElement>(&ev);
                            controller.add_files(browser_files_from_list(input.files()));
                            input.set_value("");
                        }
                    />
                </DropZone>

                <ListSurface role="list" aria_label="Selected files">
                    <For
                        each=move || entry_keys.get()
                        key=|key| key.clone()
                        children=move |key| view! { <UploaderEntry controller entry_key=key /> }
                    />
                </ListSurface>

                <Cluster justify=LayoutJustify::Between>
                    <Show when=move || state.with(all_uploaded) fallback=|| ()>
                        <Badge tone=TextTone::Success>"All files uploaded"</Badge>
                    </Show>
                    <Cluster gap=LayoutGap::Sm justify=LayoutJustify::End>
                        <Show
                            when=move || !auto_upload && state.with(has_in_flight)
                            fallback=|| ()
                        >
                            <Button
                                variant=ButtonVariant::Primary
                                leading_icon=IconName::Upload
                                on_click=Callback::new(move |_| controller.start_upload())
                            >
                                "Upload files"
                            </Button>
                        </Show>
                        <Show when=move || { state.with(selected_count) > 0 } fallback=|| ()>
                            <Button
                                variant=ButtonVariant::Quiet
                                leading_icon=IconName::Delete
                                on_click=Callback::new(move |_| controller.clear())
                            >
                                "Clear all"
                            </Button>
                        </Show>
                    </Cluster>
                </Cluster>

                <Show when=move || !removed.with(Vec::is_empty) fallback=|| ()>
                    <Stack gap=LayoutGap::Sm ui_slot="recently-removed">
                        <Text role=TextRole::Label>"Recently removed"</Text>
                        <ListSurface aria_label="Recently removed files">
                            <For
                                each=move || removed.get()
                                key=|item| (item.file.id, item.remaining_secs)
                                children=move |item| view! { <RemovedEntry controller item /> }
                            />
                        </ListSurface>
                    </Stack>
                </Show>

                <For
                    each=move || confirmed.get()
                    key=|value| value.clone()
                    children=move |value| view! { <HiddenField name=field_name.clone() value /> }
                />
            </Stack>
        </FieldGroup>
    }
}

#[component]
fn UploaderEntry(controller: UploaderController<BrowserFile>, entry_key: String) -> impl IntoView {
    let state = controller.state;
    let Some(initial) = state.with_untracked(|state| entry_by_key(state, &entry_key)) else {
        return ().into_view();
    };
    let (show_preview, show_progress, allow_remove) = state.with_untracked(|state| {
        (
            state.config.show_preview,
            state.config.show_progress,
            state.config.allow_remove,
        )
    });

    let fallback = initial.clone();
    let current = Signal::derive(move || {
        state
            .with(|state| entry_by_key(state, &entry_key))
            .unwrap_or_else(|| fallback.clone())
    });
    let status = Signal::derive(move || current.with(DisplayEntry::status));
    let name = initial.name().to_string();
    let size = format_file_size(initial.size_bytes());
    let fallback_icon = match &initial {
        DisplayEntry::Remote(file) if file.is_image() => IconName::Image,
        DisplayEntry::Local(file) if file.payload.is_image() => IconName::Image,
        _ => IconName::Document,
    };
    let remove = match &initial {
        DisplayEntry::Remote(file) => {
            let id = file.id;
            Callback::new(move |_| controller.request_removal(id))
        }
        DisplayEntry::Local(file) => {
            let id = file.id.clone();
            Callback::new(move |_| controller.remove_local(id.clone()))
        }
    };
    let progress_label = format!("Upload progress for {name}");
    let remove_label = format!("Remove {name}");
    let preview_alt = name.clone();

    view! {
        <ListItem
            ui_slot="file-entry"
            state=Signal::derive(move || status.with(status_token).to_string())
        >
            <Cluster gap=LayoutGap::Sm wrap=false>
                {show_preview.then(|| {
                    view! {
                        <PreviewFrame
                            src=Signal::derive(move || current.with(DisplayEntry::preview_url))
                            alt=preview_alt
                            fallback_icon
                        />
                    }
                })}
                <Stack gap=LayoutGap::None layout_class="file-entry-copy">
                    <Text>{name}</Text>
                    <Text role=TextRole::Caption tone=TextTone::Secondary>{size}</Text>
                    <Badge tone=Signal::derive(move || status.with(status_tone))>
                        {move || status.with(status_label)}
                    </Badge>
                    {show_progress.then(|| {
                        view! {
                            <Show
                                when=move || matches!(status.get(), EntryStatus::Uploading(_))
                                fallback=|| ()
                            >
                                <ProgressBar
                                    aria_label=progress_label.clone()
                                    value=Signal::derive(move || match status.get() {
                                        EntryStatus::Uploading(progress) => u16::from(progress),
                                        _ => 100,
                                    })
                                />
                            </Show>
                        }
                    })}
                </Stack>
                {allow_remove.then(|| {
                    view! {
                        <IconButton
                            icon=IconName::Dismiss
                            aria_label=remove_label
                            on_click=remove
                        />
                    }
                })}
            </Cluster>
        </ListItem>
    }
    .into_view()
}

#[component]
fn RemovedEntry(controller: UploaderController<BrowserFile>, item: RecentlyRemoved) -> impl IntoView {
    let id = item.file.id;
    view! {
        <ListItem ui_slot="removed-entry" state="pending-removal">
            <Cluster justify=LayoutJustify::Between wrap=false>
                <Stack gap=LayoutGap::None>
                    <Text>{item.file.name.clone()}</Text>
                    <Text role=TextRole::Caption tone=TextTone::Warning live=true>
                        {format!("Deleting in {}s", item.remaining_secs)}
                    </Text>
                </Stack>
                <Cluster gap=LayoutGap::Sm>
                    <Button
                        size=ButtonSize::Sm
                        leading_icon=IconName::Undo
                        on_click=Callback::new(move |_| controller.undo_removal(id))
                    >
                        "Undo"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Danger
                        on_click=Callback::new(move |_| controller.confirm_removal(id))
                    >
                        "Delete now"
                    </Button>
                </Cluster>
            </Cluster>
        </ListItem>
    }
}
