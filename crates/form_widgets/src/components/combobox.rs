use leptos::*;
use system_ui::prelude::*;

use crate::combobox::{
    filter_options, remove_selection, selected_labels, toggle_selection, ComboboxOption,
};

#[component]
/// Searchable multi-select. Each selected value is submitted as a hidden input named `name`.
pub fn Combobox(
    #[prop(into)] name: String,
    options: Vec<ComboboxOption>,
    #[prop(optional)] initial: Vec<String>,
    #[prop(optional)] max_selected: Option<usize>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] search_placeholder: Option<String>,
    #[prop(optional, into)] empty_text: Option<String>,
    #[prop(optional)] on_change: Option<Callback<Vec<String>>>,
) -> impl IntoView {
    let options = store_value(options);
    let selected = create_rw_signal(initial);
    let query = create_rw_signal(String::new());
    let open = create_rw_signal(false);
    let placeholder = placeholder.unwrap_or_else(|| "Select options".to_string());
    let search_placeholder = store_value(search_placeholder.unwrap_or_else(|| "Search...".to_string()));
    let empty_text = store_value(empty_text.unwrap_or_else(|| "No results".to_string()));

    let commit = move |next: Vec<String>| {
        selected.set(next.clone());
        if let Some(on_change) = on_change.as_ref() {
            on_change.call(next);
        }
    };
    let toggle = move |value: String| {
        let mut next = selected.get_untracked();
        if toggle_selection(&mut next, &value, max_selected) {
            commit(next);
        }
    };
    let remove = move |value: String| {
        let mut next = selected.get_untracked();
        remove_selection(&mut next, &value);
        commit(next);
    };

    let chips = Signal::derive(move || {
        options.with_value(|options| selected.with(|selected| selected_labels(options, selected)))
    });
    let visible = Signal::derive(move || {
        options.with_value(|options| {
            query.with(|query| {
                filter_options(options, query)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });
    let trigger_label = Signal::derive(move || match selected.with(Vec::len) {
        0 => placeholder.clone(),
        count => format!("{count} selected"),
    });

    view! {
        <FieldGroup layout_class="combobox" title=label.unwrap_or_default()>
            <Stack gap=LayoutGap::Sm>
                <Cluster gap=LayoutGap::Sm ui_slot="chips">
                    <For
                        each=move || chips.get()
                        key=|(value, _)| value.clone()
                        children=move |(value, label)| {
                            let remove_label = format!("Remove {label}");
                            view! {
                                <Cluster gap=LayoutGap::None ui_slot="chip">
                                    <Badge>{label}</Badge>
                                    <IconButton
                                        icon=IconName::Dismiss
                                        aria_label=remove_label
                                        on_click=Callback::new(move |_| remove(value.clone()))
                                    />
                                </Cluster>
                            }
                        }
                    />
                </Cluster>
                <Popover
                    open=open
                    aria_label="Options"
                    on_dismiss=Callback::new(move |_| open.set(false))
                    trigger=Box::new(move || {
                        Fragment::new(vec![
                            view! {
                                <Button
                                    trailing_icon=IconName::ChevronDown
                                    aria_haspopup="listbox".to_string()
                                    aria_expanded=open
                                    on_click=Callback::new(move |_| open.update(|open| *open = !*open))
                                >
                                    {move || trigger_label.get()}
                                </Button>
                            }
                            .into_view(),
                        ])
                    })
                >
                    <Stack gap=LayoutGap::Sm layout_class="combobox-panel">
                        <TextField
                            variant=FieldVariant::Embedded
                            input_type="search"
                            aria_label="Search options"
                            placeholder=search_placeholder.get_value()
                            value=query
                            on_input=Callback::new(move |ev| query.set(event_target_value(&ev)))
                        />
                        <Show
                            when=move || !visible.with(Vec::is_empty)
                            fallback=move || view! { <EmptyState>{empty_text.get_value()}</EmptyState> }
                        >
                            <ListSurface role="listbox" aria_label="Options">
                                <For
                                    each=move || visible.get()
                                    key=|option| option.value.clone()
                                    children=move |option| {
                                        let value = option.value.clone();
                                        let is_selected = Signal::derive(move || {
                                            selected.with(|selected| selected.contains(&value))
                                        });
                                        let value = option.value;
                                        view! {
                                            <MenuItem
                                                selected=is_selected
                                                on_click=Callback::new(move |_| toggle(value.clone()))
                                            >
                                                {option.label}
                                            </MenuItem>
                                        }
                                    }
                                />
                            </ListSurface>
                        </Show>
                    </Stack>
                </Popover>
                <For
                    each=move || selected.get()
                    key=|value| value.clone()
                    children=move |value| view! { <HiddenField name=name.clone() value /> }
                />
            </Stack>
        </FieldGroup>
    }
}
