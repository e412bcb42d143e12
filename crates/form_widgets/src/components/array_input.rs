use leptos::*;
use system_ui::prelude::*;

use crate::array_input::ArrayInputState;

#[component]
/// Editable list of text values, submitted as one hidden input named `name` per non-blank value.
pub fn ArrayInput(
    #[prop(into)] name: String,
    #[prop(optional)] initial: Vec<String>,
    #[prop(default = 1)] min_items: usize,
    #[prop(optional)] max_items: Option<usize>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] add_label: Option<String>,
    /// Receives the raw item list after every edit.
    #[prop(optional)]
    on_change: Option<Callback<Vec<String>>>,
) -> impl IntoView {
    let items = create_rw_signal(ArrayInputState::new(initial, min_items, max_items));
    let error = create_rw_signal(None::<String>);
    let placeholder = placeholder.unwrap_or_default();

    let notify = move || {
        if let Some(on_change) = on_change.as_ref() {
            on_change.call(items.with_untracked(|state| state.items.clone()));
        }
    };
    let push = move || {
        let mut next = items.get_untracked();
        match next.push(String::new()) {
            Ok(()) => {
                items.set(next);
                error.set(None);
                notify();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };
    let remove = move |index: usize| {
        let mut next = items.get_untracked();
        match next.remove(index) {
            Ok(_) => {
                items.set(next);
                error.set(None);
                notify();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };
    let submitted = Signal::derive(move || items.with(ArrayInputState::non_empty_values));

    view! {
        <FieldGroup layout_class="array-input" title=label.unwrap_or_default() error=error>
            <Stack gap=LayoutGap::Sm>
                <For
                    each=move || 0..items.with(|state| state.items.len())
                    key=|index| *index
                    children=move |index| {
                        let placeholder = placeholder.clone();
                        view! {
                            <Cluster gap=LayoutGap::Sm ui_slot="array-item">
                                <TextField
                                    aria_label=format!("Item {}", index + 1)
                                    placeholder=placeholder
                                    value=Signal::derive(move || {
                                        items.with(|state| state.items.get(index).cloned().unwrap_or_default())
                                    })
                                    on_input=Callback::new(move |ev| {
                                        let value = event_target_value(&ev);
                                        items.update(|state| state.update(index, value));
                                        notify();
                                    })
                                />
                                <IconButton
                                    icon=IconName::Delete
                                    aria_label=format!("Remove item {}", index + 1)
                                    disabled=Signal::derive(move || !items.with(ArrayInputState::can_remove))
                                    on_click=Callback::new(move |_| remove(index))
                                />
                            </Cluster>
                        }
                    }
                />
                <Cluster justify=LayoutJustify::Start>
                    <Button
                        size=ButtonSize::Sm
                        leading_icon=IconName::Add
                        disabled=Signal::derive(move || !items.with(ArrayInputState::can_add))
                        on_click=Callback::new(move |_| push())
                    >
                        {add_label.unwrap_or_else(|| "Add item".to_string())}
                    </Button>
                </Cluster>
                <For
                    each=move || submitted.get().into_iter().enumerate()
                    key=|(index, value)| (*index, value.clone())
                    children=move |(_, value)| {
                        let name = name.clone();
                        view! { <HiddenField name value /> }
                    }
                />
            </Stack>
        </FieldGroup>
    }
}
