use super::*;

#[component]
/// Anchored popover: renders `trigger` inline and `children` in a floating surface while `open`.
///
/// Escape and clicks on the backdrop call `on_dismiss`; the owner decides whether to close.
pub fn Popover(
    #[prop(into)] open: MaybeSignal<bool>,
    trigger: Children,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = store_value(children);
    let aria_label = store_value(aria_label.unwrap_or_default());
    let dismiss = move || {
        if let Some(on_dismiss) = on_dismiss.as_ref() {
            on_dismiss.call(());
        }
    };

    view! {
        <div
            class=merge_layout_class("ui-popover", layout_class)
            data-ui-primitive="true"
            data-ui-kind="popover"
            data-ui-open=move || bool_token(open.get())
            on:keydown=move |ev: KeyboardEvent| {
                if ev.key() == "Escape" && open.get_untracked() {
                    ev.prevent_default();
                    dismiss();
                }
            }
        >
            <div data-ui-slot="trigger">{trigger()}</div>
            <Show when=move || open.get() fallback=|| ()>
                <div data-ui-slot="backdrop" aria-hidden="true" on:mousedown=move |_| dismiss()></div>
                <MenuSurface role="dialog" aria_label=aria_label.get_value()>
                    {children.with_value(|children| children())}
                </MenuSurface>
            </Show>
        </div>
    }
}

#[component]
/// Shared overlay surface for menus and popups.
pub fn MenuSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            id=id
            role=role
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
            data-ui-elevation="overlay"
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared overlay menu item primitive.
pub fn MenuItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            layout_class=layout_class.unwrap_or("")
            role=role.unwrap_or_else(|| "option".to_string())
            aria_selected=selected
            disabled=disabled
            selected=selected
            ui_slot="menu-item"
            variant=ButtonVariant::Quiet
            trailing_icon=IconName::Checkmark
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
        >
            {children()}
        </Button>
    }
}
