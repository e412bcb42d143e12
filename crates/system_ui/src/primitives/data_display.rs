use super::*;

#[component]
/// Inline text. `live` makes it a polite live region for counters and countdowns.
pub fn Text(
    #[prop(default = TextRole::Body)] role: TextRole,
    #[prop(default = TextTone::Primary)] tone: TextTone,
    #[prop(optional)] live: bool,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-text", layout_class)
            aria-live=live.then_some("polite")
            data-ui-primitive="true"
            data-ui-kind="text"
            data-ui-variant=role.token()
            data-ui-tone=tone.token()
        >
            {children()}
        </span>
    }
}

#[component]
/// Status pill. The tone may follow a signal so one badge can track a changing status.
pub fn Badge(
    #[prop(into, default = MaybeSignal::Static(TextTone::Secondary))] tone: MaybeSignal<TextTone>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-badge", layout_class)
            data-ui-primitive="true"
            data-ui-kind="badge"
            data-ui-tone=move || tone.get().token()
        >
            {children()}
        </span>
    }
}

#[component]
/// Placeholder shown when a list has nothing to show.
pub fn EmptyState(children: Children) -> impl IntoView {
    view! {
        <div class="ui-empty-state" role="status" data-ui-primitive="true" data-ui-kind="empty-state">
            {children()}
        </div>
    }
}

#[component]
/// List container. Pair with [`ListItem`] rows.
pub fn ListSurface(
    #[prop(optional, into)] role: Option<String>,
    #[prop(into)] aria_label: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="ui-list-surface"
            role=role.unwrap_or_else(|| "list".to_string())
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="list-surface"
        >
            {children()}
        </div>
    }
}

#[component]
/// One row of a [`ListSurface`]. `state` is exposed as `data-ui-state` so rows can be styled by
/// status (queued, uploading, invalid, pending removal).
pub fn ListItem(
    #[prop(optional, into)] state: MaybeSignal<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="ui-list-item"
            role="listitem"
            data-ui-primitive="true"
            data-ui-kind="list-item"
            data-ui-slot=ui_slot
            data-ui-state=move || state.get()
        >
            {children()}
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Visual state of a [`DropZone`].
pub enum DropZoneState {
    /// Waiting for files.
    Idle,
    /// Files are being dragged over the zone.
    Dragging,
    /// The owner accepts no more files.
    Full,
}

impl DropZoneState {
    /// A full zone stays full while hovered so the user sees why a drop will be refused.
    pub fn resolve(hovering: bool, accepting: bool) -> Self {
        match (accepting, hovering) {
            (false, _) => Self::Full,
            (true, true) => Self::Dragging,
            (true, false) => Self::Idle,
        }
    }

    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Full => "full",
        }
    }
}

#[component]
/// Drag-and-drop target. Tracks hover itself and forwards every drop to `on_drop`, including
/// drops onto a full zone, so the owner can report why they were refused.
pub fn DropZone(
    #[prop(into)] accepting: MaybeSignal<bool>,
    #[prop(into)] aria_label: String,
    on_drop: Callback<DragEvent>,
    children: Children,
) -> impl IntoView {
    let hovering = create_rw_signal(false);
    let state = Signal::derive(move || DropZoneState::resolve(hovering.get(), accepting.get()));

    view! {
        <div
            class="ui-dropzone"
            role="group"
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="dropzone"
            data-ui-state=move || state.get().token()
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                hovering.set(true);
            }
            on:dragleave=move |_| hovering.set(false)
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                hovering.set(false);
                on_drop.call(ev);
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// Fixed-size thumbnail frame. Falls back to `fallback_icon` when `src` is `None`.
pub fn PreviewFrame(
    #[prop(into)] src: MaybeSignal<Option<String>>,
    #[prop(into)] alt: String,
    #[prop(default = IconName::Document)] fallback_icon: IconName,
) -> impl IntoView {
    view! {
        <div class="ui-preview-frame" data-ui-primitive="true" data-ui-kind="preview-frame">
            {move || match src.get() {
                Some(src) => view! { <img src=src alt=alt.clone() loading="lazy" /> }.into_view(),
                None => view! { <Icon icon=fallback_icon size=IconSize::Lg /> }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_zone_ignores_hover() {
        assert_eq!(DropZoneState::resolve(false, true), DropZoneState::Idle);
        assert_eq!(DropZoneState::resolve(true, true), DropZoneState::Dragging);
        assert_eq!(DropZoneState::resolve(true, false), DropZoneState::Full);
        assert_eq!(DropZoneState::resolve(false, false), DropZoneState::Full);
    }

    #[test]
    fn drop_zone_tokens_are_distinct() {
        let tokens = [
            DropZoneState::Idle.token(),
            DropZoneState::Dragging.token(),
            DropZoneState::Full.token(),
        ];
        assert_eq!(tokens, ["idle", "dragging", "full"]);
    }
}
