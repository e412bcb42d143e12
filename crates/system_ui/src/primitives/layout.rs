use super::*;

#[derive(Clone, Copy)]
enum Axis {
    Column,
    Row,
}

struct Flow {
    axis: Axis,
    gap: LayoutGap,
    align: LayoutAlign,
    justify: LayoutJustify,
    wrap: bool,
    layout_class: Option<&'static str>,
    ui_slot: Option<&'static str>,
}

impl Flow {
    fn render(self, children: Children) -> impl IntoView {
        let (base, kind) = match self.axis {
            Axis::Column => ("ui-stack", "stack"),
            Axis::Row => ("ui-cluster", "cluster"),
        };
        view! {
            <div
                class=merge_layout_class(base, self.layout_class)
                data-ui-primitive="true"
                data-ui-kind=kind
                data-ui-slot=self.ui_slot
                data-ui-gap=self.gap.token()
                data-ui-align=self.align.token()
                data-ui-justify=self.justify.token()
                data-ui-wrap=bool_token(self.wrap)
            >
                {children()}
            </div>
        }
    }
}

#[component]
/// Vertical flow. Children fill the cross axis unless `align` says otherwise.
pub fn Stack(
    #[prop(default = LayoutGap::Md)] gap: LayoutGap,
    #[prop(default = LayoutAlign::Stretch)] align: LayoutAlign,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    Flow {
        axis: Axis::Column,
        gap,
        align,
        justify: LayoutJustify::Start,
        wrap: false,
        layout_class,
        ui_slot,
    }
    .render(children)
}

#[component]
/// Horizontal flow for toolbars, chips, and list rows.
pub fn Cluster(
    #[prop(default = LayoutGap::Md)] gap: LayoutGap,
    #[prop(default = LayoutJustify::Start)] justify: LayoutJustify,
    /// Chip rows wrap; list rows keep their trailing actions on one line.
    #[prop(default = true)]
    wrap: bool,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    Flow {
        axis: Axis::Row,
        gap,
        align: LayoutAlign::Center,
        justify,
        wrap,
        layout_class,
        ui_slot,
    }
    .render(children)
}

#[component]
/// Fixed-column ARIA grid, used for calendar day cells.
pub fn Grid(
    #[prop(default = 7)] columns: u8,
    #[prop(into)] aria_label: MaybeSignal<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-grid", layout_class)
            role="grid"
            aria-label=move || aria_label.get()
            style=format!("--ui-grid-columns: {columns}")
            data-ui-primitive="true"
            data-ui-kind="grid"
            data-ui-columns=columns
        >
            {children()}
        </div>
    }
}
