//! Centralized inline SVG icon set.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Named icons available to primitives and widgets.
pub enum IconName {
    /// Upload arrow into a tray.
    Upload,
    /// Generic document.
    Document,
    /// Image/photo.
    Image,
    /// Close cross.
    Dismiss,
    /// Trash can.
    Delete,
    /// Counter-clockwise arrow.
    Undo,
    /// Plus sign.
    Add,
    /// Check mark.
    Checkmark,
    /// Calendar page.
    Calendar,
    /// Left chevron.
    ChevronLeft,
    /// Right chevron.
    ChevronRight,
    /// Down chevron.
    ChevronDown,
}

impl IconName {
    /// Stable token used in `data-ui-icon`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Document => "document",
            Self::Image => "image",
            Self::Dismiss => "dismiss",
            Self::Delete => "delete",
            Self::Undo => "undo",
            Self::Add => "add",
            Self::Checkmark => "checkmark",
            Self::Calendar => "calendar",
            Self::ChevronLeft => "chevron-left",
            Self::ChevronRight => "chevron-right",
            Self::ChevronDown => "chevron-down",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Upload => "M12 3l5 5h-3v6h-4V8H7l5-5zM4 17h16v4H4z",
            Self::Document => "M6 2h8l6 6v14H6V2zm8 1.5V9h5.5",
            Self::Image => "M3 5h18v14H3V5zm2 12h14l-4.5-6-3.5 4.5-2.5-3L5 17z",
            Self::Dismiss => "M6 6l12 12M18 6L6 18",
            Self::Delete => "M4 7h16M9 7V4h6v3M6 7l1 14h10l1-14",
            Self::Undo => "M9 14L4 9l5-5M4 9h10a6 6 0 010 12h-3",
            Self::Add => "M12 5v14M5 12h14",
            Self::Checkmark => "M5 12l5 5L20 7",
            Self::Calendar => "M4 5h16v16H4V5zm0 5h16M8 3v4M16 3v4",
            Self::ChevronLeft => "M15 5l-7 7 7 7",
            Self::ChevronRight => "M9 5l7 7-7 7",
            Self::ChevronDown => "M5 9l7 7 7-7",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Icon sizing tokens.
pub enum IconSize {
    /// 16px.
    Sm,
    /// 20px.
    #[default]
    Md,
    /// 32px.
    Lg,
}

impl IconSize {
    fn px(self) -> u8 {
        match self {
            Self::Sm => 16,
            Self::Md => 20,
            Self::Lg => 32,
        }
    }
}

#[component]
/// Inline SVG icon. Decorative by default (`aria-hidden`).
pub fn Icon(icon: IconName, #[prop(default = IconSize::Md)] size: IconSize) -> impl IntoView {
    let px = size.px();
    view! {
        <svg
            class="ui-icon"
            width=px
            height=px
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="1.75"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="icon"
            data-ui-icon=icon.token()
        >
            <path d=icon.path()></path>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_tokens_are_unique() {
        let all = [
            IconName::Upload,
            IconName::Document,
            IconName::Image,
            IconName::Dismiss,
            IconName::Delete,
            IconName::Undo,
            IconName::Add,
            IconName::Checkmark,
            IconName::Calendar,
            IconName::ChevronLeft,
            IconName::ChevronRight,
            IconName::ChevronDown,
        ];
        let mut tokens: Vec<_> = all.iter().map(|icon| icon.token()).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), all.len());
    }
}
