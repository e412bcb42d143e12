//! Shared UI primitive library for the form widgets.
//!
//! The crate owns reusable Leptos primitives (buttons, fields, popovers, list rows, drop zones, progress), a
//! centralized icon API, and the stable `data-ui-*` DOM contract consumed by the stylesheet.
//! Widgets compose these primitives instead of emitting ad hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Badge, Button, ButtonSize, ButtonVariant, Cluster, DropZone, DropZoneState, EmptyState,
    FieldGroup, FieldVariant, Grid, HiddenField, IconButton, LayoutAlign, LayoutGap, LayoutJustify,
    ListItem, ListSurface, MenuItem, MenuSurface, Popover, PreviewFrame, ProgressBar, Stack, Text,
    TextField, TextRole, TextTone,
};

/// Convenience imports for widget crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Badge, Button, ButtonSize, ButtonVariant, Cluster, DropZone, DropZoneState, EmptyState,
        FieldGroup, FieldVariant, Grid, HiddenField, Icon, IconButton, IconName, IconSize,
        LayoutAlign, LayoutGap, LayoutJustify, ListItem, ListSurface, MenuItem, MenuSurface,
        Popover, PreviewFrame, ProgressBar, Stack, Text, TextField, TextRole, TextTone,
    };
}
