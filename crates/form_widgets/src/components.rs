//! Leptos views for the form widgets. State logic lives in the sibling pure modules.

mod array_input;
mod combobox;
mod date_picker;
mod media_uploader;

pub use array_input::ArrayInput;
pub use combobox::Combobox;
pub use date_picker::DatePicker;
pub use media_uploader::MediaUploader;
