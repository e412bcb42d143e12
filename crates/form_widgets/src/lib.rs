pub mod array_input;
pub mod calendar;
pub mod combobox;
pub mod components;
pub mod config;
mod effect_executor;
pub mod model;
pub mod progress;
pub mod reducer;
pub mod scheduler;
pub mod uploader_runtime;
pub mod validation;
pub mod view;

#[cfg(test)]
mod test_support;

pub use components::{ArrayInput, Combobox, DatePicker, MediaUploader};
pub use config::{AcceptCategory, AcceptPattern, AcceptRule, UploaderConfig};
pub use model::*;
pub use reducer::{reduce_uploader, UploaderAction, UploaderEffect, UploaderError};
pub use uploader_runtime::{UploaderCallbacks, UploaderController, UploaderServices};
pub use validation::{validate_file, validate_payload, ValidationError};
