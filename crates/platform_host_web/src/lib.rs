//! Browser (`wasm32`) implementations of [`platform_host`] media contracts.
//!
//! The crate wraps `web_sys::File` as a [`platform_host::FilePayload`], collects files from
//! `<input type="file">` and drag-and-drop transfers, and generates image previews through the
//! `FileReader` API.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod media;

pub use media::{
    browser_files_from_list, browser_files_from_transfer, BrowserFile, FileReaderPreviewGenerator,
};
