//! Typed host contracts shared by the form widgets and their browser adapters.
//!
//! This crate has no browser dependency. It exposes the clock used by timed widget state, the
//! [`FilePayload`] trait that lets widget state hold host file handles, and the async
//! [`PreviewGenerator`] contract. Concrete browser implementations live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod media;
pub mod time;

pub use media::{
    is_image_mime, FilePayload, NoopPreviewGenerator, PreviewFuture, PreviewGenerator,
};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
