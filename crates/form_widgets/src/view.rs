//! Read-only projections of [`UploaderState`] used by the uploader view and host callbacks.

use platform_host::FilePayload;

use crate::model::{LocalFile, LocalFileId, RemoteFile, RemoteFileId, UploaderState};

#[derive(Debug, Clone, PartialEq)]
/// One row in the uploader's file list.
pub enum DisplayEntry<F> {
    Remote(RemoteFile),
    Local(LocalFile<F>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Badge state rendered next to a file row.
pub enum EntryStatus {
    /// Remote file already stored by the host.
    Stored,
    /// Valid local file waiting for a manual upload.
    Queued,
    Uploading(u8),
    Uploaded,
    Invalid(String),
}

impl<F> DisplayEntry<F> {
    /// Stable key for keyed list rendering.
    pub fn key(&self) -> String {
        match self {
            Self::Remote(file) => format!("remote-{}", file.id),
            Self::Local(file) => format!("local-{}", file.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Remote(file) => &file.name,
            Self::Local(file) => &file.name,
        }
    }

    pub fn size_bytes(&self) -> u64
    where
        F: FilePayload,
    {
        match self {
            Self::Remote(file) => file.size_bytes,
            Self::Local(file) => file.payload.size_bytes(),
        }
    }

    /// Thumbnail source: the stored URL for remote images, the generated preview for local ones.
    pub fn preview_url(&self) -> Option<String> {
        match self {
            Self::Remote(file) if file.is_image() => Some(file.url.clone()),
            Self::Remote(_) => None,
            Self::Local(file) => file.preview.clone(),
        }
    }

    pub fn status(&self) -> EntryStatus {
        match self {
            Self::Remote(_) => EntryStatus::Stored,
            Self::Local(file) => match &file.error {
                Some(error) => EntryStatus::Invalid(error.to_string()),
                None if file.uploaded => EntryStatus::Uploaded,
                None if file.progress > 0 => EntryStatus::Uploading(file.progress),
                None => EntryStatus::Queued,
            },
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Active remote files in host order, then local files in selection order.
pub fn display_entries<F: Clone>(state: &UploaderState<F>) -> Vec<DisplayEntry<F>> {
    state
        .remote
        .iter()
        .cloned()
        .map(DisplayEntry::Remote)
        .chain(state.local.iter().cloned().map(DisplayEntry::Local))
        .collect()
}

/// Current entry for a key produced by [`DisplayEntry::key`].
pub fn entry_by_key<F: Clone>(state: &UploaderState<F>, key: &str) -> Option<DisplayEntry<F>> {
    if let Some(id) = key.strip_prefix("remote-") {
        return state
            .remote
            .iter()
            .find(|file| file.id.to_string() == id)
            .cloned()
            .map(DisplayEntry::Remote);
    }
    let id = key.strip_prefix("local-")?;
    state
        .local
        .iter()
        .find(|file| file.id.0 == id)
        .cloned()
        .map(DisplayEntry::Local)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A pending removal with its countdown rounded up to whole seconds.
pub struct RecentlyRemoved {
    pub file: RemoteFile,
    pub remaining_secs: u64,
}

/// Pending removals still inside their window, in removal order.
pub fn recently_removed<F>(state: &UploaderState<F>, now_ms: u64) -> Vec<RecentlyRemoved> {
    state
        .pending_removals
        .iter()
        .filter_map(|entry| {
            let remaining = entry.remaining_ms(now_ms);
            (remaining > 0).then(|| RecentlyRemoved {
                file: entry.file.clone(),
                remaining_secs: (remaining as u64).div_ceil(1000),
            })
        })
        .collect()
}

pub fn selected_count<F>(state: &UploaderState<F>) -> usize {
    state.occupied_slots()
}

pub fn remaining_slots<F>(state: &UploaderState<F>) -> usize {
    state.available_slots()
}

/// Whether the dropzone should accept another selection.
pub fn can_add_more<F>(state: &UploaderState<F>) -> bool {
    if state.config.single_file {
        state.occupied_slots() == 0
    } else {
        state.available_slots() > 0
    }
}

/// Every local file finished uploading and there is at least one.
pub fn all_uploaded<F>(state: &UploaderState<F>) -> bool {
    !state.local.is_empty() && state.local.iter().all(|file| file.uploaded)
}

/// Some valid local file has not finished uploading.
pub fn has_in_flight<F>(state: &UploaderState<F>) -> bool {
    state.local.iter().any(LocalFile::awaits_upload)
}

/// Payloads reported through `on_files_change`: valid local files in selection order.
pub fn validated_payloads<F: Clone>(state: &UploaderState<F>) -> Vec<F> {
    state
        .local
        .iter()
        .filter(|file| file.is_valid())
        .map(|file| file.payload.clone())
        .collect()
}

/// Payloads for `ids`, skipping files removed since the completion was emitted.
pub fn uploaded_payloads<F: Clone>(state: &UploaderState<F>, ids: &[LocalFileId]) -> Vec<F> {
    ids.iter()
        .filter_map(|id| state.find_local(id))
        .filter(|file| file.uploaded)
        .map(|file| file.payload.clone())
        .collect()
}

/// Values of the hidden removal-marker inputs, one per confirmed removal.
pub fn confirmed_field_values<F>(state: &UploaderState<F>) -> Vec<String> {
    state
        .confirmed_removals
        .iter()
        .map(RemoteFileId::to_string)
        .collect()
}

/// Human-readable byte size with one decimal place and a trailing `.0` dropped.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.1}");
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{trimmed} {}", UNITS[unit])
}
