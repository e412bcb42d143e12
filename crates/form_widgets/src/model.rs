//! Uploader data model: remote records, local pending files, staged removals, and the per-instance
//! state object that owns all four pools.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::UploaderConfig;
use crate::validation::ValidationError;

/// How long a removed remote file stays undoable.
pub const REMOVAL_GRACE_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteFileId(pub u64);

impl fmt::Display for RemoteFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Client-generated id of a local pending file: `<instance salt>-<sequence>`.
pub struct LocalFileId(pub String);

impl fmt::Display for LocalFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A file already persisted by the host.
pub struct RemoteFile {
    pub id: RemoteFileId,
    pub name: String,
    #[serde(alias = "size")]
    pub size_bytes: u64,
    #[serde(alias = "type", default)]
    pub mime_type: String,
    pub url: String,
}

impl RemoteFile {
    /// Parses a host-rendered JSON array of remote file records.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the payload is not a list of records.
    pub fn list_from_json(raw: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn is_image(&self) -> bool {
        platform_host::is_image_mime(&self.mime_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A file selected in this session.
pub struct LocalFile<F> {
    pub id: LocalFileId,
    pub name: String,
    pub payload: F,
    /// `data:` URL, present only for image payloads whose preview read succeeded.
    pub preview: Option<String>,
    /// 0..=100.
    pub progress: u8,
    pub error: Option<ValidationError>,
    pub uploaded: bool,
}

impl<F> LocalFile<F> {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Uploaded or permanently failed; no further progress is expected.
    pub fn is_resolved(&self) -> bool {
        self.uploaded || self.error.is_some()
    }

    /// Valid and not yet uploaded.
    pub fn awaits_upload(&self) -> bool {
        !self.is_resolved()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A remote file the user removed that can still be restored.
pub struct PendingRemoval {
    pub file: RemoteFile,
    pub removed_at_ms: u64,
}

impl PendingRemoval {
    pub fn expires_at_ms(&self) -> u64 {
        self.removed_at_ms.saturating_add(REMOVAL_GRACE_MS)
    }

    /// Milliseconds left in the grace window; zero or negative once expired.
    pub fn remaining_ms(&self, now_ms: u64) -> i64 {
        self.expires_at_ms() as i64 - now_ms as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
/// All state owned by one uploader instance.
pub struct UploaderState<F> {
    pub config: UploaderConfig,
    /// Active remote files in host order, minus pending and confirmed removals.
    pub remote: Vec<RemoteFile>,
    /// Local files in selection order.
    pub local: Vec<LocalFile<F>>,
    /// Removed remote files still inside their grace window, in removal order.
    pub pending_removals: Vec<PendingRemoval>,
    /// Permanently removed remote ids, surfaced to the host as form markers.
    pub confirmed_removals: Vec<RemoteFileId>,
    /// Ids of the last host-supplied remote list, used to restore undone files in place.
    pub host_order: Vec<RemoteFileId>,
    pub sweep_active: bool,
    /// Latch for the batch completion notification.
    pub completion_reported: bool,
    id_salt: String,
    next_local_seq: u64,
}

impl<F> UploaderState<F> {
    pub fn new(config: UploaderConfig, remote: Vec<RemoteFile>) -> Self {
        Self {
            config,
            host_order: remote.iter().map(|file| file.id).collect(),
            remote,
            local: Vec::new(),
            pending_removals: Vec::new(),
            confirmed_removals: Vec::new(),
            sweep_active: false,
            completion_reported: false,
            id_salt: "local".to_string(),
            next_local_seq: 1,
        }
    }

    /// Replaces the local id prefix so several instances on one page never share ids.
    pub fn with_id_salt(mut self, salt: impl Into<String>) -> Self {
        self.id_salt = salt.into();
        self
    }

    pub(crate) fn next_local_id(&mut self) -> LocalFileId {
        let id = LocalFileId(format!("{}-{}", self.id_salt, self.next_local_seq));
        self.next_local_seq = self.next_local_seq.saturating_add(1);
        id
    }

    /// Slots taken by active remote and local files.
    pub fn occupied_slots(&self) -> usize {
        self.remote.len() + self.local.len()
    }

    pub fn available_slots(&self) -> usize {
        self.config
            .effective_max_files()
            .saturating_sub(self.occupied_slots())
    }

    pub fn find_local(&self, id: &LocalFileId) -> Option<&LocalFile<F>> {
        self.local.iter().find(|file| &file.id == id)
    }

    pub fn is_pending_removal(&self, id: RemoteFileId) -> bool {
        self.pending_removals.iter().any(|entry| entry.file.id == id)
    }

    pub fn is_confirmed_removal(&self, id: RemoteFileId) -> bool {
        self.confirmed_removals.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn remote_files_parse_from_host_json_aliases() {
        let files = RemoteFile::list_from_json(
            r#"[{"id": 7, "name": "cover.png", "size": 2048, "type": "image/png", "url": "/media/7"},
                {"id": 8, "name": "notes.pdf", "size_bytes": 10, "url": "/media/8"}]"#,
        )
        .expect("remote json");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].id, RemoteFileId(7));
        assert_eq!(files[0].size_bytes, 2048);
        assert!(files[0].is_image());
        assert_eq!(files[1].mime_type, "");
        assert!(!files[1].is_image());
    }

    #[test]
    fn local_ids_are_salted_and_sequential() {
        let mut state = UploaderState::<()>::new(UploaderConfig::default(), Vec::new())
            .with_id_salt("a1b2");
        assert_eq!(state.next_local_id(), LocalFileId("a1b2-1".to_string()));
        assert_eq!(state.next_local_id(), LocalFileId("a1b2-2".to_string()));
    }

    #[test]
    fn grace_window_counts_down_from_removal() {
        let entry = PendingRemoval {
            file: RemoteFile {
                id: RemoteFileId(1),
                name: "a".to_string(),
                size_bytes: 0,
                mime_type: String::new(),
                url: String::new(),
            },
            removed_at_ms: 1_000,
        };
        assert_eq!(entry.expires_at_ms(), 11_000);
        assert_eq!(entry.remaining_ms(4_000), 7_000);
        assert_eq!(entry.remaining_ms(11_000), 0);
        assert_eq!(entry.remaining_ms(12_500), -1_500);
    }
}
