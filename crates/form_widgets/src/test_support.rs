//! Fixtures shared by unit tests across the crate.

use platform_host::FilePayload;

use crate::model::{RemoteFile, RemoteFileId};

pub(crate) const MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FilePayload for TestFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

pub(crate) fn pdf(name: &str) -> TestFile {
    TestFile {
        name: name.to_string(),
        mime_type: "application/pdf".to_string(),
        size_bytes: 200 * 1024,
    }
}

pub(crate) fn png(name: &str) -> TestFile {
    TestFile {
        name: name.to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 300 * 1024,
    }
}

pub(crate) fn sized(name: &str, mime_type: &str, size_bytes: u64) -> TestFile {
    TestFile {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes,
    }
}

pub(crate) fn remote(id: u64, name: &str) -> RemoteFile {
    RemoteFile {
        id: RemoteFileId(id),
        name: name.to_string(),
        size_bytes: 4096,
        mime_type: "image/jpeg".to_string(),
        url: format!("https://cdn.example.test/media/{id}"),
    }
}
