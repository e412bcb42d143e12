//! Browser file handles and `FileReader`-backed preview generation.

use platform_host::{FilePayload, PreviewFuture, PreviewGenerator};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A user-selected browser file.
pub struct BrowserFile(pub web_sys::File);

impl BrowserFile {
    /// Borrows the underlying `web_sys::File` for hand-off to a real transport.
    pub fn as_file(&self) -> &web_sys::File {
        &self.0
    }
}

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        Self(file)
    }
}

impl FilePayload for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size_bytes(&self) -> u64 {
        self.0.size().max(0.0) as u64
    }
}

/// Collects every file from an input element's `FileList`, in selection order.
pub fn browser_files_from_list(list: Option<web_sys::FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(BrowserFile)
        .collect()
}

/// Collects dropped files from a drag-and-drop `DataTransfer`.
pub fn browser_files_from_transfer(transfer: Option<web_sys::DataTransfer>) -> Vec<BrowserFile> {
    browser_files_from_list(transfer.and_then(|transfer| transfer.files()))
}

#[derive(Debug, Clone, Copy, Default)]
/// Preview generator that reads image files into `data:` URLs.
pub struct FileReaderPreviewGenerator;

impl PreviewGenerator<BrowserFile> for FileReaderPreviewGenerator {
    fn generate_preview(&self, file: &BrowserFile) -> PreviewFuture {
        if !file.is_image() {
            return Box::pin(async { None });
        }

        #[cfg(target_arch = "wasm32")]
        {
            let file = file.0.clone();
            Box::pin(async move { read_file_as_data_url(&file).await.ok() })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Box::pin(async { None })
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file_as_data_url(file: &web_sys::File) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read preview: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load preview".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_data_url(file)
        .map_err(|err| format!("failed to start preview read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "preview read was interrupted".to_string())?;
    reader.set_onload(None);
    reader.set_onerror(None);
    drop(on_load);
    drop(on_error);
    result
}
