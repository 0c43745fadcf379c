//! Browser persistence: `localStorage` and file downloads.

use pagemap_editor::{FileExporter, KeyValueStore, StorageError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

fn backend(e: JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", e))
}

fn window() -> Result<web_sys::Window, StorageError> {
    web_sys::window().ok_or_else(|| StorageError::Backend("no window".to_string()))
}

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, StorageError> {
        let storage = window()?
            .local_storage()
            .map_err(backend)?
            .ok_or_else(|| StorageError::Backend("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(backend)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(backend)
    }
}

/// Triggers a download through a temporary object URL
pub struct BrowserDownload;

impl FileExporter for BrowserDownload {
    fn export(&mut self, file_name: &str, contents: &str) -> Result<(), StorageError> {
        let export = |e: JsValue| StorageError::Export(format!("{:?}", e));

        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(contents));
        let opts = BlobPropertyBag::new();
        opts.set_type("application/json");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &opts).map_err(export)?;

        let document = window()?
            .document()
            .ok_or_else(|| StorageError::Export("no document".to_string()))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(export)?
            .dyn_into()
            .map_err(|_| StorageError::Export("anchor element has unexpected type".to_string()))?;

        let url = Url::create_object_url_with_blob(&blob).map_err(export)?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        // The object URL must not outlive the click
        Url::revoke_object_url(&url).map_err(export)
    }
}
