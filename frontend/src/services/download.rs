//! Saving generated bytes from the browser.
//!
//! The bytes are wrapped in a `Blob`, exposed through an object URL and
//! clicked through a detached `<a download>` element.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, Url};

use super::generate::js_error_message;
use crate::submission::Downloader;
use crate::types::DownloadError;

/// An object URL that is revoked when dropped.
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    /// Create a blob URL holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JsValue> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array);
        let blob = Blob::new_with_u8_array_sequence(&parts)?;
        let url = Url::create_object_url_with_blob(&blob)?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("Failed to revoke object URL: {:?}", e);
        }
    }
}

/// [`Downloader`] backed by the page's document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDownloader;

impl Downloader for BrowserDownloader {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), DownloadError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DownloadError::new("No document available"))?;
        let body = document
            .body()
            .ok_or_else(|| DownloadError::new("Document has no body"))?;

        let url = ObjectUrl::from_bytes(bytes).map_err(js_download_error)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_download_error)?
            .dyn_into()
            .map_err(|_| DownloadError::new("Failed to create download link"))?;
        anchor.set_href(url.as_str());
        anchor.set_download(filename);

        body.append_child(&anchor).map_err(js_download_error)?;
        anchor.click();
        anchor.remove();

        Ok(())
    }
}

fn js_download_error(value: JsValue) -> DownloadError {
    DownloadError { message: js_error_message(&value) }
}
