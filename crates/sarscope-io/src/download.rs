//! Client-side file saves.
//!
//! Dioxus has no built-in file download API.  This module triggers a
//! save by programmatically clicking a temporary `<a download>` element
//! pointing at an already-resolved resource locator.  No request is made
//! from Rust; the browser fetches the resource itself.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use sarscope_core::DownloadRequest;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Save the resource at `request.url` under `request.filename`.
///
/// Creates a temporary `<a href=url download=filename>`, appends it to
/// the body, clicks it and removes it again.
///
/// Browsers only honour the `download` name for same-origin or
/// `blob:` URLs; for other origins the server's own name may be used.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if the window, document or body
/// is unavailable or element creation fails.
pub fn save(request: &DownloadRequest) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(&request.url);
    anchor.set_download(&request.filename);
    anchor.set_rel("noopener");

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The save is already initiated; a failed removal is not a failed
    // download.
    let _ = body.remove_child(&anchor);

    Ok(())
}
