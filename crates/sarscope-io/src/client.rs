//! HTTP access to the conversion and gallery services via `fetch`.
//!
//! Requests are built with `web_sys` and awaited through
//! `wasm_bindgen_futures::JsFuture`.  Status and body are handed to the
//! interpreters in `sarscope_core` so every mapping decision is made
//! (and tested) outside the browser.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use sarscope_core::gallery::interpret_gallery_response;
use sarscope_core::service::{UPLOAD_FIELD, interpret_health_response, interpret_process_response};
use sarscope_core::upload::mime_type_for;
use sarscope_core::{
    ConvertError, ConvertedPair, GalleryError, GalleryListing, ServiceConfig, Timestamp,
    UploadFile,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// Errors raised by the browser while performing a request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A browser API call returned an error or a required object was missing.
    #[error("fetch API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        Self::JsError(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

/// A status code and the response body as text.
struct RawResponse {
    status: u16,
    body: String,
}

/// Client for the remote conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionClient {
    config: ServiceConfig,
}

impl ConversionClient {
    /// Create a client for the service described by `config`.
    #[must_use]
    pub const fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// The service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Upload `file` and wait for the converted pair.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Transport`] if the request could not be made or
    /// completed, otherwise whatever the response maps to (see
    /// [`interpret_process_response`]).
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    pub async fn process(&self, file: &UploadFile) -> Result<ConvertedPair, ConvertError> {
        let response = self
            .post_file(file)
            .await
            .map_err(|e| ConvertError::Transport {
                detail: e.to_string(),
            })?;
        interpret_process_response(response.status, &response.body, &self.config)
    }

    /// Fetch the list of previously converted pairs.
    ///
    /// `now` fills in entries without a date or time.
    ///
    /// # Errors
    ///
    /// [`GalleryError::Transport`] if the request failed, otherwise
    /// whatever the response maps to (see [`interpret_gallery_response`]).
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    pub async fn gallery(&self, now: &Timestamp) -> Result<GalleryListing, GalleryError> {
        let response = get(&self.config.gallery_url())
            .await
            .map_err(|e| GalleryError::Transport {
                detail: e.to_string(),
            })?;
        interpret_gallery_response(response.status, &response.body, &self.config, now)
    }

    /// Whether the service answers its health check.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    pub async fn is_healthy(&self) -> bool {
        match get(&self.config.health_url()).await {
            Ok(response) => interpret_health_response(response.status, &response.body),
            Err(e) => {
                web_sys::console::warn_1(&format!("health check failed: {e}").into());
                false
            }
        }
    }

    /// POST `file` as the single multipart field of the conversion request.
    #[allow(clippy::future_not_send)]
    async fn post_file(&self, file: &UploadFile) -> Result<RawResponse, ClientError> {
        let bytes = js_sys::Uint8Array::from(file.bytes());
        let parts = js_sys::Array::new();
        parts.push(&bytes);

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type_for(file.name()));
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, file.name())?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&form);

        let request = Request::new_with_str_and_init(&self.config.process_url(), &init)?;
        send(&request).await
    }
}

/// GET `url` with no body.
#[allow(clippy::future_not_send)]
async fn get(url: &str) -> Result<RawResponse, ClientError> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &init)?;
    request.headers().set("Accept", "application/json")?;
    send(&request).await
}

/// Run `request` and read the whole body as text.
#[allow(clippy::future_not_send)]
async fn send(request: &Request) -> Result<RawResponse, ClientError> {
    let window =
        web_sys::window().ok_or_else(|| ClientError::JsError("no global window".into()))?;

    let value = JsFuture::from(window.fetch_with_request(request)).await?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ClientError::JsError("fetch did not return a Response".into()))?;

    let status = response.status();
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(RawResponse { status, body })
}

/// The browser's local date and time, used for gallery defaults.
#[must_use]
pub fn local_timestamp() -> Timestamp {
    let now = js_sys::Date::new_0();
    Timestamp {
        date: String::from(now.to_locale_date_string("default", &JsValue::UNDEFINED)),
        time: String::from(now.to_locale_time_string("default")),
    }
}
