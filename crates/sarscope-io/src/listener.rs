//! Window-level event listeners tied to a Rust value's lifetime.
//!
//! Pointer releases outside a component and page scrolling are only
//! visible on `window`.  A [`WindowListener`] registers its callback on
//! creation and removes it on drop, so storing one in a hook is enough
//! to unsubscribe when the component unmounts.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

/// Errors that can occur when registering a listener.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A browser API call returned an error or the window was missing.
    #[error("event listener error: {0}")]
    JsError(String),
}

impl From<JsValue> for ListenerError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Boxed event callback, for registering several at once.
pub type Handler = Box<dyn FnMut(web_sys::Event)>;

/// A callback registered on `window` for one event type.
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    /// Register `handler` for `event` on the global window.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::JsError`] if there is no window or the
    /// registration is refused.
    pub fn new(
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, ListenerError> {
        let window =
            web_sys::window().ok_or_else(|| ListenerError::JsError("no global window".into()))?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { event, callback })
    }

    /// Register several listeners, logging and skipping any that fail.
    pub fn register_all(handlers: Vec<(&'static str, Handler)>) -> Vec<Self> {
        handlers
            .into_iter()
            .filter_map(|(event, handler)| match Self::new(event, handler) {
                Ok(listener) => Some(listener),
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("could not listen for {event}: {e}").into(),
                    );
                    None
                }
            })
            .collect()
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}
