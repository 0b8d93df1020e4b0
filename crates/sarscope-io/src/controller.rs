//! Upload/process controller hook.
//!
//! [`use_conversion`] wires the sans-IO [`Workflow`] to the browser: it
//! validates a selection, starts the progress timer, performs the
//! upload in a spawned task and feeds every timer tick and the final
//! response back into the workflow, tagged with the session they belong
//! to.  The workflow discards anything tagged with an older session, so
//! a reset never has to abort the request.

use dioxus::prelude::*;
use sarscope_core::upload::validate_selection;
use sarscope_core::{
    ConvertError, ConvertedPair, ImageKind, ProgressSchedule, SessionId, Settled, SubmitError,
    Tick, UploadFile, Workflow,
};

use crate::client::ConversionClient;
use crate::components::{Toaster, use_toaster};
use crate::download;
use crate::ticker::ProgressTicker;

/// Handle to the conversion workflow of one view.
///
/// `Copy`, so it can be moved into any number of event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Conversion {
    workflow: Signal<Workflow>,
    ticker: Signal<Option<ProgressTicker>>,
    client: Signal<ConversionClient>,
    toaster: Toaster,
}

/// Create the conversion workflow for the calling component.
///
/// Reads the [`ConversionClient`] and the [`Toaster`] from context. The
/// progress timer and the upload task belong to the calling component
/// and stop when it unmounts.
pub fn use_conversion() -> Conversion {
    let client: ConversionClient = use_context();
    let toaster = use_toaster();
    let max_upload_bytes = client.config().max_upload_bytes;
    let workflow = use_signal(|| Workflow::new(ProgressSchedule::default(), max_upload_bytes));
    let ticker = use_signal(|| None);
    let client = use_signal(|| client);
    Conversion {
        workflow,
        ticker,
        client,
        toaster,
    }
}

impl Conversion {
    /// The current workflow, subscribing the caller to changes.
    #[must_use]
    pub fn read(&self) -> Workflow {
        (self.workflow)()
    }

    /// Largest file the service accepts, in bytes.
    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.client.peek().config().max_upload_bytes
    }

    /// Validate `files` and, if accepted, start converting the file.
    ///
    /// # Errors
    ///
    /// The selection was rejected; nothing was sent and the workflow is
    /// unchanged.
    pub fn submit(mut self, files: Vec<UploadFile>) -> Result<(), SubmitError> {
        let file = validate_selection(files, self.max_upload_bytes())?;

        let ticket = match self.workflow.write().submit(file) {
            Ok(ticket) => ticket,
            Err(e) => {
                web_sys::console::warn_1(&format!("submission refused: {e}").into());
                return Err(e);
            }
        };
        web_sys::console::info_1(
            &format!(
                "converting {} ({}), session {}",
                ticket.file.name(),
                ticket.file.size_label(),
                ticket.id
            )
            .into(),
        );

        self.start_ticker(ticket.id);

        let client = self.client.peek().clone();
        spawn(async move {
            let outcome = client.process(&ticket.file).await;
            self.finish(ticket.id, outcome);
        });
        Ok(())
    }

    /// Abandon the current session and return to the upload prompt.
    pub fn reset(mut self) {
        self.ticker.set(None);
        self.workflow.write().reset();
    }

    /// Save one of the finished images.
    pub fn download(self, kind: ImageKind) {
        let request = match self.workflow.peek().download(kind) {
            Ok(request) => request,
            Err(e) => {
                web_sys::console::warn_1(&format!("download unavailable: {e}").into());
                return;
            }
        };
        if let Err(e) = download::save(&request) {
            web_sys::console::error_1(&format!("download failed: {e}").into());
            self.toaster
                .error("Download failed", format!("Could not save {}", request.filename));
        }
    }

    /// Confirm that the finished result is listed in the gallery.
    pub fn add_to_gallery(self) {
        match self.workflow.peek().add_to_gallery() {
            Ok(()) => self
                .toaster
                .success("Added to gallery", "Your image has been added to the gallery"),
            Err(e) => web_sys::console::warn_1(&format!("add to gallery unavailable: {e}").into()),
        }
    }

    fn start_ticker(mut self, session: SessionId) {
        let interval_ms = self.workflow.peek().schedule().interval_ms;
        let mut workflow = self.workflow;
        let ticker = ProgressTicker::start(session, interval_ms, move |id| {
            matches!(workflow.write().tick(id), Tick::Advanced(_))
        });
        // Replacing an older ticker drops it, which cancels it.
        self.ticker.set(Some(ticker));
    }

    fn stop_ticker(mut self, session: SessionId) {
        let owned = self
            .ticker
            .peek()
            .as_ref()
            .is_some_and(|ticker| ticker.session() == session);
        if owned {
            self.ticker.set(None);
        }
    }

    fn finish(mut self, session: SessionId, outcome: Result<ConvertedPair, ConvertError>) {
        if let Err(ConvertError::Transport { detail }) = &outcome {
            web_sys::console::error_1(
                &format!("conversion request for session {session} failed: {detail}").into(),
            );
        }

        let settled = self.workflow.write().settle(session, outcome);
        match settled {
            Settled::Completed => {
                self.stop_ticker(session);
                self.toaster
                    .success("Success", "Your SAR image has been converted to RGB");
            }
            Settled::Failed => {
                self.stop_ticker(session);
                let message = self.workflow.peek().error().unwrap_or_default().to_owned();
                web_sys::console::warn_1(
                    &format!("conversion for session {session} failed: {message}").into(),
                );
                self.toaster.error("Error", message);
            }
            Settled::Stale => {
                web_sys::console::info_1(
                    &format!("discarded response for stale session {session}").into(),
                );
            }
        }
    }
}
