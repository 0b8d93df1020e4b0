//! Convert view: upload card, progress and the result comparison.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdImage, LdX};
use sarscope_core::{ImageKind, Phase, SubmitError, UploadFile, ValidationError};

use super::{Dropzone, ImageComparison};
use crate::controller::use_conversion;

/// The upload-and-compare workflow.
///
/// Owns the conversion session: the upload task and progress timer
/// live as long as this component. Keep it mounted to keep a
/// conversion running while another view is shown.
#[component]
pub fn ConvertPanel() -> Element {
    let conversion = use_conversion();
    let mut rejection = use_signal(|| Option::<String>::None);

    let workflow = conversion.read();
    let status = workflow.status();
    let progress = workflow.progress();
    let session = workflow.current_session();
    let in_flight = status.is_in_flight();

    let on_files = move |files: Vec<UploadFile>| match conversion.submit(files) {
        Ok(()) => rejection.set(None),
        Err(SubmitError::Invalid(e)) => rejection.set(Some(e.to_string())),
        // The dropzone is disabled while in flight.
        Err(SubmitError::InFlight) => {}
    };
    let on_reject = move |e: ValidationError| rejection.set(Some(e.to_string()));

    rsx! {
        div { class: "convert-grid",
            section { class: "card",
                h2 { class: "card-title", "Upload SAR Image" }

                if let Some(message) = workflow.error() {
                    div { class: "alert alert-error", role: "alert",
                        p { class: "alert-title", "Conversion failed" }
                        p { "{message}" }
                    }
                }

                {match workflow.file() {
                    None => rsx! {
                        Dropzone {
                            on_files,
                            on_reject,
                            max_upload_bytes: conversion.max_upload_bytes(),
                            disabled: in_flight,
                            error: rejection(),
                        }
                    },
                    Some(file) => rsx! {
                        div { class: "file-summary",
                            Icon { width: 20, height: 20, icon: LdImage }
                            div {
                                p { class: "file-name", "{file.name()}" }
                                p { class: "file-size", "{file.size_label()}" }
                            }
                        }
                    },
                }}

                if in_flight {
                    div { class: "progress",
                        div { class: "progress-header",
                            span { "{workflow.schedule().phase_label(progress)}" }
                            span { "{progress}%" }
                        }
                        div {
                            class: "progress-track",
                            role: "progressbar",
                            aria_valuemin: "0",
                            aria_valuemax: "100",
                            aria_valuenow: "{progress}",
                            div { class: "progress-fill", style: "width: {progress}%;" }
                        }
                    }
                    button {
                        class: "button button-outline",
                        onclick: move |_| conversion.reset(),
                        Icon { width: 16, height: 16, icon: LdX }
                        "Cancel"
                    }
                } else if workflow.file().is_some() {
                    button {
                        class: "button button-outline",
                        onclick: move |_| {
                            rejection.set(None);
                            conversion.reset();
                        },
                        "Process Another Image"
                    }
                }
            }

            section { class: "card",
                h2 { class: "card-title", "Results" }

                if let Phase::Complete { result, .. } = workflow.phase() {
                    ImageComparison {
                        key: "{session}",
                        before: result.original.clone(),
                        after: result.processed.clone(),
                    }
                    div { class: "result-actions",
                        button {
                            class: "button",
                            onclick: move |_| conversion.download(ImageKind::Processed),
                            Icon { width: 16, height: 16, icon: LdDownload }
                            "Download RGB"
                        }
                        button {
                            class: "button button-outline",
                            onclick: move |_| conversion.download(ImageKind::Original),
                            Icon { width: 16, height: 16, icon: LdDownload }
                            "Download Original"
                        }
                        button {
                            class: "button button-outline",
                            onclick: move |_| conversion.add_to_gallery(),
                            "Add to Gallery"
                        }
                    }
                } else {
                    div { class: "placeholder",
                        Icon { width: 40, height: 40, icon: LdImage }
                        if in_flight {
                            p { "Converting your image..." }
                        } else {
                            p { "Upload and process a SAR image to see the results here" }
                        }
                    }
                }
            }
        }
    }
}
