//! SAR image dropzone with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use sarscope_core::upload::{ACCEPT_ATTRIBUTE, validate_listing};
use sarscope_core::{UploadFile, ValidationError};

/// Props for the [`Dropzone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropzoneProps {
    /// Called with every file read from a drop or picker selection.
    on_files: EventHandler<Vec<UploadFile>>,
    /// Called instead of reading when the names and sizes alone already
    /// fail validation.
    on_reject: EventHandler<ValidationError>,
    /// Largest accepted file in bytes.
    max_upload_bytes: u64,
    /// Ignore input while a conversion is in flight.
    #[props(default)]
    disabled: bool,
    /// Validation message from the last rejected selection.
    error: Option<String>,
}

/// A drag-and-drop zone with a file picker button.
///
/// Checks the selection's names and sizes first, so an oversized or
/// unsupported file is refused without being read. Otherwise reads the
/// bytes and forwards them as [`UploadFile`]s. Read failures are shown
/// inline and nothing is forwarded.
#[component]
pub fn Dropzone(props: DropzoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut read_error = use_signal(|| Option::<String>::None);
    let disabled = props.disabled;

    // Shared by the picker and drop paths so reading and forwarding
    // live in one place.
    let process_files = move |files: Vec<FileData>| async move {
        if disabled {
            return;
        }
        let listing: Vec<(String, u64)> = files.iter().map(|f| (f.name(), f.size())).collect();
        if let Err(e) = validate_listing(&listing, props.max_upload_bytes) {
            web_sys::console::warn_1(&format!("selection refused before reading: {e}").into());
            read_error.set(None);
            props.on_reject.call(e);
            return;
        }
        let mut uploads = Vec::with_capacity(files.len());
        for file in files {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => uploads.push(UploadFile::new(name, bytes.to_vec())),
                Err(e) => {
                    web_sys::console::warn_1(&format!("failed to read {name}: {e}").into());
                    read_error.set(Some(format!("Failed to read file: {name}")));
                    return;
                }
            }
        }
        read_error.set(None);
        props.on_files.call(uploads);
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let message = read_error().or(props.error);
    let zone_class = match (dragging(), disabled) {
        (_, true) => "dropzone dropzone-disabled",
        (true, false) => "dropzone dropzone-active",
        (false, false) => "dropzone",
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                if !disabled {
                    dragging.set(true);
                }
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            div { class: "dropzone-icon",
                Icon { width: 32, height: 32, icon: LdUpload }
            }
            p { class: "dropzone-title", "Drag & drop your SAR image here" }
            p { class: "dropzone-hint", "Supports TIFF, JPEG, and PNG formats" }

            label { class: "button button-outline",
                input {
                    r#type: "file",
                    accept: ACCEPT_ATTRIBUTE,
                    class: "hidden",
                    disabled,
                    onchange: handle_files,
                }
                "Browse Files"
            }

            if let Some(ref err) = message {
                p { class: "dropzone-error", role: "alert", "{err}" }
            }

            p { class: "dropzone-hint", "Maximum file size: 16MB" }
        }
    }
}
