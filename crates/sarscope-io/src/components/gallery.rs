//! Gallery of previously converted images.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCalendar, LdClock, LdDownload, LdImage, LdMapPin, LdX};
use sarscope_core::{DownloadRequest, GalleryError, GalleryItem, GalleryListing, ImageKind};

use super::{ImageComparison, use_toaster};
use crate::client::{ConversionClient, local_timestamp};
use crate::download;

/// Which rendering of the selected item the detail panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Processed,
    Original,
    Compare,
}

impl DetailTab {
    const ALL: [Self; 3] = [Self::Processed, Self::Original, Self::Compare];

    const fn label(self) -> &'static str {
        match self {
            Self::Processed => "RGB Image",
            Self::Original => "Original SAR",
            Self::Compare => "Compare",
        }
    }
}

/// Props for the [`GalleryBrowser`] component.
#[derive(Props, Clone, PartialEq)]
pub struct GalleryBrowserProps {
    /// Switch to the convert view, offered when the gallery is empty.
    on_convert: EventHandler<()>,
}

/// Lists every conversion the service has stored.
///
/// Fetches on mount; a failed fetch can be retried. Selecting an item
/// opens a detail panel with both images, a comparison and downloads.
#[component]
pub fn GalleryBrowser(props: GalleryBrowserProps) -> Element {
    let client: ConversionClient = use_context();
    let mut selected = use_signal(|| Option::<GalleryItem>::None);

    let mut listing = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.gallery(&local_timestamp()).await;
            if let Err(ref e) = result {
                let detail = match e {
                    GalleryError::Service { status } => format!("status {status}"),
                    GalleryError::Transport { detail }
                    | GalleryError::MalformedResponse(detail) => detail.clone(),
                };
                web_sys::console::error_1(&format!("gallery fetch failed: {e} ({detail})").into());
            }
            result
        }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! {
            div { class: "status-panel",
                div { class: "spinner" }
                p { "Loading gallery..." }
            }
        },
        Some(Err(e)) => rsx! {
            div { class: "card status-panel",
                div { class: "status-icon status-icon-error",
                    Icon { width: 32, height: 32, icon: LdX }
                }
                h3 { "Error Loading Gallery" }
                p { class: "muted", "{e}" }
                button { class: "button", onclick: move |_| listing.restart(), "Try Again" }
            }
        },
        Some(Ok(GalleryListing::Empty)) => rsx! {
            div { class: "card status-panel",
                div { class: "status-icon",
                    Icon { width: 32, height: 32, icon: LdImage }
                }
                h3 { "No images yet" }
                p { class: "muted", "Start converting SAR images to see them in your gallery" }
                button {
                    class: "button",
                    onclick: move |_| props.on_convert.call(()),
                    "Convert Images"
                }
            }
        },
        Some(Ok(GalleryListing::Items(items))) => rsx! {
            div { class: "gallery-grid",
                for item in items.iter().cloned() {
                    GalleryCard {
                        key: "{item.id}",
                        item: item.clone(),
                        on_select: move |item: GalleryItem| selected.set(Some(item)),
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "page-heading",
            h1 { "Image Gallery" }
            p { class: "muted", "Browse your converted SAR to RGB images" }
        }
        {body}
        if let Some(item) = selected() {
            GalleryDetail {
                key: "{item.id}",
                item: item.clone(),
                on_close: move |()| selected.set(None),
            }
        }
    }
}

#[component]
fn GalleryCard(item: GalleryItem, on_select: EventHandler<GalleryItem>) -> Element {
    let thumbnail = item.image(ImageKind::Processed).to_owned();
    let chosen = item.clone();
    rsx! {
        button {
            class: "card gallery-card",
            onclick: move |_| on_select.call(chosen.clone()),
            img { class: "gallery-thumbnail", src: "{thumbnail}", alt: "{item.title}" }
            div { class: "gallery-card-body",
                h3 { "{item.title}" }
                p { class: "meta",
                    Icon { width: 14, height: 14, icon: LdCalendar }
                    span { "{item.date}" }
                }
                p { class: "meta",
                    Icon { width: 14, height: 14, icon: LdClock }
                    span { "{item.time}" }
                }
            }
        }
    }
}

#[component]
fn GalleryDetail(item: GalleryItem, on_close: EventHandler<()>) -> Element {
    let mut tab = use_signal(|| DetailTab::Processed);
    let toaster = use_toaster();

    let save = move |request: DownloadRequest| {
        if let Err(e) = download::save(&request) {
            web_sys::console::error_1(&format!("download failed: {e}").into());
            toaster.error("Download failed", format!("Could not save {}", request.filename));
        }
    };
    let original = item.download(ImageKind::Original);
    let processed = item.download(ImageKind::Processed);

    let view = match tab() {
        DetailTab::Processed => rsx! {
            img {
                class: "detail-image",
                src: "{item.processed_ref}",
                alt: "{item.title} (RGB)",
            }
        },
        DetailTab::Original => rsx! {
            img {
                class: "detail-image",
                src: "{item.original_ref}",
                alt: "{item.title} (SAR)",
            }
        },
        DetailTab::Compare => rsx! {
            ImageComparison {
                before: item.original_ref.clone(),
                after: item.processed_ref.clone(),
            }
        },
    };

    rsx! {
        div { class: "dialog-backdrop", onclick: move |_| on_close.call(()),
            div {
                class: "dialog",
                role: "dialog",
                aria_modal: "true",
                aria_label: "{item.title}",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "dialog-header",
                    h2 { "{item.title}" }
                    button {
                        class: "button-icon",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        Icon { width: 16, height: 16, icon: LdX }
                    }
                }

                div { class: "tabs", role: "tablist",
                    for candidate in DetailTab::ALL {
                        button {
                            class: if tab() == candidate { "tab tab-active" } else { "tab" },
                            role: "tab",
                            aria_selected: "{tab() == candidate}",
                            onclick: move |_| tab.set(candidate),
                            "{candidate.label()}"
                        }
                    }
                }

                div { class: "dialog-body", {view} }

                div { class: "dialog-footer",
                    div { class: "detail-meta",
                        p { class: "meta",
                            Icon { width: 16, height: 16, icon: LdCalendar }
                            span { "Processed on: {item.date}" }
                        }
                        p { class: "meta",
                            Icon { width: 16, height: 16, icon: LdClock }
                            span { "Time: {item.time}" }
                        }
                        p { class: "meta",
                            Icon { width: 16, height: 16, icon: LdMapPin }
                            span { "Location: {item.location}" }
                        }
                    }
                    div { class: "result-actions",
                        button {
                            class: "button button-outline",
                            onclick: move |_| save(original.clone()),
                            Icon { width: 16, height: 16, icon: LdDownload }
                            "Download Original"
                        }
                        button {
                            class: "button",
                            onclick: move |_| save(processed.clone()),
                            Icon { width: 16, height: 16, icon: LdDownload }
                            "Download RGB"
                        }
                    }
                }
            }
        }
    }
}
