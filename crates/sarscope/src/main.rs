use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdMenu, LdX};
use sarscope_core::ServiceConfig;
use sarscope_io::components::use_toaster_provider;
use sarscope_io::{ConversionClient, ConvertPanel, GalleryBrowser, Toast, WindowListener};

/// Scroll distance after which the header switches to its raised style.
const SCROLLED_THRESHOLD_PX: f64 = 10.0;

fn main() {
    dioxus::launch(app);
}

/// Top-level views reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Convert,
    Gallery,
}

impl View {
    const ALL: [Self; 2] = [Self::Convert, Self::Gallery];

    const fn label(self) -> &'static str {
        match self {
            Self::Convert => "Convert",
            Self::Gallery => "Gallery",
        }
    }
}

/// Whether the conversion service answered its health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Health {
    Checking,
    Online,
    Offline,
}

/// Root application component.
///
/// Provides the service client and the toaster to every view, and
/// renders the navigation shell. The convert view stays mounted while
/// the gallery is shown so a running conversion is not lost.
fn app() -> Element {
    // --- Shared services ---
    // The service address is fixed at build time, e.g.
    // `SARSCOPE_API_URL=https://sar.example.org dx build`.
    let client = use_context_provider(|| {
        ConversionClient::new(ServiceConfig::from_base_url(option_env!("SARSCOPE_API_URL")))
    });
    use_toaster_provider();

    // --- Application state ---
    let mut view = use_signal(|| View::Convert);
    let mut menu_open = use_signal(|| false);
    let mut is_scrolled = use_signal(|| false);
    let mut health = use_signal(|| Health::Checking);

    // --- Scroll tracking ---
    // The listener is removed when the hook value drops with the app.
    use_hook(move || {
        let listener = WindowListener::new("scroll", move |_| {
            let scrolled = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .is_some_and(|y| y > SCROLLED_THRESHOLD_PX);
            if *is_scrolled.peek() != scrolled {
                is_scrolled.set(scrolled);
            }
        });
        match listener {
            Ok(listener) => Some(Rc::new(listener)),
            Err(e) => {
                web_sys::console::warn_1(&format!("scroll tracking disabled: {e}").into());
                None
            }
        }
    });

    // --- Service health ---
    let health_client = client.clone();
    use_hook(move || {
        let client = health_client.clone();
        spawn(async move {
            let online = client.is_healthy().await;
            if !online {
                web_sys::console::warn_1(
                    &format!("conversion service at {} is unreachable", client.config().base_url)
                        .into(),
                );
            }
            health.set(if online { Health::Online } else { Health::Offline });
        });
    });

    let header_class = if is_scrolled() {
        "site-header site-header-scrolled"
    } else {
        "site-header"
    };
    let (health_class, health_label) = match health() {
        Health::Checking => ("health health-checking", "Checking service..."),
        Health::Online => ("health health-online", "Service online"),
        Health::Offline => ("health health-offline", "Service offline"),
    };
    let current = view();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "app",
            header { class: "{header_class}",
                div { class: "container header-row",
                    div { class: "brand",
                        span { class: "brand-title", "ISRO SAR Converter" }
                        span { class: "brand-subtitle", "SAR to RGB image conversion" }
                    }

                    nav { class: if menu_open() { "nav nav-open" } else { "nav" },
                        for item in View::ALL {
                            button {
                                class: if item == current {
                                    "nav-link nav-link-active"
                                } else {
                                    "nav-link"
                                },
                                aria_current: if item == current { "page" } else { "false" },
                                onclick: move |_| {
                                    view.set(item);
                                    menu_open.set(false);
                                },
                                "{item.label()}"
                            }
                        }
                        span { class: "{health_class}", title: "{client.config().base_url}",
                            span { class: "health-dot" }
                            "{health_label}"
                        }
                    }

                    button {
                        class: "button-icon menu-toggle",
                        aria_label: "Toggle navigation",
                        aria_expanded: "{menu_open()}",
                        onclick: move |_| menu_open.set(!menu_open()),
                        if menu_open() {
                            Icon { width: 24, height: 24, icon: LdX }
                        } else {
                            Icon { width: 24, height: 24, icon: LdMenu }
                        }
                    }
                }
            }

            main { class: "container main",
                div { hidden: current != View::Convert,
                    div { class: "page-heading",
                        h1 { "Convert SAR to RGB" }
                        p { class: "muted",
                            "Upload a SAR image to convert it to an RGB image and compare the two side by side"
                        }
                    }
                    ConvertPanel {}
                }
                if current == View::Gallery {
                    GalleryBrowser { on_convert: move |()| view.set(View::Convert) }
                }
            }

            footer { class: "site-footer",
                div { class: "container", "ISRO SAR to RGB Converter" }
            }

            Toast {}
        }
    }
}
