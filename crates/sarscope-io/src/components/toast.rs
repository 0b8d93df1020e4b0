//! Transient notifications shown in a corner of the page.
//!
//! A single [`Toaster`] is provided through context by the app root.
//! Any component can show a [`Notice`]; the [`Toast`] component renders
//! the latest one and dismisses it after [`TOAST_DURATION_MS`].

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use gloo_timers::future::TimeoutFuture;

/// How long a notice stays on screen.
pub const TOAST_DURATION_MS: u32 = 4_000;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An action finished as asked.
    Success,
    /// An action failed; announced assertively to screen readers.
    Error,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Increments with every shown notice so a newer one restarts the
    /// dismissal timer.
    id: u64,
    /// Tone, which picks the colour and the ARIA role.
    pub kind: NoticeKind,
    /// Short bold heading.
    pub title: String,
    /// Detail line under the title; hidden when empty.
    pub description: String,
}

/// Shared handle for showing notices.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    current: Signal<Option<Notice>>,
    next_id: Signal<u64>,
}

impl Toaster {
    /// Show a success notice.
    pub fn success(mut self, title: impl Into<String>, description: impl Into<String>) {
        self.show(NoticeKind::Success, title.into(), description.into());
    }

    /// Show an error notice.
    pub fn error(mut self, title: impl Into<String>, description: impl Into<String>) {
        self.show(NoticeKind::Error, title.into(), description.into());
    }

    /// Remove the current notice, if any.
    pub fn dismiss(mut self) {
        self.current.set(None);
    }

    /// The notice currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        (self.current)()
    }

    fn show(&mut self, kind: NoticeKind, title: String, description: String) {
        let id = (self.next_id)().wrapping_add(1);
        self.next_id.set(id);
        self.current.set(Some(Notice {
            id,
            kind,
            title,
            description,
        }));
    }
}

/// Create the app-wide [`Toaster`] and provide it to descendants.
pub fn use_toaster_provider() -> Toaster {
    let current = use_signal(|| None);
    let next_id = use_signal(|| 0);
    use_context_provider(|| Toaster { current, next_id })
}

/// The [`Toaster`] provided by an ancestor.
pub fn use_toaster() -> Toaster {
    use_context()
}

/// Renders the current notice and dismisses it after a delay.
#[component]
pub fn Toast() -> Element {
    let toaster = use_toaster();
    let notice = toaster.current();

    // Restart the dismissal timer whenever a new notice appears; an
    // older timer finding a different id leaves the newer notice alone.
    use_effect(move || {
        let Some(id) = toaster.current().map(|n| n.id) else {
            return;
        };
        spawn(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            let still_shown = toaster.current.peek().as_ref().is_some_and(|n| n.id == id);
            if still_shown {
                toaster.dismiss();
            }
        });
    });

    let Some(notice) = notice else {
        return rsx! {};
    };

    let tone = match notice.kind {
        NoticeKind::Success => "toast toast-success",
        NoticeKind::Error => "toast toast-error",
    };
    let role = match notice.kind {
        NoticeKind::Success => "status",
        NoticeKind::Error => "alert",
    };

    rsx! {
        div { class: "{tone}", role: "{role}",
            div { class: "toast-body",
                p { class: "toast-title", "{notice.title}" }
                if !notice.description.is_empty() {
                    p { class: "toast-description", "{notice.description}" }
                }
            }
            button {
                class: "toast-close",
                aria_label: "Dismiss notification",
                onclick: move |_| toaster.dismiss(),
                Icon { width: 16, height: 16, icon: LdX }
            }
        }
    }
}
