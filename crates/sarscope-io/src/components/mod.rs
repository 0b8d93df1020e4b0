//! Dioxus UI components for sarscope.
//!
//! Provides the image dropzone, the before/after comparison control,
//! the convert view, the gallery browser and toast notifications.

mod comparison;
mod convert;
mod dropzone;
mod gallery;
mod toast;

pub use comparison::ImageComparison;
pub use convert::ConvertPanel;
pub use dropzone::Dropzone;
pub use gallery::GalleryBrowser;
pub use toast::{
    Notice, NoticeKind, TOAST_DURATION_MS, Toast, Toaster, use_toaster, use_toaster_provider,
};
