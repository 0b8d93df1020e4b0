//! sarscope-io: Browser I/O and Dioxus component library.
//!
//! Talks to the conversion and gallery services over `fetch`, saves
//! result images, runs the progress timer and window listeners, and
//! provides the UI components of the sarscope web application.

pub mod client;
pub mod components;
pub mod controller;
pub mod download;
pub mod listener;
pub mod ticker;

pub use client::ConversionClient;
pub use components::{ConvertPanel, Dropzone, GalleryBrowser, ImageComparison, Toast, Toaster};
pub use controller::{Conversion, use_conversion};
pub use listener::WindowListener;
pub use ticker::ProgressTicker;
