//! sarscope-core: upload workflow and comparison logic (sans-IO).
//!
//! Holds the upload session state machine, the simulated progress
//! schedule, the comparison divider geometry, and the request/response
//! contracts of the conversion and gallery services.
//!
//! This crate has **no I/O dependencies** -- timers, fetches and DOM
//! access live in `sarscope-io`, which feeds their results into the
//! types defined here.

pub mod comparison;
pub mod config;
pub mod download;
pub mod gallery;
pub mod progress;
pub mod service;
pub mod session;
pub mod upload;

pub use comparison::{Axis, Bounds, ComparisonState, RevealStrategy};
pub use config::ServiceConfig;
pub use download::{DownloadRequest, ImageKind};
pub use gallery::{GalleryError, GalleryItem, GalleryListing, Timestamp};
pub use progress::ProgressSchedule;
pub use service::{ConvertError, ConvertedPair};
pub use session::{
    Phase, SessionId, Settled, Status, SubmitError, Tick, Ticket, Workflow, WorkflowError,
};
pub use upload::{UploadFile, ValidationError};
