//! Gallery listing contract and the fixed item shape the views render.
//!
//! The listing service returns loosely shaped entries. They are turned
//! into [`GalleryItem`]s here, with defaults for missing metadata and
//! entries lacking either image dropped.

use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::download::{DownloadRequest, ImageKind, download_filename};
use crate::service::{is_success, non_blank};

/// Location shown when the service does not report one.
pub const DEFAULT_LOCATION: &str = "ISRO, India";

/// Saved name used when a gallery item has no title.
pub const FALLBACK_DOWNLOAD_NAME: &str = "image.jpg";

/// Message for a listing the service refused.
pub const GALLERY_FAILURE: &str = "Failed to fetch gallery data";

/// Message for a listing that could not be fetched or read.
pub const GALLERY_UNAVAILABLE: &str = "Failed to load gallery";

/// Local date and time used to fill in missing timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// Display date, e.g. `2026-10-16`.
    pub date: String,
    /// Display time, e.g. `14:03:59`.
    pub time: String,
}

/// One converted pair as shown in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Stable key within one listing, `img-<index>`.
    pub id: String,
    /// Source filename or a numbered placeholder.
    pub title: String,
    /// Locator of the stored SAR image.
    pub original_ref: String,
    /// Locator of the RGB result.
    pub processed_ref: String,
    /// Processing date.
    pub date: String,
    /// Processing time.
    pub time: String,
    /// Where the image was processed.
    pub location: String,
}

impl GalleryItem {
    /// Locator of one of the two images.
    #[must_use]
    pub fn image(&self, kind: ImageKind) -> &str {
        match kind {
            ImageKind::Original => &self.original_ref,
            ImageKind::Processed => &self.processed_ref,
        }
    }

    /// Save request for one of the two images, e.g. `original_<title>`.
    #[must_use]
    pub fn download(&self, kind: ImageKind) -> DownloadRequest {
        DownloadRequest {
            url: self.image(kind).to_owned(),
            filename: download_filename(kind, &self.title, FALLBACK_DOWNLOAD_NAME),
        }
    }
}

/// A listing, with the empty case made explicit for the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryListing {
    /// The service has no conversions yet.
    Empty,
    /// At least one renderable item.
    Items(Vec<GalleryItem>),
}

impl GalleryListing {
    /// Wrap items, mapping an empty list to [`GalleryListing::Empty`].
    #[must_use]
    pub fn from_items(items: Vec<GalleryItem>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Items(items)
        }
    }
}

/// Why a listing could not be produced.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    /// The service answered with a non-success status.
    #[error("{}", GALLERY_FAILURE)]
    Service {
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed.
    #[error("{}", GALLERY_UNAVAILABLE)]
    Transport {
        /// Browser-reported detail, for the console only.
        detail: String,
    },

    /// The body could not be read as a listing.
    #[error("{}", GALLERY_UNAVAILABLE)]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct ListingBody {
    #[serde(default)]
    images: Vec<EntryBody>,
}

#[derive(Debug, Deserialize)]
struct EntryBody {
    filename: Option<String>,
    original: Option<String>,
    processed: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
}

/// Map a gallery response to a listing.
///
/// Missing titles become `SAR Image <n>`, missing dates and times
/// become `now`, missing locations become [`DEFAULT_LOCATION`]. Ids and
/// numbering follow the service's order, including dropped entries.
///
/// # Errors
///
/// [`GalleryError::Service`] for non-2xx statuses,
/// [`GalleryError::MalformedResponse`] for unreadable bodies.
pub fn interpret_gallery_response(
    status: u16,
    body: &str,
    config: &ServiceConfig,
    now: &Timestamp,
) -> Result<GalleryListing, GalleryError> {
    if !is_success(status) {
        return Err(GalleryError::Service { status });
    }
    let parsed: ListingBody = serde_json::from_str(body)
        .map_err(|e| GalleryError::MalformedResponse(e.to_string()))?;

    let items = parsed
        .images
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let original = non_blank(entry.original)?;
            let processed = non_blank(entry.processed)?;
            Some(GalleryItem {
                id: format!("img-{index}"),
                title: non_blank(entry.filename)
                    .unwrap_or_else(|| format!("SAR Image {}", index + 1)),
                original_ref: config.resolve(&original),
                processed_ref: config.resolve(&processed),
                date: non_blank(entry.date).unwrap_or_else(|| now.date.clone()),
                time: non_blank(entry.time).unwrap_or_else(|| now.time.clone()),
                location: non_blank(entry.location)
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_owned()),
            })
        })
        .collect();

    Ok(GalleryListing::from_items(items))
}
