//! Client-side save requests and the filenames they use.

/// Which image of a converted pair to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// The uploaded SAR image as stored by the service.
    Original,
    /// The RGB image produced by the service.
    Processed,
}

impl ImageKind {
    /// Prefix prepended to the source name when saving.
    #[must_use]
    pub const fn filename_prefix(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Processed => "rgb",
        }
    }
}

/// A resolved locator paired with the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Already-resolved resource locator.
    pub url: String,
    /// Name offered to the browser's save dialog.
    pub filename: String,
}

/// Derive the saved filename, e.g. `rgb_scene.tif`.
///
/// A blank `source_name` is replaced by `fallback`.
#[must_use]
pub fn download_filename(kind: ImageKind, source_name: &str, fallback: &str) -> String {
    let name = source_name.trim();
    let name = if name.is_empty() { fallback } else { name };
    format!("{}_{name}", kind.filename_prefix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_by_kind() {
        assert_eq!(
            download_filename(ImageKind::Processed, "scene.tif", "x.jpg"),
            "rgb_scene.tif"
        );
        assert_eq!(
            download_filename(ImageKind::Original, "scene.tif", "x.jpg"),
            "original_scene.tif"
        );
    }

    #[test]
    fn blank_name_uses_fallback() {
        assert_eq!(
            download_filename(ImageKind::Processed, " ", "converted_image.jpg"),
            "rgb_converted_image.jpg"
        );
    }
}
