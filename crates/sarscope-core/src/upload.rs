//! Selected files and the checks they pass before submission.

use std::fmt;
use std::sync::Arc;

/// Allowed file extensions for SAR image uploads.
///
/// This is a hint based on the name only; the bytes are never decoded
/// on the client.
pub const ALLOWED_EXTENSIONS: &[&str] = &["tif", "tiff", "jpg", "jpeg", "png"];

/// Value for the `accept` attribute of the file picker.
pub const ACCEPT_ATTRIBUTE: &str = ".tif,.tiff,.jpg,.jpeg,.png";

/// Check whether a filename has an allowed image extension.
#[must_use]
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// MIME type announced for the upload, from the extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
#[must_use]
pub fn mime_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "tif" | "tiff" => "image/tiff",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// A user-selected image file held in memory.
///
/// The bytes are shared so the file can be handed to the network layer
/// while the session keeps its own handle for display.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl UploadFile {
    /// Wrap a filename and its contents.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// The filename as reported by the browser.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size in mebibytes with two decimals, e.g. `"2.00 MB"`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // display only
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }
}

// Manual impl so logs never dump megabytes of pixel data.
impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

/// Reasons a selection is refused before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The selection was empty.
    #[error("no file selected")]
    NoFile,

    /// More than one file was dropped or picked.
    #[error("only one image can be converted at a time ({0} selected)")]
    TooManyFiles(usize),

    /// The extension is not one of [`ALLOWED_EXTENSIONS`].
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The file has no content.
    #[error("file is empty: {0}")]
    Empty(String),

    /// The file exceeds the configured upload limit.
    #[error("{name} is {size} bytes, the limit is {limit} bytes")]
    TooLarge {
        /// Offending filename.
        name: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured maximum in bytes.
        limit: u64,
    },
}

/// Accept exactly one allowed, non-empty image no larger than `max_bytes`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies, checking count,
/// then type, then emptiness, then size.
pub fn validate_selection(
    mut files: Vec<UploadFile>,
    max_bytes: u64,
) -> Result<UploadFile, ValidationError> {
    if files.len() > 1 {
        return Err(ValidationError::TooManyFiles(files.len()));
    }
    let file = files.pop().ok_or(ValidationError::NoFile)?;
    validate_file(&file, max_bytes)?;
    Ok(file)
}

/// Apply the selection rules to names and sizes alone.
///
/// Lets the browser refuse a selection before any file is read into
/// memory. A listing that passes still goes through
/// [`validate_selection`] once the bytes are in.
///
/// # Errors
///
/// Same rules and order as [`validate_selection`].
pub fn validate_listing(files: &[(String, u64)], max_bytes: u64) -> Result<(), ValidationError> {
    match files {
        [] => Err(ValidationError::NoFile),
        [(name, size)] => validate_metadata(name, *size, max_bytes),
        _ => Err(ValidationError::TooManyFiles(files.len())),
    }
}

/// Check a single file against the type, emptiness and size rules.
///
/// # Errors
///
/// See [`validate_selection`].
pub fn validate_file(file: &UploadFile, max_bytes: u64) -> Result<(), ValidationError> {
    validate_metadata(file.name(), file.size(), max_bytes)
}

fn validate_metadata(name: &str, size: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if !has_allowed_extension(name) {
        return Err(ValidationError::UnsupportedType(name.to_owned()));
    }
    if size == 0 {
        return Err(ValidationError::Empty(name.to_owned()));
    }
    if size > max_bytes {
        return Err(ValidationError::TooLarge {
            name: name.to_owned(),
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MAX_UPLOAD_BYTES;

    fn file(name: &str, len: usize) -> UploadFile {
        UploadFile::new(name, vec![0u8; len])
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(has_allowed_extension("scene.tif"));
        assert!(has_allowed_extension("SCENE.TIFF"));
        assert!(has_allowed_extension("a.b.JpEg"));
        assert!(!has_allowed_extension("scene.bmp"));
        assert!(!has_allowed_extension("no_extension"));
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_type_for("scene.TIF"), "image/tiff");
        assert_eq!(mime_type_for("scene.jpeg"), "image/jpeg");
        assert_eq!(mime_type_for("scene.png"), "image/png");
        assert_eq!(mime_type_for("scene"), "application/octet-stream");
    }

    #[test]
    fn accepts_single_valid_file() {
        let picked = validate_selection(vec![file("scene.png", 10)], MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(picked.name(), "scene.png");
        assert_eq!(picked.size(), 10);
    }

    #[test]
    fn rejects_empty_and_multiple_selections() {
        assert_eq!(
            validate_selection(Vec::new(), MAX_UPLOAD_BYTES),
            Err(ValidationError::NoFile)
        );
        assert_eq!(
            validate_selection(vec![file("a.png", 1), file("b.png", 1)], MAX_UPLOAD_BYTES),
            Err(ValidationError::TooManyFiles(2))
        );
    }

    #[test]
    fn rejects_wrong_type_before_size() {
        let err = validate_selection(vec![file("notes.txt", 0)], MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedType("notes.txt".into()));
    }

    #[test]
    fn rejects_zero_byte_file() {
        let err = validate_selection(vec![file("scene.tif", 0)], MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err, ValidationError::Empty("scene.tif".into()));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_file(&file("edge.png", 64), 64).is_ok());
        assert_eq!(
            validate_file(&file("big.png", 65), 64),
            Err(ValidationError::TooLarge {
                name: "big.png".into(),
                size: 65,
                limit: 64,
            })
        );
    }

    #[test]
    fn listing_refuses_oversized_file_from_its_reported_size() {
        let listing = [("huge.tif".to_owned(), MAX_UPLOAD_BYTES + 1)];
        assert_eq!(
            validate_listing(&listing, MAX_UPLOAD_BYTES),
            Err(ValidationError::TooLarge {
                name: "huge.tif".into(),
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES,
            })
        );
    }

    #[test]
    fn listing_applies_count_and_type_rules() {
        assert_eq!(
            validate_listing(&[], MAX_UPLOAD_BYTES),
            Err(ValidationError::NoFile)
        );
        let two = [("a.png".to_owned(), 1), ("b.png".to_owned(), 1)];
        assert_eq!(
            validate_listing(&two, MAX_UPLOAD_BYTES),
            Err(ValidationError::TooManyFiles(2))
        );
        let text = [("notes.txt".to_owned(), MAX_UPLOAD_BYTES * 4)];
        assert_eq!(
            validate_listing(&text, MAX_UPLOAD_BYTES),
            Err(ValidationError::UnsupportedType("notes.txt".into()))
        );
        let empty = [("scene.tif".to_owned(), 0)];
        assert_eq!(
            validate_listing(&empty, MAX_UPLOAD_BYTES),
            Err(ValidationError::Empty("scene.tif".into()))
        );
    }

    #[test]
    fn listing_agrees_with_full_validation() {
        let listing = [("scene.png".to_owned(), 64)];
        assert!(validate_listing(&listing, 64).is_ok());
        assert!(validate_selection(vec![file("scene.png", 64)], 64).is_ok());
    }

    #[test]
    fn size_label_has_two_decimals() {
        assert_eq!(file("a.png", 2 * 1024 * 1024).size_label(), "2.00 MB");
        assert_eq!(file("a.png", 512 * 1024).size_label(), "0.50 MB");
    }

    #[test]
    fn debug_output_omits_bytes() {
        let rendered = format!("{:?}", file("scene.tif", 3));
        assert_eq!(rendered, r#"UploadFile { name: "scene.tif", size: 3 }"#);
    }
}
