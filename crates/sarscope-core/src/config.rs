//! Service location and upload limits.

use serde::{Deserialize, Serialize};

/// Base URL used when no service address is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Largest upload accepted before submission (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Path of the conversion endpoint, relative to the base URL.
pub const PROCESS_PATH: &str = "/process";

/// Path of the gallery listing endpoint, relative to the base URL.
pub const GALLERY_PATH: &str = "/api/gallery";

/// Path of the health-check endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/health";

/// Where the conversion service lives and how large an upload may be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Scheme, host and optional path prefix, without a trailing slash.
    pub base_url: String,

    /// Uploads larger than this are rejected before any network call.
    pub max_upload_bytes: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Build a config from an optional base URL setting.
    ///
    /// Whitespace and trailing slashes are trimmed. A missing or blank
    /// value falls back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_base_url(value: Option<&str>) -> Self {
        let base_url = value
            .map(|v| v.trim().trim_end_matches('/'))
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_owned();
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Turn a server-relative path into a full resource locator.
    ///
    /// Absolute locators (`http:`, `https:`, `blob:`, `data:`) are
    /// returned unchanged. Relative paths are joined to the base URL
    /// with exactly one separating slash.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        let path = path.trim();
        if is_absolute(path) {
            return path.to_owned();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    /// Full URL of the conversion endpoint.
    #[must_use]
    pub fn process_url(&self) -> String {
        self.resolve(PROCESS_PATH)
    }

    /// Full URL of the gallery listing endpoint.
    #[must_use]
    pub fn gallery_url(&self) -> String {
        self.resolve(GALLERY_PATH)
    }

    /// Full URL of the health-check endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        self.resolve(HEALTH_PATH)
    }
}

fn is_absolute(path: &str) -> bool {
    ["http://", "https://", "blob:", "data:"]
        .iter()
        .any(|scheme| {
            path.get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_base_url_uses_local_default() {
        assert_eq!(ServiceConfig::from_base_url(None).base_url, DEFAULT_API_URL);
        assert_eq!(
            ServiceConfig::from_base_url(Some("   ")).base_url,
            DEFAULT_API_URL
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ServiceConfig::from_base_url(Some(" https://sar.example.org/api// "));
        assert_eq!(config.base_url, "https://sar.example.org/api");
        assert_eq!(config.max_upload_bytes, MAX_UPLOAD_BYTES);
    }

    #[test]
    fn resolve_joins_with_single_slash() {
        let config = ServiceConfig::from_base_url(Some("http://host:5000/"));
        assert_eq!(
            config.resolve("/static/uploads/a.png"),
            "http://host:5000/static/uploads/a.png"
        );
        assert_eq!(
            config.resolve("static/uploads/a.png"),
            "http://host:5000/static/uploads/a.png"
        );
    }

    #[test]
    fn resolve_keeps_absolute_locators() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.resolve("https://cdn.example.org/b.png"),
            "https://cdn.example.org/b.png"
        );
        assert_eq!(config.resolve("blob:abc-123"), "blob:abc-123");
        assert_eq!(config.resolve("HTTP://UPPER/x"), "HTTP://UPPER/x");
    }

    #[test]
    fn endpoint_urls() {
        let config = ServiceConfig::default();
        assert_eq!(config.process_url(), "http://localhost:5000/process");
        assert_eq!(config.gallery_url(), "http://localhost:5000/api/gallery");
        assert_eq!(config.health_url(), "http://localhost:5000/health");
    }
}
