//! Conversion service contract.
//!
//! The service accepts one multipart field named [`UPLOAD_FIELD`] and
//! answers with JSON. Interpretation of status and body lives here so
//! it can be tested without a browser; the fetch itself lives in
//! `sarscope-io`.

use serde::Deserialize;

use crate::config::ServiceConfig;

/// Multipart field carrying the image bytes.
pub const UPLOAD_FIELD: &str = "file";

/// Message used when the service fails without saying why.
pub const GENERIC_FAILURE: &str = "Failed to process image";

/// Message used when the service cannot be reached at all.
pub const TRANSPORT_FAILURE: &str = "Could not reach the conversion service";

/// The pair of images produced by one conversion, as full locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPair {
    /// The stored copy of the uploaded image.
    pub original: String,
    /// The RGB image produced by the service.
    pub processed: String,
}

/// Why a conversion did not produce a [`ConvertedPair`].
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The service answered with a failure and a reason.
    #[error("{0}")]
    Service(String),

    /// The request never completed (network down, CORS, aborted).
    #[error("{}", TRANSPORT_FAILURE)]
    Transport {
        /// Browser-reported detail, for the console only.
        detail: String,
    },

    /// The service answered but the body was not usable.
    #[error("{}", GENERIC_FAILURE)]
    MalformedResponse(String),
}

/// Raw JSON body of a conversion response, success or failure.
#[derive(Debug, Default, Deserialize)]
struct ProcessBody {
    original: Option<String>,
    processed: Option<String>,
    error: Option<String>,
}

/// Map a conversion response to its outcome.
///
/// A success status needs both image paths; they are resolved against
/// the configured base URL. A failure status yields the body's `error`
/// string when present and non-blank, otherwise [`GENERIC_FAILURE`].
///
/// # Errors
///
/// Returns [`ConvertError::Service`] for non-2xx statuses and
/// [`ConvertError::MalformedResponse`] for unusable success bodies.
pub fn interpret_process_response(
    status: u16,
    body: &str,
    config: &ServiceConfig,
) -> Result<ConvertedPair, ConvertError> {
    if !is_success(status) {
        return Err(ConvertError::Service(failure_message(body)));
    }

    let parsed: ProcessBody = serde_json::from_str(body)
        .map_err(|e| ConvertError::MalformedResponse(format!("invalid JSON: {e}")))?;

    match (non_blank(parsed.original), non_blank(parsed.processed)) {
        (Some(original), Some(processed)) => Ok(ConvertedPair {
            original: config.resolve(&original),
            processed: config.resolve(&processed),
        }),
        _ => Err(ConvertError::MalformedResponse(
            "response is missing the original or processed path".into(),
        )),
    }
}

/// Extract the service's reason from a failure body.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<ProcessBody>(body)
        .ok()
        .and_then(|b| non_blank(b.error))
        .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}

/// Body of the health endpoint.
#[derive(Debug, Deserialize)]
struct HealthBody {
    status: Option<String>,
}

/// Whether a health response reports the service as up.
#[must_use]
pub fn interpret_health_response(status: u16, body: &str) -> bool {
    is_success(status)
        && serde_json::from_str::<HealthBody>(body)
            .ok()
            .and_then(|b| b.status)
            .is_some_and(|s| s.eq_ignore_ascii_case("healthy"))
}

pub(crate) const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn success_resolves_both_paths() {
        let config = ServiceConfig::default();
        let pair = interpret_process_response(
            200,
            r#"{"success": true, "original": "/files/a.png", "processed": "/files/b.png"}"#,
            &config,
        )
        .unwrap();
        assert_eq!(pair.original, "http://localhost:5000/files/a.png");
        assert_eq!(pair.processed, "http://localhost:5000/files/b.png");
    }

    #[test]
    fn service_error_message_is_verbatim() {
        let err = interpret_process_response(
            500,
            r#"{"error": "decoder failure"}"#,
            &ServiceConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConvertError::Service("decoder failure".into()));
        assert_eq!(err.to_string(), "decoder failure");
    }

    #[test]
    fn failure_without_reason_is_generic() {
        for body in ["{}", r#"{"error": "  "}"#, "<html>Bad Gateway</html>", ""] {
            let err = interpret_process_response(502, body, &ServiceConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), GENERIC_FAILURE, "body: {body:?}");
        }
    }

    #[test]
    fn success_missing_a_path_is_malformed() {
        let err = interpret_process_response(
            200,
            r#"{"original": "/files/a.png"}"#,
            &ServiceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedResponse(_)));
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn success_with_garbage_body_is_malformed() {
        let err = interpret_process_response(200, "not json", &ServiceConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedResponse(_)));
    }

    #[test]
    fn transport_error_has_non_empty_generic_message() {
        let err = ConvertError::Transport {
            detail: "TypeError: Failed to fetch".into(),
        };
        assert_eq!(err.to_string(), TRANSPORT_FAILURE);
        assert!(!err.to_string().contains("TypeError"));
    }

    #[test]
    fn health_requires_status_and_body() {
        assert!(interpret_health_response(200, r#"{"status": "healthy"}"#));
        assert!(!interpret_health_response(503, r#"{"status": "healthy"}"#));
        assert!(!interpret_health_response(200, r#"{"status": "degraded"}"#));
        assert!(!interpret_health_response(200, "ok"));
    }
}
