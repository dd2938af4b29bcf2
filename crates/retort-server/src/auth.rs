use http::HeaderMap;
use retort_core::ErrorResult;
use secrecy::{ExposeSecret, SecretString};

/// Header carrying the key for destructive endpoints
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check the `x-api-key` header against the configured key
///
/// Returns the failure, if any: `None` means the request may proceed. No key
/// configured lets every request through.
pub fn require_api_key<P>(expected: Option<&SecretString>, headers: &HeaderMap) -> Option<ErrorResult<P>> {
    let expected = expected?;

    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

    if provided == Some(expected.expose_secret()) {
        None
    } else {
        tracing::debug!(has_key = provided.is_some(), "rejected api key");
        Some(ErrorResult::unauthorized())
    }
}
