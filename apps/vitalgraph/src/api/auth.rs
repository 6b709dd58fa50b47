//! # Authentication Shims
//!
//! Real session handling lives in a fronting layer; this server only
//! consumes what that layer installs:
//! - `X-User-Id`: the authenticated caller, required wherever per-user
//!   data is touched
//! - `VITALGRAPH_ADMIN_KEY`: if set, developer routes require it as a
//!   bearer token (constant-time compare)

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

/// Header carrying the authenticated caller id.
pub const USER_ID_HEADER: &str = "x-user-id";

// =============================================================================
// CALLER IDENTITY
// =============================================================================

/// The caller id installed by the fronting auth layer, if any.
#[must_use]
pub fn caller_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// ADMIN KEY
// =============================================================================

/// Admin key from the environment.
///
/// Returns `Some(key)` if `VITALGRAPH_ADMIN_KEY` is set and non-empty,
/// `None` otherwise (leaving developer routes open).
pub fn get_admin_key_from_env() -> Option<String> {
    std::env::var("VITALGRAPH_ADMIN_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Middleware guarding the developer routes.
///
/// With `VITALGRAPH_ADMIN_KEY` unset all requests pass; otherwise the
/// request must carry `Authorization: Bearer <key>` (or the raw key).
pub async fn admin_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(expected) = get_admin_key_from_env() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

    match provided {
        Some(key) if constant_time_matches(key.as_bytes(), expected.as_bytes()) => {
            Ok(next.run(request).await)
        }
        Some(_) => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_admin_key",
                "developer route rejected: invalid admin key"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "developer route rejected: missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

/// Constant-time equality over possibly different-length keys.
///
/// Both sides are padded to a common length so `ct_eq` always touches the
/// same number of bytes regardless of where a mismatch sits.
fn constant_time_matches(provided: &[u8], expected: &[u8]) -> bool {
    let max_len = provided.len().max(expected.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided.len()].copy_from_slice(provided);
    padded_expected[..expected.len()].copy_from_slice(expected);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided.len() == expected.len()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn caller_id_requires_a_non_empty_header() {
        let mut headers = HeaderMap::new();
        assert!(caller_id(&headers).is_none());
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(caller_id(&headers).is_none());
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-1"));
        assert_eq!(caller_id(&headers).as_deref(), Some("user-1"));
    }

    #[test]
    fn key_comparison_rejects_length_and_content_mismatch() {
        assert!(constant_time_matches(b"secret", b"secret"));
        assert!(!constant_time_matches(b"secret", b"secret2"));
        assert!(!constant_time_matches(b"Secret", b"secret"));
        assert!(!constant_time_matches(b"", b"secret"));
    }
}
