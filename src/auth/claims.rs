//! Bearer credential decoding and validity queries.
//!
//! The credential is a three-segment, period-separated token whose middle
//! segment carries a JSON claims object. This module only validates it
//! structurally (segment count) and semantically (expiry claim present and
//! decodable); no cryptographic verification. Every validity query is
//! recomputed from the current wall-clock time; nothing is cached, since a
//! stale answer would create a false sense of validity.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Claims decoded from a credential's payload segment.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Expiry timestamp, seconds since epoch.
    pub exp: f64,
    /// Issued-at timestamp.
    pub iat: Option<f64>,
    /// Subject, usually the user id.
    pub sub: Option<String>,
    pub username: Option<String>,
}

/// Decode the claims object out of a bearer credential.
///
/// Splits on `.` and requires exactly three segments; the payload segment is
/// padded with `=` to a multiple of four, translated from the URL-safe
/// alphabet (`-`→`+`, `_`→`/`) to the standard one, base64-decoded, then
/// JSON-decoded. Any failing step is logged and surfaced as `None`.
pub fn decode(credential: &str) -> Option<Claims> {
    let segments: Vec<&str> = credential.split('.').collect();
    if segments.len() != 3 {
        warn!(segments = segments.len(), "malformed credential: wrong segment count");
        return None;
    }

    let mut payload = segments[1].replace('-', "+").replace('_', "/");
    let remainder = payload.len() % 4;
    if remainder > 0 {
        payload.push_str(&"=".repeat(4 - remainder));
    }

    let bytes = match STANDARD.decode(payload) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "credential payload is not valid base64");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            warn!(error = %e, "credential payload is not a valid claims object");
            None
        }
    }
}

/// Whether the credential is valid at the current time.
///
/// Undecodable credentials are invalid. Validity requires the expiry claim to
/// strictly exceed the current time.
pub fn is_valid(credential: &str) -> bool {
    is_valid_at(credential, now_secs())
}

/// Remaining validity in whole seconds, never negative. `None` when the
/// credential cannot be decoded.
pub fn remaining_seconds(credential: &str) -> Option<u64> {
    remaining_seconds_at(credential, now_secs())
}

/// Whether the credential expires within `within_minutes` (default callers
/// pass 30). An undecodable credential is treated as imminently expiring, a
/// deliberate fail-safe rather than an error.
pub fn is_expiring_soon(credential: &str, within_minutes: u64) -> bool {
    match remaining_seconds(credential) {
        Some(remaining) => remaining <= within_minutes * 60,
        None => true,
    }
}

pub(crate) fn is_valid_at(credential: &str, now: f64) -> bool {
    match decode(credential) {
        Some(claims) => claims.exp > now,
        None => false,
    }
}

pub(crate) fn remaining_seconds_at(credential: &str, now: f64) -> Option<u64> {
    let claims = decode(credential)?;
    let remaining = claims.exp - now;
    Some(if remaining > 0.0 { remaining as u64 } else { 0 })
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    fn token_expiring_at(exp: f64) -> String {
        token_with_payload(&format!(r#"{{"exp":{exp}}}"#))
    }

    #[test]
    fn decodes_full_claims() {
        let token = token_with_payload(
            r#"{"exp":4102444800,"iat":1700000000,"sub":"42","username":"ada"}"#,
        );
        let claims = decode(&token).unwrap();
        assert_eq!(claims.exp, 4102444800.0);
        assert_eq!(claims.iat, Some(1700000000.0));
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.username.as_deref(), Some("ada"));
    }

    #[test]
    fn two_segment_credential_fails_to_decode() {
        let body = URL_SAFE_NO_PAD.encode(br#"{"exp":4102444800}"#);
        let token = format!("header.{body}");
        assert!(decode(&token).is_none());
        assert!(!is_valid(&token));
    }

    #[test]
    fn payload_without_expiry_fails_to_decode() {
        let token = token_with_payload(r#"{"sub":"42"}"#);
        assert!(decode(&token).is_none());
    }

    #[test]
    fn url_safe_alphabet_and_padding_are_handled() {
        // Payload chosen so the base64url encoding contains '-' or '_' and
        // needs padding once translated.
        let token = token_with_payload(r#"{"exp":4102444800,"sub":"a/b+c?~~"}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("a/b+c?~~"));
    }

    #[test]
    fn validity_is_strict_comparison_against_now() {
        let token = token_expiring_at(1000.0);
        assert!(is_valid_at(&token, 999.0));
        assert!(!is_valid_at(&token, 1000.0));
        assert!(!is_valid_at(&token, 1001.0));
    }

    #[test]
    fn remaining_seconds_clamps_at_zero() {
        let token = token_expiring_at(1000.0);
        assert_eq!(remaining_seconds_at(&token, 400.0), Some(600));
        assert_eq!(remaining_seconds_at(&token, 1000.0), Some(0));
        assert_eq!(remaining_seconds_at(&token, 2000.0), Some(0));
        assert_eq!(remaining_seconds_at("garbage", 0.0), None);
    }

    #[test]
    fn expiring_soon_within_default_window() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs_f64();
        // 1500 s remaining is inside the 1800 s window.
        let soon = token_expiring_at(now + 1500.0);
        assert!(is_expiring_soon(&soon, 30));
        // Two hours out is not.
        let later = token_expiring_at(now + 7200.0);
        assert!(!is_expiring_soon(&later, 30));
        // Undecodable counts as imminently expiring.
        assert!(is_expiring_soon("not-a-token", 30));
    }
}
