//! Access token decoding.
//!
//! The access token is a JWT whose payload carries the `alganews:user_id`
//! claim. Signatures are verified by the API, not here; decoding only checks
//! structure and expiry so a user identity is never derived from a malformed
//! or expired token.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// Custom claim holding the authenticated user's id.
pub const USER_ID_CLAIM: &str = "alganews:user_id";

/// Reasons an access token cannot yield an identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("access token is not a three-part JWT")]
    Malformed,
    #[error("access token payload is not valid base64url JSON")]
    InvalidPayload,
    #[error("access token has no `alganews:user_id` claim")]
    MissingUserId,
    #[error("access token expired at {0}")]
    Expired(i64),
}

/// Claims the admin reads from the access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub user_id: u64,
    /// Expiry in seconds since epoch, when present.
    pub expires_at: Option<i64>,
    pub subject: Option<String>,
}

/// Decodes an access token, rejecting it when expired at `now` (seconds).
///
/// # Errors
/// Returns a `TokenError` describing why no identity can be derived.
pub fn decode_access_token(token: &str, now: i64) -> Result<AccessTokenClaims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(TokenError::Malformed);
    }

    let decoded = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .ok()
        .ok_or(TokenError::InvalidPayload)?;
    let json: Value = serde_json::from_slice(&decoded)
        .ok()
        .ok_or(TokenError::InvalidPayload)?;
    if !json.is_object() {
        return Err(TokenError::InvalidPayload);
    }

    let user_id = json
        .get(USER_ID_CLAIM)
        .and_then(claim_as_u64)
        .ok_or(TokenError::MissingUserId)?;

    let expires_at = json.get("exp").and_then(numeric_date);
    if let Some(exp) = expires_at
        && exp <= now
    {
        return Err(TokenError::Expired(exp));
    }

    Ok(AccessTokenClaims {
        user_id,
        expires_at,
        subject: json
            .get("sub")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    })
}

/// NumericDate seconds; fractional values are truncated.
fn numeric_date(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs.trunc() as i64))
}

fn claim_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Builds an unsigned token with the given payload (tests and fixtures).
pub fn encode_unsigned(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.sig")
}
