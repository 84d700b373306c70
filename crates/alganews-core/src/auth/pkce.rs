//! PKCE helpers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use crate::config::AuthConfig;

/// Path of the authorization endpoint on the auth server.
const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// PKCE code verifier and challenge
#[derive(Debug, Clone)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

/// Generate PKCE code verifier and challenge
pub fn generate_pkce() -> Pkce {
    // Use two UUIDs (16 bytes each) to get 32 random bytes
    let uuid1 = uuid::Uuid::new_v4();
    let uuid2 = uuid::Uuid::new_v4();
    let mut verifier_bytes = [0u8; 32];
    verifier_bytes[..16].copy_from_slice(uuid1.as_bytes());
    verifier_bytes[16..].copy_from_slice(uuid2.as_bytes());
    let verifier = URL_SAFE_NO_PAD.encode(verifier_bytes);

    Pkce {
        challenge: challenge_for(&verifier),
        verifier,
    }
}

/// S256 challenge for a verifier.
pub fn challenge_for(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Random opaque `state` parameter.
pub fn generate_state() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Builds the login screen URL for the authorization server.
pub fn build_login_url(config: &AuthConfig, pkce: &Pkce, state: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs([
        ("response_type", "code"),
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("code_challenge", pkce.challenge.as_str()),
        ("code_challenge_method", "S256"),
        ("state", state),
    ]);
    if let Some(scope) = config.scope.as_deref() {
        serializer.append_pair("scope", scope);
    }
    let query = serializer.finish();

    format!(
        "{}{AUTHORIZE_PATH}?{query}",
        config.server_url.trim_end_matches('/')
    )
}
