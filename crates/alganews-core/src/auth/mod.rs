//! OAuth2 Authorization Code + PKCE support.
//!
//! - `pkce.rs`: verifier/challenge generation and login URL building
//! - `token.rs`: access token decoding (user id claim, expiry)
//! - `store.rs`: persisted tokens and PKCE verifier
//! - `client.rs`: token endpoint calls (code exchange, refresh)

pub mod client;
pub mod pkce;
pub mod store;
pub mod token;

pub use client::{AuthApi, CodeExchange, HttpAuthClient, TokenPair};
pub use pkce::{Pkce, build_login_url, generate_pkce, generate_state};
pub use store::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};
pub use token::{AccessTokenClaims, TokenError, USER_ID_CLAIM, decode_access_token};
