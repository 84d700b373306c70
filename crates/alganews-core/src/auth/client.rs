//! Token endpoint client.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::logging::mask_secret;
use crate::sdk::{ApiError, ApiResult};

/// Path of the token endpoint on the auth server.
const TOKEN_PATH: &str = "/oauth/token";

/// Authorization code exchange request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeExchange {
    pub code: String,
    pub code_verifier: String,
    pub redirect_uri: String,
}

/// Token pair returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// OAuth2 token endpoint operations.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchanges an authorization code for the first token pair.
    fn exchange_code(
        &self,
        request: CodeExchange,
    ) -> impl Future<Output = ApiResult<TokenPair>> + Send;

    /// Obtains a new token pair from a refresh token.
    fn refresh(&self, refresh_token: String) -> impl Future<Output = ApiResult<TokenPair>> + Send;
}

/// reqwest-backed [`AuthApi`].
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
}

impl HttpAuthClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &AuthConfig) -> Self {
        Self {
            client,
            token_url: format!("{}{TOKEN_PATH}", config.server_url.trim_end_matches('/')),
            client_id: config.client_id.clone(),
        }
    }

    async fn request_tokens(&self, body: String) -> ApiResult<TokenPair> {
        debug!(url = %self.token_url, "requesting tokens");
        let response = self
            .client
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }

        let tokens: TokenPair = response.json().await?;
        debug!(access_token = %mask_secret(&tokens.access_token), "tokens issued");
        Ok(tokens)
    }
}

impl AuthApi for HttpAuthClient {
    async fn exchange_code(&self, request: CodeExchange) -> ApiResult<TokenPair> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("client_id", &self.client_id)
            .append_pair("code", &request.code)
            .append_pair("code_verifier", &request.code_verifier)
            .append_pair("redirect_uri", &request.redirect_uri)
            .finish();

        let tokens = self.request_tokens(body).await?;
        info!("authorization code exchanged");
        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: String) -> ApiResult<TokenPair> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("client_id", &self.client_id)
            .append_pair("refresh_token", &refresh_token)
            .finish();

        let tokens = self.request_tokens(body).await?;
        info!("access token refreshed");
        Ok(tokens)
    }
}
