//! Admin runtime: owns the store and executes effects.
//!
//! This is the side-effect boundary. The reducer stays pure and returns
//! effects; this module spawns them on tokio and feeds their result events
//! back through the store.
//!
//! ## Inbox Pattern
//!
//! - Spawned handlers send their `UiEvent` to `inbox_tx`
//! - A handler that panics reports `None` so it still counts as done
//! - `settle()` drains `inbox_rx` until no spawned work remains
//! - Each drained event goes through middleware and the reducer again
//!
//! Structure:
//! - `mod.rs`: `AdminRuntime`, effect dispatch, login redirect
//! - `handlers.rs`: async SDK and token endpoint calls

mod handlers;

use std::future::Future;
use std::sync::Arc;

use alganews_core::auth::{
    AuthApi, CodeExchange, TokenStore, build_login_url, generate_pkce, generate_state,
};
use alganews_core::config::AuthConfig;
use alganews_core::sdk::AlgaNewsApi;
use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::effects::UiEffect;
use crate::events::{AuthEvent, UiEvent};
use crate::state::AdminState;
use crate::store::Store;

/// `None` marks a handler that died without producing an event.
type UiEventSender = mpsc::UnboundedSender<Option<UiEvent>>;
type UiEventReceiver = mpsc::UnboundedReceiver<Option<UiEvent>>;

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub auth: AuthConfig,
    /// Open the login screen in the default browser when redirecting.
    pub open_browser: bool,
}

pub struct AdminRuntime<A, O> {
    pub store: Store,
    api: Arc<A>,
    auth: Arc<O>,
    tokens: Arc<dyn TokenStore>,
    options: RuntimeOptions,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Spawned effects that have not reported back yet.
    pending: usize,
}

impl<A: AlgaNewsApi, O: AuthApi> AdminRuntime<A, O> {
    pub fn new(
        store: Store,
        api: Arc<A>,
        auth: Arc<O>,
        tokens: Arc<dyn TokenStore>,
        options: RuntimeOptions,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            store,
            api,
            auth,
            tokens,
            options,
            inbox_tx,
            inbox_rx,
            pending: 0,
        }
    }

    pub fn state(&self) -> &AdminState {
        &self.store.state
    }

    pub fn state_mut(&mut self) -> &mut AdminState {
        &mut self.store.state
    }

    /// Runs the auth bootstrap for `location` (URL or path).
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read.
    pub fn bootstrap(&mut self, location: &str) -> Result<()> {
        let session = self
            .tokens
            .load()
            .context("Failed to read the stored session")?;
        self.dispatch(UiEvent::Bootstrap {
            location: location.to_string(),
            session,
            now: chrono::Utc::now().timestamp(),
        });
        Ok(())
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = self.store.dispatch(event);
        self.execute_effects(effects);
    }

    /// Processes result events until every spawned effect has reported back.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            let Some(outcome) = self.inbox_rx.recv().await else {
                break;
            };
            self.pending -= 1;
            if let Some(event) = outcome {
                self.dispatch(event);
            }
        }
    }

    /// Starts a fresh login regardless of the stored session.
    pub fn login(&mut self) {
        self.execute_effect(UiEffect::RedirectToLogin);
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its event to the inbox when done.
    fn spawn_effect<Fut>(&mut self, handler: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.inbox_tx.clone();
        let handle = tokio::spawn(handler);
        tokio::spawn(async move {
            let outcome = match handle.await {
                Ok(event) => Some(event),
                Err(err) => {
                    warn!(error = %err, "effect handler failed");
                    None
                }
            };
            if tx.send(outcome).is_err() {
                debug!("runtime dropped, discarding effect result");
            }
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Api(call) => {
                let api = Arc::clone(&self.api);
                self.spawn_effect(async move { handlers::call_api(api.as_ref(), call).await });
            }
            UiEffect::ExchangeCode { code, verifier } => {
                let request = CodeExchange {
                    code,
                    code_verifier: verifier,
                    redirect_uri: self.options.auth.redirect_uri.clone(),
                };
                let auth = Arc::clone(&self.auth);
                self.spawn_effect(async move { handlers::exchange_code(auth.as_ref(), request).await });
            }
            UiEffect::RefreshToken { refresh_token } => {
                let auth = Arc::clone(&self.auth);
                self.spawn_effect(async move {
                    handlers::refresh_token(auth.as_ref(), refresh_token).await
                });
            }
            UiEffect::PersistTokens {
                access_token,
                refresh_token,
            } => {
                if let Err(err) = self.tokens.set_tokens(&access_token, &refresh_token) {
                    warn!(error = %format!("{err:#}"), "failed to persist tokens");
                }
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.tokens.clear() {
                    warn!(error = %format!("{err:#}"), "failed to clear the session");
                }
            }
            UiEffect::RedirectToLogin => self.redirect_to_login(),
            UiEffect::Debounce { delay, event } => {
                debug!(delay_ms = delay.as_millis(), "debounce scheduled");
                self.spawn_effect(async move {
                    tokio::time::sleep(delay).await;
                    *event
                });
            }
        }
    }

    fn redirect_to_login(&mut self) {
        let pkce = generate_pkce();
        let state = generate_state();
        if let Err(err) = self.tokens.begin_login(&pkce.verifier, &state) {
            warn!(error = %format!("{err:#}"), "failed to store the pending login");
        }
        let url = build_login_url(&self.options.auth, &pkce, &state);
        info!("redirecting to the login screen");

        if self.options.open_browser
            && let Err(err) = open::that(&url)
        {
            warn!(error = %err, "could not open the browser");
        }
        self.dispatch(UiEvent::Auth(AuthEvent::LoginRedirected { url }));
    }
}

#[cfg(test)]
mod tests;
