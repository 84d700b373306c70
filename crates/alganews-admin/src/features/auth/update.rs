use alganews_core::auth::{StoredSession, TokenPair, decode_access_token};
use alganews_core::sdk::Id;
use tracing::{debug, info, warn};

use super::bootstrap::{BootstrapPlan, plan};
use super::{AuthPhase, AuthState};
use crate::common::TaskSeq;
use crate::effects::{ApiCall, UiEffect};
use crate::events::AuthEvent;
use crate::mutations::StateMutation;
use crate::routes::Route;
use crate::ui::Notification;

/// Runs the startup auth flow. Only the first call per state has any effect.
pub fn handle_bootstrap(
    auth: &mut AuthState,
    tasks: &mut TaskSeq,
    route: &Route,
    session: &StoredSession,
    now: i64,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if auth.bootstrapped {
        debug!("auth bootstrap already ran");
        return (vec![], vec![]);
    }
    auth.bootstrapped = true;
    auth.now = now;

    match plan(route, session, now) {
        BootstrapPlan::RedirectToLogin { clear_session } => {
            info!(clear_session, "not signed in, redirecting to login");
            (redirect_to_login(auth, clear_session), vec![])
        }
        BootstrapPlan::MissingCode => {
            auth.phase = AuthPhase::MissingCode;
            (
                vec![],
                vec![StateMutation::Notify(Notification::error(
                    "Código não foi informado",
                ))],
            )
        }
        BootstrapPlan::ExchangeCode { code, verifier } => {
            info!("exchanging authorization code");
            auth.phase = AuthPhase::Exchanging;
            (vec![UiEffect::ExchangeCode { code, verifier }], vec![])
        }
        BootstrapPlan::Restore { user_id } => (authenticate(auth, tasks, user_id), vec![]),
        BootstrapPlan::Refresh { refresh_token } => {
            info!("access token unusable, refreshing");
            auth.phase = AuthPhase::Refreshing;
            (vec![UiEffect::RefreshToken { refresh_token }], vec![])
        }
    }
}

pub fn handle_auth_event(
    auth: &mut AuthState,
    tasks: &mut TaskSeq,
    event: AuthEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        AuthEvent::CodeExchanged { result: Ok(pair) } => {
            let mut effects = vec![];
            let Some(user_id) = accept_tokens(auth, &pair, &mut effects) else {
                effects.extend(redirect_to_login(auth, true));
                return (effects, vec![]);
            };
            effects.extend(authenticate(auth, tasks, user_id));
            (effects, vec![StateMutation::Navigate(Route::Home)])
        }
        AuthEvent::CodeExchanged { result: Err(err) } => {
            warn!(error = %err, "authorization code exchange failed");
            auth.phase = AuthPhase::Failed;
            (vec![], vec![])
        }
        AuthEvent::Refreshed { result: Ok(pair) } => {
            let mut effects = vec![];
            match accept_tokens(auth, &pair, &mut effects) {
                Some(user_id) => effects.extend(authenticate(auth, tasks, user_id)),
                None => effects.extend(redirect_to_login(auth, true)),
            }
            (effects, vec![])
        }
        AuthEvent::Refreshed { result: Err(err) } => {
            warn!(error = %err, "token refresh failed");
            (redirect_to_login(auth, true), vec![])
        }
        AuthEvent::UserLoaded { task, result } => {
            if !auth.finish_user_fetch(task) {
                debug!(task = task.0, "discarding stale current user");
                return (vec![], vec![]);
            }
            if let Ok(user) = result {
                info!(user_id = user.summary.id, "current user loaded");
                auth.user = Some(user);
            }
            (vec![], vec![])
        }
        AuthEvent::LoginRedirected { url } => {
            auth.login_url = Some(url);
            (vec![], vec![])
        }
        AuthEvent::Logout => {
            info!("signing out");
            (redirect_to_login(auth, true), vec![])
        }
    }
}

/// Persists a fresh token pair and decodes the user id it carries.
fn accept_tokens(auth: &AuthState, pair: &TokenPair, effects: &mut Vec<UiEffect>) -> Option<Id> {
    effects.push(UiEffect::PersistTokens {
        access_token: pair.access_token.clone(),
        refresh_token: pair.refresh_token.clone(),
    });
    match decode_access_token(&pair.access_token, auth.now) {
        Ok(claims) => Some(claims.user_id),
        Err(err) => {
            warn!(error = %err, "issued access token is unusable");
            None
        }
    }
}

fn authenticate(auth: &mut AuthState, tasks: &mut TaskSeq, user_id: Id) -> Vec<UiEffect> {
    info!(user_id, "authenticated");
    auth.phase = AuthPhase::Authenticated { user_id };
    let task = auth.begin_user_fetch(tasks);
    vec![UiEffect::api(ApiCall::FetchCurrentUser { task, id: user_id })]
}

fn redirect_to_login(auth: &mut AuthState, clear_session: bool) -> Vec<UiEffect> {
    auth.sign_out();
    let mut effects = Vec::with_capacity(2);
    if clear_session {
        effects.push(UiEffect::ClearSession);
    }
    effects.push(UiEffect::RedirectToLogin);
    effects
}
