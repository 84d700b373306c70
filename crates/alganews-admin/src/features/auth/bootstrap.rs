//! Startup decision of the auth flow.
//!
//! `plan` is pure: it looks at the current route and the stored session and
//! says what the bootstrap must do. It never touches the token store.

use alganews_core::auth::{StoredSession, decode_access_token};
use alganews_core::sdk::Id;
use tracing::{debug, warn};

use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapPlan {
    /// Send the user to the login screen, optionally wiping the stored session.
    RedirectToLogin { clear_session: bool },
    /// On the redirect route without a `code` parameter.
    MissingCode,
    ExchangeCode { code: String, verifier: String },
    /// The stored access token is valid.
    Restore { user_id: Id },
    /// The stored access token is unusable but a refresh token exists.
    Refresh { refresh_token: String },
}

pub fn plan(route: &Route, session: &StoredSession, now: i64) -> BootstrapPlan {
    if let Route::Authorize { code, state } = route {
        let Some(code) = code.clone() else {
            return BootstrapPlan::MissingCode;
        };
        // The redirect must echo the state of the login this client started.
        if session.login_state.is_some() && session.login_state != *state {
            warn!("authorization state does not match the pending login");
            return BootstrapPlan::RedirectToLogin {
                clear_session: true,
            };
        }
        // A code without its verifier cannot be exchanged; start over.
        let Some(verifier) = session.code_verifier.clone() else {
            return BootstrapPlan::RedirectToLogin {
                clear_session: true,
            };
        };
        return BootstrapPlan::ExchangeCode { code, verifier };
    }

    let Some(token) = session.access_token.as_deref() else {
        return BootstrapPlan::RedirectToLogin {
            clear_session: false,
        };
    };

    match decode_access_token(token, now) {
        Ok(claims) => BootstrapPlan::Restore {
            user_id: claims.user_id,
        },
        Err(err) => {
            debug!(error = %err, "stored access token unusable");
            match session.refresh_token.clone() {
                Some(refresh_token) => BootstrapPlan::Refresh { refresh_token },
                None => BootstrapPlan::RedirectToLogin {
                    clear_session: true,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alganews_core::auth::token::encode_unsigned;
    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn authorize(code: Option<&str>) -> Route {
        Route::Authorize {
            code: code.map(str::to_string),
            state: Some("state-1".to_string()),
        }
    }

    fn pending_login() -> StoredSession {
        StoredSession {
            code_verifier: Some("verifier".to_string()),
            login_state: Some("state-1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_code_without_verifier_forces_login() {
        let plan = plan(&authorize(Some("ABC")), &StoredSession::default(), NOW);
        assert_eq!(
            plan,
            BootstrapPlan::RedirectToLogin {
                clear_session: true
            }
        );
    }

    #[test]
    fn test_code_with_verifier_is_exchanged() {
        assert_eq!(
            plan(&authorize(Some("ABC")), &pending_login(), NOW),
            BootstrapPlan::ExchangeCode {
                code: "ABC".to_string(),
                verifier: "verifier".to_string()
            }
        );
    }

    #[test]
    fn test_mismatched_state_forces_login() {
        let forged = Route::Authorize {
            code: Some("ABC".to_string()),
            state: Some("other".to_string()),
        };
        let unset = Route::Authorize {
            code: Some("ABC".to_string()),
            state: None,
        };
        for route in [forged, unset] {
            assert_eq!(
                plan(&route, &pending_login(), NOW),
                BootstrapPlan::RedirectToLogin {
                    clear_session: true
                }
            );
        }
    }

    #[test]
    fn test_missing_code_on_redirect_route() {
        assert_eq!(
            plan(&authorize(None), &StoredSession::default(), NOW),
            BootstrapPlan::MissingCode
        );
    }

    #[test]
    fn test_valid_token_restores_user_id() {
        let session = StoredSession {
            access_token: Some(encode_unsigned(&json!({
                "alganews:user_id": 42,
                "exp": NOW + 60
            }))),
            ..Default::default()
        };
        assert_eq!(
            plan(&Route::Users, &session, NOW),
            BootstrapPlan::Restore { user_id: 42 }
        );
    }

    #[test]
    fn test_expired_token_refreshes_or_logs_in() {
        let expired = encode_unsigned(&json!({"alganews:user_id": 42, "exp": NOW - 1}));
        let mut session = StoredSession {
            access_token: Some(expired),
            refresh_token: Some("refresh".to_string()),
            ..Default::default()
        };
        assert_eq!(
            plan(&Route::Home, &session, NOW),
            BootstrapPlan::Refresh {
                refresh_token: "refresh".to_string()
            }
        );

        session.refresh_token = None;
        assert_eq!(
            plan(&Route::Home, &session, NOW),
            BootstrapPlan::RedirectToLogin {
                clear_session: true
            }
        );
    }

    #[test]
    fn test_no_token_redirects_without_clearing() {
        assert_eq!(
            plan(&Route::Payments, &StoredSession::default(), NOW),
            BootstrapPlan::RedirectToLogin {
                clear_session: false
            }
        );
    }
}
