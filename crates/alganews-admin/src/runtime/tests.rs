use std::sync::Mutex;
use std::time::Duration;

use alganews_core::auth::token::encode_unsigned;
use alganews_core::auth::{MemoryTokenStore, StoredSession, TokenPair};
use alganews_core::sdk::cash_flow::{
    CategoryInput, CategoryQuery, CategorySummary, EntryDetailed, EntryInput, EntryQuery,
    EntrySummary,
};
use alganews_core::sdk::metric::MonthlyRevenueExpense;
use alganews_core::sdk::payment::{
    PaymentDetailed, PaymentInput, PaymentPreview, PaymentQuery, PaymentSummary, PreviewInput,
};
use alganews_core::sdk::post::{PostQuery, PostSummary};
use alganews_core::sdk::user::{UserDetailed, UserInput, UserSummary};
use alganews_core::sdk::{ApiError, ApiResult, Id, Page, PageMeta};
use chrono::NaiveDate;
use serde_json::json;

use super::*;
use crate::events::{ConfirmEvent, PaymentEvent, PaymentFormEvent, UserEvent};
use crate::overlays::ConfirmPrompt;
use crate::routes::Route;
use crate::state::AdminSettings;

/// Records every call; list endpoints answer with empty results.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    forbid_users: bool,
    /// Makes the post list handler panic.
    crash_posts: bool,
    /// Answers every list endpoint with a server error.
    fail_lists: bool,
}

impl FakeApi {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }
}

fn detailed_user(id: Id) -> UserDetailed {
    serde_json::from_value(json!({
        "id": id,
        "name": "Ana Souza",
        "email": "ana@alganews.com.br",
        "role": "MANAGER",
        "active": true
    }))
    .unwrap()
}

fn server_error() -> ApiError {
    ApiError::from_response(500, r#"{"userMessage":"Erro interno"}"#)
}

fn empty_page<T>() -> Page<T> {
    Page {
        content: Vec::new(),
        meta: PageMeta::default(),
    }
}

impl AlgaNewsApi for FakeApi {
    async fn list_users(&self) -> ApiResult<Vec<UserSummary>> {
        self.record("list_users");
        if self.forbid_users {
            return Err(ApiError::from_response(403, r#"{"userMessage":"Acesso negado"}"#));
        }
        Ok(vec![])
    }

    async fn get_user(&self, id: Id) -> ApiResult<UserDetailed> {
        self.record(format!("get_user:{id}"));
        Ok(detailed_user(id))
    }

    async fn create_user(&self, _input: UserInput) -> ApiResult<UserDetailed> {
        self.record("create_user");
        Ok(detailed_user(1))
    }

    async fn update_user(&self, id: Id, _input: UserInput) -> ApiResult<UserDetailed> {
        self.record("update_user");
        Ok(detailed_user(id))
    }

    async fn activate_user(&self, _id: Id) -> ApiResult<()> {
        self.record("activate_user");
        Ok(())
    }

    async fn deactivate_user(&self, _id: Id) -> ApiResult<()> {
        self.record("deactivate_user");
        Ok(())
    }

    async fn list_payments(&self, _query: PaymentQuery) -> ApiResult<Page<PaymentSummary>> {
        self.record("list_payments");
        if self.fail_lists {
            return Err(server_error());
        }
        Ok(empty_page())
    }

    async fn get_payment(&self, _id: Id) -> ApiResult<PaymentDetailed> {
        self.record("get_payment");
        Err(ApiError::from_response(404, ""))
    }

    async fn schedule_payment(&self, _input: PaymentInput) -> ApiResult<PaymentDetailed> {
        self.record("schedule_payment");
        Err(ApiError::from_response(422, ""))
    }

    async fn remove_payment(&self, _id: Id) -> ApiResult<()> {
        self.record("remove_payment");
        Ok(())
    }

    async fn approve_payments(&self, ids: Vec<Id>) -> ApiResult<()> {
        self.record(format!("approve_payments:{ids:?}"));
        Ok(())
    }

    async fn preview_payment(&self, _input: PreviewInput) -> ApiResult<PaymentPreview> {
        self.record("preview_payment");
        Err(ApiError::from_response(422, r#"{"detail":"Sem posts no período"}"#))
    }

    async fn list_entries(&self, _query: EntryQuery) -> ApiResult<Vec<EntrySummary>> {
        self.record("list_entries");
        if self.fail_lists {
            return Err(server_error());
        }
        Ok(vec![])
    }

    async fn get_entry(&self, _id: Id) -> ApiResult<EntryDetailed> {
        self.record("get_entry");
        Err(ApiError::from_response(404, ""))
    }

    async fn create_entry(&self, _input: EntryInput) -> ApiResult<EntryDetailed> {
        self.record("create_entry");
        Err(ApiError::from_response(400, ""))
    }

    async fn update_entry(&self, _id: Id, _input: EntryInput) -> ApiResult<EntryDetailed> {
        self.record("update_entry");
        Err(ApiError::from_response(400, ""))
    }

    async fn remove_entry(&self, _id: Id) -> ApiResult<()> {
        self.record("remove_entry");
        Ok(())
    }

    async fn remove_entries(&self, _ids: Vec<Id>) -> ApiResult<()> {
        self.record("remove_entries");
        Ok(())
    }

    async fn list_categories(&self, _query: CategoryQuery) -> ApiResult<Vec<CategorySummary>> {
        self.record("list_categories");
        if self.fail_lists {
            return Err(server_error());
        }
        Ok(vec![])
    }

    async fn create_category(&self, _input: CategoryInput) -> ApiResult<CategorySummary> {
        self.record("create_category");
        Err(ApiError::from_response(400, ""))
    }

    async fn remove_category(&self, _id: Id) -> ApiResult<()> {
        self.record("remove_category");
        Ok(())
    }

    async fn monthly_revenues_expenses(&self) -> ApiResult<Vec<MonthlyRevenueExpense>> {
        self.record("monthly_revenues_expenses");
        Ok(vec![])
    }

    async fn list_posts(&self, _query: PostQuery) -> ApiResult<Page<PostSummary>> {
        self.record("list_posts");
        assert!(!self.crash_posts, "post list crashed");
        Ok(empty_page())
    }
}

#[derive(Default)]
struct FakeAuth {
    exchanges: Mutex<Vec<CodeExchange>>,
    refreshes: Mutex<Vec<String>>,
}

fn token_for(user_id: Id) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode_unsigned(&json!({ "alganews:user_id": user_id, "exp": exp }))
}

impl AuthApi for FakeAuth {
    async fn exchange_code(&self, request: CodeExchange) -> ApiResult<TokenPair> {
        self.exchanges.lock().unwrap().push(request);
        Ok(TokenPair {
            access_token: token_for(42),
            refresh_token: "refresh-1".to_string(),
        })
    }

    async fn refresh(&self, refresh_token: String) -> ApiResult<TokenPair> {
        self.refreshes.lock().unwrap().push(refresh_token);
        Ok(TokenPair {
            access_token: token_for(42),
            refresh_token: "refresh-2".to_string(),
        })
    }
}

struct Harness {
    runtime: AdminRuntime<FakeApi, FakeAuth>,
    api: Arc<FakeApi>,
    auth: Arc<FakeAuth>,
    tokens: Arc<MemoryTokenStore>,
}

fn harness_with(api: FakeApi, session: StoredSession) -> Harness {
    let api = Arc::new(api);
    let auth = Arc::new(FakeAuth::default());
    let tokens = Arc::new(MemoryTokenStore::with_session(session));
    let settings = AdminSettings {
        preview_debounce: Duration::from_millis(1000),
    };
    let runtime = AdminRuntime::new(
        Store::new(AdminState::new(settings)),
        Arc::clone(&api),
        Arc::clone(&auth),
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
        RuntimeOptions {
            auth: AuthConfig::default(),
            open_browser: false,
        },
    );
    Harness {
        runtime,
        api,
        auth,
        tokens,
    }
}

fn signed_in() -> StoredSession {
    StoredSession {
        access_token: Some(token_for(42)),
        refresh_token: Some("refresh-0".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_code_without_verifier_requests_no_exchange() {
    let mut h = harness_with(FakeApi::default(), StoredSession::default());

    h.runtime
        .bootstrap("http://localhost:3000/authorize?code=ABC")
        .unwrap();
    h.runtime.settle().await;

    assert!(h.auth.exchanges.lock().unwrap().is_empty());
    let login_url = h.runtime.state().auth.login_url.clone().unwrap();
    assert!(login_url.starts_with("http://localhost:8081/oauth/authorize?"));
    // A fresh verifier and state are stored for the new login.
    let stored = h.tokens.load().unwrap();
    assert!(stored.code_verifier.is_some());
    let state = stored.login_state.unwrap();
    assert!(login_url.contains(&format!("state={state}")));
}

#[tokio::test]
async fn test_redirect_with_foreign_state_is_not_exchanged() {
    let session = StoredSession {
        code_verifier: Some("verifier-1".to_string()),
        login_state: Some("state-1".to_string()),
        ..Default::default()
    };
    let mut h = harness_with(FakeApi::default(), session);

    h.runtime
        .bootstrap("/authorize?code=ABC&state=forged")
        .unwrap();
    h.runtime.settle().await;

    assert!(h.auth.exchanges.lock().unwrap().is_empty());
    assert!(h.runtime.state().auth.login_url.is_some());
    let stored = h.tokens.load().unwrap();
    assert_ne!(stored.code_verifier.as_deref(), Some("verifier-1"));
    assert_ne!(stored.login_state.as_deref(), Some("state-1"));
}

#[tokio::test]
async fn test_exchange_persists_tokens_and_loads_home() {
    let session = StoredSession {
        code_verifier: Some("verifier-1".to_string()),
        login_state: Some("state-1".to_string()),
        ..Default::default()
    };
    let mut h = harness_with(FakeApi::default(), session);

    h.runtime
        .bootstrap("/authorize?code=ABC&state=state-1")
        .unwrap();
    h.runtime.settle().await;

    let exchanges = h.auth.exchanges.lock().unwrap().clone();
    assert_eq!(
        exchanges,
        vec![CodeExchange {
            code: "ABC".to_string(),
            code_verifier: "verifier-1".to_string(),
            redirect_uri: "http://localhost:3000/authorize".to_string(),
        }]
    );
    let stored = h.tokens.load().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(h.runtime.state().ui.route, Route::Home);
    assert_eq!(h.api.count("get_user:42"), 1);
    assert_eq!(h.api.count("list_posts"), 1);
    assert_eq!(h.api.count("monthly_revenues_expenses"), 1);
}

#[tokio::test]
async fn test_valid_token_loads_current_user() {
    let mut h = harness_with(FakeApi::default(), signed_in());

    h.runtime.bootstrap("/").unwrap();
    h.runtime.settle().await;

    assert_eq!(h.api.calls(), vec!["get_user:42".to_string()]);
    let user = h.runtime.state().auth.user.as_ref().unwrap();
    assert_eq!(user.summary.id, 42);
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let session = StoredSession {
        access_token: Some(encode_unsigned(&json!({"alganews:user_id": 42, "exp": 1}))),
        refresh_token: Some("refresh-0".to_string()),
        ..Default::default()
    };
    let mut h = harness_with(FakeApi::default(), session);

    h.runtime.bootstrap("/").unwrap();
    h.runtime.settle().await;

    assert_eq!(*h.auth.refreshes.lock().unwrap(), vec!["refresh-0".to_string()]);
    assert_eq!(
        h.tokens.load().unwrap().refresh_token.as_deref(),
        Some("refresh-2")
    );
    assert!(h.runtime.state().auth.is_authenticated());
}

#[tokio::test]
async fn test_forbidden_user_list_is_not_notified() {
    let api = FakeApi {
        forbid_users: true,
        ..Default::default()
    };
    let mut h = harness_with(api, signed_in());

    h.runtime.dispatch(UiEvent::Navigate(Route::Users));
    h.runtime.settle().await;

    let state = h.runtime.state();
    assert!(state.ui.notifications.is_empty());
    assert!(state.users.list.error.as_ref().is_some_and(ApiError::is_forbidden));
    assert!(!state.users.list.fetching);
}

#[tokio::test]
async fn test_confirmed_approval_runs_once_and_refetches() {
    let mut h = harness_with(FakeApi::default(), signed_in());
    h.runtime.dispatch(UiEvent::Navigate(Route::Payments));
    h.runtime.settle().await;

    h.runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Open {
        prompt: ConfirmPrompt::approve_payments(2),
        action: Box::new(UiEvent::Payment(PaymentEvent::ApproveBatch(vec![1, 2]))),
    }));
    h.runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Accept));
    h.runtime.settle().await;
    assert_eq!(h.api.count("approve_payments:[1, 2]"), 0);

    h.runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Accept));
    h.runtime.settle().await;

    assert_eq!(h.api.count("approve_payments:[1, 2]"), 1);
    assert_eq!(h.api.count("list_payments"), 2);
    let notifications = &h.runtime.state().ui.notifications;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Pagamentos aprovados com sucesso");
}

#[tokio::test(start_paused = true)]
async fn test_debounced_preview_requested_once() {
    let mut h = harness_with(FakeApi::default(), signed_in());
    let date = |d| NaiveDate::from_ymd_opt(2021, 6, d);

    h.runtime
        .dispatch(UiEvent::PaymentForm(PaymentFormEvent::SetPayee(Some(7))));
    h.runtime
        .dispatch(UiEvent::PaymentForm(PaymentFormEvent::SetAccountingPeriod {
            starts_on: date(1),
            ends_on: date(30),
        }));
    h.runtime.settle().await;

    assert_eq!(h.api.count("preview_payment"), 1);
    let form = &h.runtime.state().payment_form;
    assert!(form.preview.is_none());
    assert_eq!(
        form.preview_error.as_ref().map(ApiError::message),
        Some("Sem posts no período")
    );
    assert!(h.runtime.state().ui.notifications.is_empty());
    assert_eq!(h.runtime.pending(), 0);
}

#[tokio::test]
async fn test_logout_clears_session_and_redirects() {
    let mut h = harness_with(FakeApi::default(), signed_in());
    h.runtime.bootstrap("/").unwrap();
    h.runtime.settle().await;

    h.runtime.dispatch(UiEvent::Auth(AuthEvent::Logout));

    let stored = h.tokens.load().unwrap();
    assert!(stored.access_token.is_none());
    assert!(stored.code_verifier.is_some());
    assert!(!h.runtime.state().auth.is_authenticated());
    assert!(h.runtime.state().auth.login_url.is_some());
}

#[tokio::test]
async fn test_user_toggle_refetches_once() {
    let mut h = harness_with(FakeApi::default(), signed_in());
    h.runtime.dispatch(UiEvent::User(UserEvent::Mutated {
        action: crate::actions::ActionId::ToggleUserStatus,
        result: Ok(()),
    }));
    h.runtime.settle().await;

    assert_eq!(h.api.count("list_users"), 1);
}

#[tokio::test]
async fn test_panicking_handler_still_settles() {
    let api = FakeApi {
        crash_posts: true,
        ..Default::default()
    };
    let mut h = harness_with(api, signed_in());

    h.runtime.dispatch(UiEvent::Navigate(Route::Home));
    h.runtime.settle().await;

    assert_eq!(h.runtime.pending(), 0);
    assert_eq!(h.api.count("list_posts"), 1);
    assert_eq!(h.api.count("monthly_revenues_expenses"), 1);
}

#[tokio::test]
async fn test_failed_list_fetches_keep_error_without_notifying() {
    let api = FakeApi {
        fail_lists: true,
        ..Default::default()
    };
    let mut h = harness_with(api, signed_in());

    h.runtime.dispatch(UiEvent::Navigate(Route::Payments));
    h.runtime.dispatch(UiEvent::Navigate(Route::Expenses));
    h.runtime.settle().await;

    let state = h.runtime.state();
    assert!(state.ui.notifications.is_empty());
    let payments_error = state.payments.list.error.as_ref().map(ApiError::message);
    assert_eq!(payments_error, Some("Erro interno"));
    assert!(state.cash_flow.expenses.list.error.is_some());
}
