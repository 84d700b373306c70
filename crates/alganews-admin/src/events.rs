//! Event (action) types.
//!
//! Every input to the state layer is a `UiEvent`: user intents (fetch, set
//! query, create, remove) and async results (`*Loaded`, `Mutated`). Results
//! carry the `TaskId` they were issued with so the reducer can drop stale ones.

use alganews_core::auth::{StoredSession, TokenPair};
use alganews_core::sdk::cash_flow::{
    CategoryInput, CategorySummary, EntryDetailed, EntryInput, EntryQueryPatch, EntrySummary,
    EntryType,
};
use alganews_core::sdk::metric::MonthlyRevenueExpense;
use alganews_core::sdk::payment::{
    Bonus, PaymentDetailed, PaymentPreview, PaymentQueryPatch, PaymentSummary,
};
use alganews_core::sdk::post::PostSummary;
use alganews_core::sdk::user::{UserDetailed, UserInput, UserSummary};
use alganews_core::sdk::{ApiError, ApiErrorKind, ApiResult, Id, Page, Sort};
use chrono::NaiveDate;

use crate::actions::ActionId;
use crate::common::TaskId;
use crate::overlays::ConfirmPrompt;
use crate::routes::Route;
use crate::ui::Notification;

#[derive(Debug)]
pub enum UserEvent {
    Fetch,
    ListLoaded {
        task: TaskId,
        result: ApiResult<Vec<UserSummary>>,
    },
    FetchDetail {
        id: Id,
    },
    DetailLoaded {
        task: TaskId,
        result: ApiResult<UserDetailed>,
    },
    Create(UserInput),
    Update {
        id: Id,
        input: UserInput,
    },
    /// Activates an inactive user or deactivates an active one.
    ToggleStatus {
        id: Id,
    },
    Mutated {
        action: ActionId,
        result: ApiResult<()>,
    },
}

#[derive(Debug)]
pub enum PaymentEvent {
    Fetch,
    SetQuery(PaymentQueryPatch),
    ListLoaded {
        task: TaskId,
        result: ApiResult<Page<PaymentSummary>>,
    },
    SetSelected(Vec<Id>),
    FetchDetail {
        id: Id,
    },
    DetailLoaded {
        task: TaskId,
        result: ApiResult<PaymentDetailed>,
    },
    ApproveBatch(Vec<Id>),
    Remove(Id),
    Mutated {
        action: ActionId,
        result: ApiResult<()>,
    },
}

/// Events of the payment scheduling form.
#[derive(Debug)]
pub enum PaymentFormEvent {
    Reset,
    SetPayee(Option<Id>),
    SetAccountingPeriod {
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    },
    SetBonuses(Vec<Bonus>),
    SetScheduledTo(Option<NaiveDate>),
    /// The preview debounce timer fired.
    DebounceElapsed {
        task: TaskId,
    },
    PreviewLoaded {
        task: TaskId,
        result: ApiResult<PaymentPreview>,
    },
    Submit,
    Scheduled {
        result: ApiResult<()>,
    },
}

#[derive(Debug)]
pub enum EntryEvent {
    Fetch,
    SetQuery(EntryQueryPatch),
    ListLoaded {
        task: TaskId,
        result: ApiResult<Vec<EntrySummary>>,
    },
    SetSelected(Vec<Id>),
    FetchDetail {
        id: Id,
    },
    DetailLoaded {
        task: TaskId,
        result: ApiResult<EntryDetailed>,
    },
    Create(EntryInput),
    Update {
        id: Id,
        input: EntryInput,
    },
    Remove(Id),
    RemoveBatch(Vec<Id>),
    Mutated {
        action: ActionId,
        result: ApiResult<()>,
    },
}

#[derive(Debug)]
pub enum CategoryEvent {
    Fetch,
    SetSort(Sort),
    ListLoaded {
        task: TaskId,
        result: ApiResult<Vec<CategorySummary>>,
    },
    Create(CategoryInput),
    Remove(Id),
    Mutated {
        action: ActionId,
        result: ApiResult<()>,
    },
}

#[derive(Debug)]
pub enum AuthEvent {
    CodeExchanged { result: ApiResult<TokenPair> },
    Refreshed { result: ApiResult<TokenPair> },
    UserLoaded {
        task: TaskId,
        result: ApiResult<UserDetailed>,
    },
    /// A login URL was issued and its verifier stored.
    LoginRedirected { url: String },
    Logout,
}

#[derive(Debug)]
pub enum HomeEvent {
    Fetch,
    PostsLoaded {
        task: TaskId,
        result: ApiResult<Page<PostSummary>>,
    },
    MetricsLoaded {
        task: TaskId,
        result: ApiResult<Vec<MonthlyRevenueExpense>>,
    },
}

#[derive(Debug)]
pub enum UiSliceEvent {
    SetBreadcrumb(String),
    Notify(Notification),
    ClearNotifications,
}

#[derive(Debug)]
pub enum ConfirmEvent {
    /// Shows the first-stage prompt gating `action`.
    Open {
        prompt: ConfirmPrompt,
        action: Box<UiEvent>,
    },
    Accept,
    Cancel,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Application mount: runs the auth bootstrap once.
    Bootstrap {
        location: String,
        session: StoredSession,
        /// Unix seconds, used to check token expiry.
        now: i64,
    },
    Navigate(Route),
    User(UserEvent),
    Payment(PaymentEvent),
    PaymentForm(PaymentFormEvent),
    Entries(EntryType, EntryEvent),
    Category(CategoryEvent),
    Auth(AuthEvent),
    Home(HomeEvent),
    Ui(UiSliceEvent),
    Confirm(ConfirmEvent),
}

impl UiEvent {
    /// The action identifier and error when this event is a rejected action.
    pub fn rejection(&self) -> Option<(ActionId, &ApiError)> {
        let (action, err) = match self {
            UiEvent::User(event) => match event {
                UserEvent::ListLoaded { result: Err(e), .. } => (ActionId::GetAllUsers, e),
                UserEvent::DetailLoaded { result: Err(e), .. } => (ActionId::GetDetailedUser, e),
                UserEvent::Mutated {
                    action,
                    result: Err(e),
                } => (*action, e),
                _ => return None,
            },
            UiEvent::Payment(event) => match event {
                PaymentEvent::ListLoaded { result: Err(e), .. } => (ActionId::GetAllPayments, e),
                PaymentEvent::DetailLoaded { result: Err(e), .. } => {
                    (ActionId::GetPaymentDetailed, e)
                }
                PaymentEvent::Mutated {
                    action,
                    result: Err(e),
                } => (*action, e),
                _ => return None,
            },
            UiEvent::PaymentForm(event) => match event {
                // Business rejections of a preview are shown inline by the form.
                PaymentFormEvent::PreviewLoaded { result: Err(e), .. }
                    if e.kind() != ApiErrorKind::Business =>
                {
                    (ActionId::PreviewPayment, e)
                }
                PaymentFormEvent::Scheduled { result: Err(e) } => (ActionId::SchedulePayment, e),
                _ => return None,
            },
            UiEvent::Entries(entry_type, event) => match event {
                EntryEvent::ListLoaded { result: Err(e), .. } => {
                    (ActionId::GetEntries(*entry_type), e)
                }
                EntryEvent::DetailLoaded { result: Err(e), .. } => {
                    (ActionId::GetEntryDetailed(*entry_type), e)
                }
                EntryEvent::Mutated {
                    action,
                    result: Err(e),
                } => (*action, e),
                _ => return None,
            },
            UiEvent::Category(event) => match event {
                CategoryEvent::ListLoaded { result: Err(e), .. } => (ActionId::GetCategories, e),
                CategoryEvent::Mutated {
                    action,
                    result: Err(e),
                } => (*action, e),
                _ => return None,
            },
            UiEvent::Auth(event) => match event {
                AuthEvent::CodeExchanged { result: Err(e) } => (ActionId::ExchangeCode, e),
                AuthEvent::Refreshed { result: Err(e) } => (ActionId::RefreshToken, e),
                AuthEvent::UserLoaded { result: Err(e), .. } => (ActionId::FetchUser, e),
                _ => return None,
            },
            UiEvent::Home(event) => match event {
                HomeEvent::PostsLoaded { result: Err(e), .. } => (ActionId::GetLatestPosts, e),
                HomeEvent::MetricsLoaded { result: Err(e), .. } => {
                    (ActionId::GetMonthlyRevenuesExpenses, e)
                }
                _ => return None,
            },
            UiEvent::Bootstrap { .. }
            | UiEvent::Navigate(_)
            | UiEvent::Ui(_)
            | UiEvent::Confirm(_) => return None,
        };
        Some((action, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_of_failed_list_fetch() {
        let event = UiEvent::Entries(
            EntryType::Revenue,
            EntryEvent::ListLoaded {
                task: TaskId(1),
                result: Err(ApiError::network("offline")),
            },
        );
        let (action, err) = event.rejection().unwrap();

        assert_eq!(action, ActionId::GetEntries(EntryType::Revenue));
        assert_eq!(err.message(), "offline");
    }

    #[test]
    fn test_successful_results_are_not_rejections() {
        let event = UiEvent::User(UserEvent::ListLoaded {
            task: TaskId(1),
            result: Ok(Vec::new()),
        });
        assert!(event.rejection().is_none());
        assert!(UiEvent::User(UserEvent::Fetch).rejection().is_none());
    }
}
