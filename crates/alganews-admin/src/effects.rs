//! Effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and timers only, so the reducer never talks to the SDK
//! or the token store directly.

use std::time::Duration;

use alganews_core::sdk::cash_flow::{CategoryInput, CategoryQuery, EntryInput, EntryQuery, EntryType};
use alganews_core::sdk::payment::{PaymentInput, PaymentQuery, PreviewInput};
use alganews_core::sdk::post::PostQuery;
use alganews_core::sdk::user::UserInput;
use alganews_core::sdk::Id;

use crate::common::TaskId;
use crate::events::UiEvent;

/// One remote SDK call. The runtime turns its result into the matching event.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchUsers { task: TaskId },
    FetchUser { task: TaskId, id: Id },
    CreateUser { input: UserInput },
    UpdateUser { id: Id, input: UserInput },
    SetUserActive { id: Id, active: bool },

    FetchPayments { task: TaskId, query: PaymentQuery },
    FetchPayment { task: TaskId, id: Id },
    ApprovePayments { ids: Vec<Id> },
    RemovePayment { id: Id },
    SchedulePayment { input: PaymentInput },
    PreviewPayment { task: TaskId, input: PreviewInput },

    FetchEntries { task: TaskId, query: EntryQuery },
    FetchEntry { task: TaskId, entry_type: EntryType, id: Id },
    CreateEntry { input: EntryInput },
    UpdateEntry { id: Id, input: EntryInput },
    RemoveEntry { entry_type: EntryType, id: Id },
    RemoveEntries { entry_type: EntryType, ids: Vec<Id> },
    FetchCategories { task: TaskId, query: CategoryQuery },
    CreateCategory { input: CategoryInput },
    RemoveCategory { id: Id },

    FetchLatestPosts { task: TaskId, query: PostQuery },
    FetchMetrics { task: TaskId },

    /// Loads the signed-in user (`auth/fetchUser`).
    FetchCurrentUser { task: TaskId, id: Id },
}

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    Api(ApiCall),

    /// Exchange an authorization code for tokens (PKCE).
    ExchangeCode { code: String, verifier: String },

    RefreshToken { refresh_token: String },

    /// Store a freshly obtained token pair.
    PersistTokens {
        access_token: String,
        refresh_token: String,
    },

    /// Remove tokens and verifier from the token store.
    ClearSession,

    /// Generate PKCE, store the verifier and send the user to the login screen.
    RedirectToLogin,

    /// Deliver `event` after `delay`.
    Debounce {
        delay: Duration,
        event: Box<UiEvent>,
    },
}

impl UiEffect {
    pub fn api(call: ApiCall) -> Self {
        UiEffect::Api(call)
    }
}
