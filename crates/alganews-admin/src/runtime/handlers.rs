//! Effect handlers.
//!
//! Pure async functions that perform one remote call and return the event
//! carrying its result. They never touch state; the runtime spawns them and
//! sends the returned event to the inbox.

use alganews_core::auth::{AuthApi, CodeExchange};
use alganews_core::sdk::{AlgaNewsApi, ApiResult};

use crate::actions::ActionId;
use crate::effects::ApiCall;
use crate::events::{
    AuthEvent, CategoryEvent, EntryEvent, HomeEvent, PaymentEvent, PaymentFormEvent, UiEvent,
    UserEvent,
};

/// Drops the response body of a mutation; the slice refetches instead.
fn done<T>(result: ApiResult<T>) -> ApiResult<()> {
    result.map(|_| ())
}

pub async fn call_api<A: AlgaNewsApi>(api: &A, call: ApiCall) -> UiEvent {
    match call {
        ApiCall::FetchUsers { task } => UiEvent::User(UserEvent::ListLoaded {
            task,
            result: api.list_users().await,
        }),
        ApiCall::FetchUser { task, id } => UiEvent::User(UserEvent::DetailLoaded {
            task,
            result: api.get_user(id).await,
        }),
        ApiCall::CreateUser { input } => UiEvent::User(UserEvent::Mutated {
            action: ActionId::CreateUser,
            result: done(api.create_user(input).await),
        }),
        ApiCall::UpdateUser { id, input } => UiEvent::User(UserEvent::Mutated {
            action: ActionId::UpdateUser,
            result: done(api.update_user(id, input).await),
        }),
        ApiCall::SetUserActive { id, active } => {
            let result = if active {
                api.activate_user(id).await
            } else {
                api.deactivate_user(id).await
            };
            UiEvent::User(UserEvent::Mutated {
                action: ActionId::ToggleUserStatus,
                result,
            })
        }

        ApiCall::FetchPayments { task, query } => UiEvent::Payment(PaymentEvent::ListLoaded {
            task,
            result: api.list_payments(query).await,
        }),
        ApiCall::FetchPayment { task, id } => UiEvent::Payment(PaymentEvent::DetailLoaded {
            task,
            result: api.get_payment(id).await,
        }),
        ApiCall::ApprovePayments { ids } => UiEvent::Payment(PaymentEvent::Mutated {
            action: ActionId::ApprovePaymentsInBatch,
            result: api.approve_payments(ids).await,
        }),
        ApiCall::RemovePayment { id } => UiEvent::Payment(PaymentEvent::Mutated {
            action: ActionId::RemovePayment,
            result: api.remove_payment(id).await,
        }),
        ApiCall::SchedulePayment { input } => {
            UiEvent::PaymentForm(PaymentFormEvent::Scheduled {
                result: done(api.schedule_payment(input).await),
            })
        }
        ApiCall::PreviewPayment { task, input } => {
            UiEvent::PaymentForm(PaymentFormEvent::PreviewLoaded {
                task,
                result: api.preview_payment(input).await,
            })
        }

        ApiCall::FetchEntries { task, query } => {
            let entry_type = query.entry_type;
            UiEvent::Entries(
                entry_type,
                EntryEvent::ListLoaded {
                    task,
                    result: api.list_entries(query).await,
                },
            )
        }
        ApiCall::FetchEntry {
            task,
            entry_type,
            id,
        } => UiEvent::Entries(
            entry_type,
            EntryEvent::DetailLoaded {
                task,
                result: api.get_entry(id).await,
            },
        ),
        ApiCall::CreateEntry { input } => {
            let entry_type = input.entry_type;
            UiEvent::Entries(
                entry_type,
                EntryEvent::Mutated {
                    action: ActionId::CreateEntry(entry_type),
                    result: done(api.create_entry(input).await),
                },
            )
        }
        ApiCall::UpdateEntry { id, input } => {
            let entry_type = input.entry_type;
            UiEvent::Entries(
                entry_type,
                EntryEvent::Mutated {
                    action: ActionId::UpdateEntry(entry_type),
                    result: done(api.update_entry(id, input).await),
                },
            )
        }
        ApiCall::RemoveEntry { entry_type, id } => UiEvent::Entries(
            entry_type,
            EntryEvent::Mutated {
                action: ActionId::RemoveEntry(entry_type),
                result: api.remove_entry(id).await,
            },
        ),
        ApiCall::RemoveEntries { entry_type, ids } => UiEvent::Entries(
            entry_type,
            EntryEvent::Mutated {
                action: ActionId::RemoveEntriesInBatch(entry_type),
                result: api.remove_entries(ids).await,
            },
        ),
        ApiCall::FetchCategories { task, query } => {
            UiEvent::Category(CategoryEvent::ListLoaded {
                task,
                result: api.list_categories(query).await,
            })
        }
        ApiCall::CreateCategory { input } => UiEvent::Category(CategoryEvent::Mutated {
            action: ActionId::CreateCategory,
            result: done(api.create_category(input).await),
        }),
        ApiCall::RemoveCategory { id } => UiEvent::Category(CategoryEvent::Mutated {
            action: ActionId::DeleteCategory,
            result: api.remove_category(id).await,
        }),

        ApiCall::FetchLatestPosts { task, query } => UiEvent::Home(HomeEvent::PostsLoaded {
            task,
            result: api.list_posts(query).await,
        }),
        ApiCall::FetchMetrics { task } => UiEvent::Home(HomeEvent::MetricsLoaded {
            task,
            result: api.monthly_revenues_expenses().await,
        }),

        ApiCall::FetchCurrentUser { task, id } => UiEvent::Auth(AuthEvent::UserLoaded {
            task,
            result: api.get_user(id).await,
        }),
    }
}

pub async fn exchange_code<O: AuthApi>(auth: &O, request: CodeExchange) -> UiEvent {
    UiEvent::Auth(AuthEvent::CodeExchanged {
        result: auth.exchange_code(request).await,
    })
}

pub async fn refresh_token<O: AuthApi>(auth: &O, refresh_token: String) -> UiEvent {
    UiEvent::Auth(AuthEvent::Refreshed {
        result: auth.refresh(refresh_token).await,
    })
}
