//! Admin reducer (update function).
//!
//! All state changes happen here. The store calls `update(state, event)` and
//! the runtime executes the returned effects. Feature handlers return
//! mutations for other slices, applied by [`apply_mutations`].

use alganews_core::sdk::cash_flow::EntryType;
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::{
    CategoryEvent, ConfirmEvent, EntryEvent, HomeEvent, PaymentEvent, PaymentFormEvent, UiEvent,
    UserEvent,
};
use crate::mutations::StateMutation;
use crate::overlays::{ConfirmOutcome, DoubleConfirm};
use crate::routes::Route;
use crate::state::AdminState;
use crate::{auth, cash_flow, home, payment, ui, user};

/// The main reducer function.
pub fn update(state: &mut AdminState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Bootstrap {
            location,
            session,
            now,
        } => {
            let route = Route::parse(&location);
            state.ui.set_route(route.clone());
            let (effects, mutations) =
                auth::handle_bootstrap(&mut state.auth, &mut state.tasks, &route, &session, now);
            with_mutations(state, effects, mutations)
        }
        UiEvent::Navigate(route) => navigate(state, route),
        UiEvent::User(event) => {
            let (effects, mutations) =
                user::handle_user_event(&mut state.users, &mut state.tasks, event);
            with_mutations(state, effects, mutations)
        }
        UiEvent::Payment(event) => {
            let (effects, mutations) =
                payment::handle_payment_event(&mut state.payments, &mut state.tasks, event);
            with_mutations(state, effects, mutations)
        }
        UiEvent::PaymentForm(event) => {
            let (effects, mutations) = payment::handle_payment_form_event(
                &mut state.payment_form,
                &mut state.tasks,
                state.settings.preview_debounce,
                event,
            );
            with_mutations(state, effects, mutations)
        }
        UiEvent::Entries(entry_type, event) => {
            let (effects, mutations) = cash_flow::handle_entry_event(
                &mut state.cash_flow,
                &mut state.tasks,
                entry_type,
                event,
            );
            with_mutations(state, effects, mutations)
        }
        UiEvent::Category(event) => {
            let (effects, mutations) = cash_flow::handle_category_event(
                &mut state.cash_flow.categories,
                &mut state.tasks,
                event,
            );
            with_mutations(state, effects, mutations)
        }
        UiEvent::Auth(event) => {
            let (effects, mutations) =
                auth::handle_auth_event(&mut state.auth, &mut state.tasks, event);
            with_mutations(state, effects, mutations)
        }
        UiEvent::Home(event) => home::handle_home_event(&mut state.home, &mut state.tasks, event),
        UiEvent::Ui(event) => {
            ui::handle_ui_event(&mut state.ui, event);
            vec![]
        }
        UiEvent::Confirm(event) => handle_confirm(state, event),
    }
}

/// Applies cross-slice mutations; navigation may issue fetches.
pub fn apply_mutations(state: &mut AdminState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Notify(notification) => state.ui.notifications.push(notification),
            StateMutation::Navigate(route) => effects.extend(navigate(state, route)),
        }
    }
    effects
}

fn with_mutations(
    state: &mut AdminState,
    mut effects: Vec<UiEffect>,
    mutations: Vec<StateMutation>,
) -> Vec<UiEffect> {
    effects.extend(apply_mutations(state, mutations));
    effects
}

/// Sets the route and loads the data its view shows.
fn navigate(state: &mut AdminState, route: Route) -> Vec<UiEffect> {
    debug!(path = %route.path(), "navigate");
    state.ui.set_route(route.clone());

    match route {
        Route::Home => update(state, UiEvent::Home(HomeEvent::Fetch)),
        Route::Users => update(state, UiEvent::User(UserEvent::Fetch)),
        Route::UserDetail(id) | Route::UserEdit(id) => {
            update(state, UiEvent::User(UserEvent::FetchDetail { id }))
        }
        Route::Payments => update(state, UiEvent::Payment(PaymentEvent::Fetch)),
        Route::PaymentCreate => {
            let mut effects = update(state, UiEvent::PaymentForm(PaymentFormEvent::Reset));
            // Payee options.
            effects.extend(update(state, UiEvent::User(UserEvent::Fetch)));
            effects
        }
        Route::PaymentDetail(id) => update(state, UiEvent::Payment(PaymentEvent::FetchDetail { id })),
        Route::Expenses => load_cash_flow(state, EntryType::Expense),
        Route::Revenues => load_cash_flow(state, EntryType::Revenue),
        Route::UserCreate | Route::Authorize { .. } | Route::NotFound(_) => vec![],
    }
}

fn load_cash_flow(state: &mut AdminState, entry_type: EntryType) -> Vec<UiEffect> {
    let mut effects = update(state, UiEvent::Entries(entry_type, EntryEvent::Fetch));
    effects.extend(update(state, UiEvent::Category(CategoryEvent::Fetch)));
    effects
}

fn handle_confirm(state: &mut AdminState, event: ConfirmEvent) -> Vec<UiEffect> {
    match event {
        ConfirmEvent::Open { prompt, action } => {
            if state.overlay.is_some() {
                debug!("replacing pending confirmation");
            }
            state.overlay = Some(DoubleConfirm::new(prompt, action));
            vec![]
        }
        ConfirmEvent::Accept => {
            let Some(dialog) = state.overlay.take() else {
                return vec![];
            };
            match dialog.accept() {
                ConfirmOutcome::Pending(dialog) => {
                    state.overlay = Some(dialog);
                    vec![]
                }
                ConfirmOutcome::Confirmed(action) => update(state, action),
            }
        }
        ConfirmEvent::Cancel => {
            state.overlay = None;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use alganews_core::sdk::ApiError;

    use super::*;
    use crate::actions::ActionId;
    use crate::effects::ApiCall;
    use crate::overlays::{ConfirmPrompt, ConfirmStage};

    fn approve_confirm() -> UiEvent {
        UiEvent::Confirm(ConfirmEvent::Open {
            prompt: ConfirmPrompt::approve_payments(2),
            action: Box::new(UiEvent::Payment(PaymentEvent::ApproveBatch(vec![3, 4]))),
        })
    }

    fn approvals(effects: &[UiEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, UiEffect::Api(ApiCall::ApprovePayments { .. })))
            .count()
    }

    #[test]
    fn test_first_stage_accept_does_not_run_action() {
        let mut state = AdminState::default();
        update(&mut state, approve_confirm());

        let effects = update(&mut state, UiEvent::Confirm(ConfirmEvent::Accept));

        assert_eq!(approvals(&effects), 0);
        assert_eq!(state.overlay.as_ref().map(|d| d.stage), Some(ConfirmStage::Modal));

        let effects = update(&mut state, UiEvent::Confirm(ConfirmEvent::Cancel));
        assert_eq!(approvals(&effects), 0);
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_both_stages_run_action_exactly_once() {
        let mut state = AdminState::default();
        update(&mut state, approve_confirm());

        let first = update(&mut state, UiEvent::Confirm(ConfirmEvent::Accept));
        let second = update(&mut state, UiEvent::Confirm(ConfirmEvent::Accept));
        let third = update(&mut state, UiEvent::Confirm(ConfirmEvent::Accept));

        assert_eq!(approvals(&first) + approvals(&second) + approvals(&third), 1);
        assert_eq!(approvals(&second), 1);
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_navigate_to_expenses_loads_entries_and_categories() {
        let mut state = AdminState::default();

        let effects = update(&mut state, UiEvent::Navigate(Route::Expenses));

        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::Api(ApiCall::FetchEntries { query, .. }),
                UiEffect::Api(ApiCall::FetchCategories { .. }),
            ] if query.entry_type == EntryType::Expense
        ));
        assert_eq!(state.ui.breadcrumb, vec!["Fluxo de caixa", "Despesas"]);
    }

    #[test]
    fn test_scheduled_payment_navigates_and_refetches() {
        let mut state = AdminState::default();

        let effects = update(
            &mut state,
            UiEvent::PaymentForm(PaymentFormEvent::Scheduled { result: Ok(()) }),
        );

        assert_eq!(state.ui.route, Route::Payments);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Api(ApiCall::FetchPayments { .. })]
        ));
        assert_eq!(state.ui.notifications.len(), 1);
    }

    #[test]
    fn test_user_mutation_refetches_exactly_once() {
        let mut state = AdminState::default();
        let effects = update(
            &mut state,
            UiEvent::User(UserEvent::Mutated {
                action: ActionId::ToggleUserStatus,
                result: Ok(()),
            }),
        );
        let fetches = effects
            .iter()
            .filter(|e| matches!(e, UiEffect::Api(ApiCall::FetchUsers { .. })))
            .count();
        assert_eq!(fetches, 1);
    }

    #[test]
    fn test_bootstrap_without_session_redirects() {
        let mut state = AdminState::default();
        let effects = update(
            &mut state,
            UiEvent::Bootstrap {
                location: "http://localhost:3000/usuarios".to_string(),
                session: Default::default(),
                now: 0,
            },
        );

        assert!(matches!(effects.as_slice(), [UiEffect::RedirectToLogin]));
        assert_eq!(state.ui.route, Route::Users);
    }

    #[test]
    fn test_failed_detail_sets_not_found() {
        let mut state = AdminState::default();
        let effects = update(&mut state, UiEvent::Navigate(Route::PaymentDetail(9)));
        let [UiEffect::Api(ApiCall::FetchPayment { task, id: 9 })] = effects.as_slice() else {
            panic!("expected a payment detail fetch");
        };

        update(
            &mut state,
            UiEvent::Payment(PaymentEvent::DetailLoaded {
                task: *task,
                result: Err(ApiError::from_response(404, "")),
            }),
        );

        assert!(state.payments.detail.not_found);
    }
}
