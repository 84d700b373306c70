//! Dispatch middleware.
//!
//! Middleware observes every event before the reducer runs and may return
//! mutations of its own. The only one shipped is [`RejectionNotifier`], the
//! central error-reporting path for rejected actions.

use alganews_core::sdk::cash_flow::EntryType;
use tracing::warn;

use crate::actions::ActionId;
use crate::events::UiEvent;
use crate::mutations::StateMutation;
use crate::ui::Notification;

/// Rejected actions that render their own forbidden or empty state.
pub const SUPPRESSED_ACTIONS: [ActionId; 9] = [
    ActionId::GetCategories,
    ActionId::CreateCategory,
    ActionId::DeleteCategory,
    ActionId::GetEntries(EntryType::Expense),
    ActionId::CreateEntry(EntryType::Expense),
    ActionId::GetEntries(EntryType::Revenue),
    ActionId::CreateEntry(EntryType::Revenue),
    ActionId::GetAllUsers,
    ActionId::GetAllPayments,
];

pub trait Middleware: Send {
    fn observe(&self, event: &UiEvent) -> Vec<StateMutation>;
}

/// Turns rejected actions into one error notification each, unless suppressed.
#[derive(Debug, Clone)]
pub struct RejectionNotifier {
    suppressed: Vec<ActionId>,
}

impl Default for RejectionNotifier {
    fn default() -> Self {
        Self::new(SUPPRESSED_ACTIONS)
    }
}

impl RejectionNotifier {
    pub fn new(suppressed: impl IntoIterator<Item = ActionId>) -> Self {
        Self {
            suppressed: suppressed.into_iter().collect(),
        }
    }

    pub fn is_suppressed(&self, action: ActionId) -> bool {
        self.suppressed
            .iter()
            .any(|ignored| ignored.as_str() == action.as_str())
    }
}

impl Middleware for RejectionNotifier {
    fn observe(&self, event: &UiEvent) -> Vec<StateMutation> {
        let Some((action, err)) = event.rejection() else {
            return vec![];
        };
        let suppressed = self.is_suppressed(action);
        warn!(action = %action, kind = ?err.kind(), suppressed, "action rejected: {err}");
        if suppressed {
            return vec![];
        }
        vec![StateMutation::Notify(Notification::from_api_error(err))]
    }
}

#[cfg(test)]
mod tests {
    use alganews_core::sdk::ApiError;

    use super::*;
    use crate::common::TaskId;
    use crate::events::{CategoryEvent, EntryEvent, PaymentEvent, UserEvent};

    fn forbidden() -> ApiError {
        ApiError::from_response(403, r#"{"userMessage":"Acesso negado"}"#)
    }

    #[test]
    fn test_suppressed_rejections_produce_no_notification() {
        let notifier = RejectionNotifier::default();
        let events = [
            UiEvent::User(UserEvent::ListLoaded {
                task: TaskId(1),
                result: Err(forbidden()),
            }),
            UiEvent::Payment(PaymentEvent::ListLoaded {
                task: TaskId(2),
                result: Err(forbidden()),
            }),
            UiEvent::Entries(
                EntryType::Revenue,
                EntryEvent::ListLoaded {
                    task: TaskId(3),
                    result: Err(forbidden()),
                },
            ),
            UiEvent::Category(CategoryEvent::Mutated {
                action: ActionId::DeleteCategory,
                result: Err(forbidden()),
            }),
        ];

        for event in &events {
            assert!(notifier.observe(event).is_empty(), "{event:?}");
        }
    }

    #[test]
    fn test_other_rejection_produces_one_notification() {
        let notifier = RejectionNotifier::default();
        let event = UiEvent::Payment(PaymentEvent::Mutated {
            action: ActionId::ApprovePaymentsInBatch,
            result: Err(forbidden()),
        });

        let mutations = notifier.observe(&event);

        assert_eq!(mutations.len(), 1);
        let StateMutation::Notify(notification) = &mutations[0] else {
            panic!("expected a notification");
        };
        assert_eq!(notification.message, "Acesso negado");
    }

    #[test]
    fn test_non_rejections_are_ignored() {
        let notifier = RejectionNotifier::new([]);
        assert!(notifier.observe(&UiEvent::User(UserEvent::Fetch)).is_empty());
    }

    #[test]
    fn test_entry_removal_is_not_suppressed() {
        let notifier = RejectionNotifier::default();
        assert!(!notifier.is_suppressed(ActionId::RemoveEntry(EntryType::Expense)));
        assert!(notifier.is_suppressed(ActionId::CreateEntry(EntryType::Expense)));
    }
}
