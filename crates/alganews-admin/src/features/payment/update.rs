use alganews_core::sdk::Page;
use tracing::debug;

use super::PaymentState;
use crate::actions::ActionId;
use crate::common::TaskSeq;
use crate::effects::{ApiCall, UiEffect};
use crate::events::PaymentEvent;
use crate::features::slice::FetchOutcome;
use crate::mutations::StateMutation;
use crate::ui::Notification;

pub fn handle_payment_event(
    payments: &mut PaymentState,
    tasks: &mut TaskSeq,
    event: PaymentEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        PaymentEvent::Fetch => (vec![fetch_payments(payments, tasks)], vec![]),
        PaymentEvent::SetQuery(patch) => {
            payments.list.set_query(patch);
            (vec![fetch_payments(payments, tasks)], vec![])
        }
        PaymentEvent::ListLoaded { task, result } => {
            let (result, meta) = match result.map(Page::into_parts) {
                Ok((content, meta)) => (Ok(content), Some(meta)),
                Err(err) => (Err(err), None),
            };
            if payments.list.finish_fetch(task, result) == FetchOutcome::Applied
                && let Some(meta) = meta
            {
                payments.page = meta;
            }
            (vec![], vec![])
        }
        PaymentEvent::SetSelected(ids) => {
            payments.list.set_selected(ids);
            (vec![], vec![])
        }
        PaymentEvent::FetchDetail { id } => {
            let task = payments.detail.begin(tasks);
            (vec![UiEffect::api(ApiCall::FetchPayment { task, id })], vec![])
        }
        PaymentEvent::DetailLoaded { task, result } => {
            payments.detail.finish(task, result);
            (vec![], vec![])
        }
        PaymentEvent::ApproveBatch(ids) => {
            if ids.is_empty() {
                return (vec![], vec![]);
            }
            payments.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::ApprovePayments { ids })], vec![])
        }
        PaymentEvent::Remove(id) => {
            if payments.find(id).is_some_and(|payment| !payment.can_be_deleted) {
                debug!(id, "payment already approved, not removing");
                return (vec![], vec![]);
            }
            payments.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::RemovePayment { id })], vec![])
        }
        PaymentEvent::Mutated { action, result } => {
            payments.list.finish_mutation();
            if result.is_err() {
                return (vec![], vec![]);
            }
            let mut mutations = Vec::new();
            if action == ActionId::ApprovePaymentsInBatch {
                payments.list.selected.clear();
                mutations.push(StateMutation::Notify(Notification::success(
                    "Pagamentos aprovados com sucesso",
                )));
            }
            (vec![fetch_payments(payments, tasks)], mutations)
        }
    }
}

fn fetch_payments(payments: &mut PaymentState, tasks: &mut TaskSeq) -> UiEffect {
    let (task, query) = payments.list.begin_fetch(tasks);
    UiEffect::api(ApiCall::FetchPayments { task, query })
}

#[cfg(test)]
mod tests {
    use alganews_core::sdk::payment::{PaymentQueryPatch, PaymentSummary};
    use alganews_core::sdk::{PageMeta, Sort};

    use super::*;

    fn payment(id: u64, can_be_deleted: bool) -> PaymentSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "payee": {"id": 1, "name": "Ana"},
            "accountingPeriod": {"startsOn": "2021-06-01", "endsOn": "2021-06-30"},
            "scheduledTo": "2021-07-05",
            "canBeApproved": can_be_deleted,
            "canBeDeleted": can_be_deleted
        }))
        .unwrap()
    }

    #[test]
    fn test_set_query_keeps_sort_and_fetches_once() {
        let mut payments = PaymentState::default();
        let mut tasks = TaskSeq::default();

        let (effects, _) = handle_payment_event(
            &mut payments,
            &mut tasks,
            PaymentEvent::SetQuery(PaymentQueryPatch {
                scheduled_to_year_month: Some(Some("2024-03".to_string())),
                ..Default::default()
            }),
        );

        assert_eq!(effects.len(), 1);
        let UiEffect::Api(ApiCall::FetchPayments { query, .. }) = &effects[0] else {
            panic!("expected a payments fetch");
        };
        assert_eq!(query.scheduled_to_year_month.as_deref(), Some("2024-03"));
        assert_eq!(query.sort, Sort::desc("scheduledTo"));
    }

    #[test]
    fn test_page_meta_applied_with_content() {
        let mut payments = PaymentState::default();
        let mut tasks = TaskSeq::default();
        let (task, _) = payments.list.begin_fetch(&mut tasks);

        let page = Page {
            content: vec![payment(2, true), payment(1, false)],
            meta: PageMeta {
                number: 0,
                size: 2,
                total_elements: 5,
                total_pages: 3,
            },
        };
        handle_payment_event(
            &mut payments,
            &mut tasks,
            PaymentEvent::ListLoaded {
                task,
                result: Ok(page),
            },
        );

        let ids: Vec<u64> = payments.list.list.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(payments.page.total_pages, 3);
        assert!(!payments.list.fetching);
    }

    #[test]
    fn test_remove_of_approved_payment_is_ignored() {
        let mut payments = PaymentState::default();
        let mut tasks = TaskSeq::default();
        payments.list.list = vec![payment(7, false)];

        let (effects, _) =
            handle_payment_event(&mut payments, &mut tasks, PaymentEvent::Remove(7));

        assert!(effects.is_empty());
        assert!(!payments.list.fetching);
    }

    #[test]
    fn test_approval_refetches_and_clears_selection() {
        let mut payments = PaymentState::default();
        let mut tasks = TaskSeq::default();
        payments.list.set_selected([1, 2]);

        let (effects, _) = handle_payment_event(
            &mut payments,
            &mut tasks,
            PaymentEvent::ApproveBatch(vec![1, 2]),
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Api(ApiCall::ApprovePayments { ids })] if ids == &vec![1, 2]
        ));

        let (effects, mutations) = handle_payment_event(
            &mut payments,
            &mut tasks,
            PaymentEvent::Mutated {
                action: ActionId::ApprovePaymentsInBatch,
                result: Ok(()),
            },
        );
        let fetches = effects
            .iter()
            .filter(|e| matches!(e, UiEffect::Api(ApiCall::FetchPayments { .. })))
            .count();
        assert_eq!(fetches, 1);
        assert_eq!(mutations.len(), 1);
        assert!(payments.list.selected.is_empty());
    }

    #[test]
    fn test_set_selected_replaces_selection() {
        let mut payments = PaymentState::default();
        let mut tasks = TaskSeq::default();
        payments.list.set_selected([1, 2]);

        let (effects, _) = handle_payment_event(
            &mut payments,
            &mut tasks,
            PaymentEvent::SetSelected(vec![3, 2]),
        );

        assert!(effects.is_empty());
        let selected: Vec<u64> = payments.list.selected.iter().copied().collect();
        assert_eq!(selected, vec![2, 3]);
    }
}
