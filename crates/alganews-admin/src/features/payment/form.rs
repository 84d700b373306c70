//! Payment scheduling form with a debounced server preview.

use std::time::Duration;

use alganews_core::sdk::payment::{
    AccountingPeriod, Bonus, Payee, PaymentInput, PaymentPreview, PreviewInput,
};
use alganews_core::sdk::{ApiError, ApiErrorKind, Id};
use chrono::NaiveDate;
use tracing::debug;

use crate::common::{TaskSeq, TaskState};
use crate::effects::{ApiCall, UiEffect};
use crate::events::{PaymentFormEvent, UiEvent};
use crate::mutations::StateMutation;
use crate::routes::Route;
use crate::ui::Notification;

/// Form fields as edited so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDraft {
    pub payee_id: Option<Id>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub scheduled_to: Option<NaiveDate>,
    pub bonuses: Vec<Bonus>,
}

impl PaymentDraft {
    fn accounting_period(&self) -> Option<AccountingPeriod> {
        Some(AccountingPeriod {
            starts_on: self.starts_on?,
            ends_on: self.ends_on?,
        })
    }

    /// Preview request, once payee and accounting period are filled.
    pub fn preview_input(&self) -> Option<PreviewInput> {
        Some(PreviewInput {
            payee: Payee::id(self.payee_id?),
            accounting_period: self.accounting_period()?,
            bonuses: self.bonuses.clone(),
        })
    }

    pub fn payment_input(&self) -> Option<PaymentInput> {
        Some(PaymentInput {
            payee: Payee::id(self.payee_id?),
            accounting_period: self.accounting_period()?,
            scheduled_to: self.scheduled_to?,
            bonuses: self.bonuses.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFormState {
    pub draft: PaymentDraft,
    pub preview: Option<PaymentPreview>,
    /// Business rejection of the last preview, shown inline.
    pub preview_error: Option<ApiError>,
    pub fetching_preview: bool,
    pub scheduling: bool,
    debounce: TaskState,
    preview_task: TaskState,
}

impl PaymentFormState {
    fn clear_preview(&mut self) {
        self.preview = None;
        self.preview_error = None;
        self.fetching_preview = false;
        self.preview_task.clear();
    }
}

pub fn handle_payment_form_event(
    form: &mut PaymentFormState,
    tasks: &mut TaskSeq,
    debounce: Duration,
    event: PaymentFormEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        PaymentFormEvent::Reset => {
            *form = PaymentFormState::default();
            (vec![], vec![])
        }
        PaymentFormEvent::SetPayee(payee_id) => {
            form.draft.payee_id = payee_id;
            (vec![schedule_preview(form, tasks, debounce)], vec![])
        }
        PaymentFormEvent::SetAccountingPeriod { starts_on, ends_on } => {
            form.draft.starts_on = starts_on;
            form.draft.ends_on = ends_on;
            (vec![schedule_preview(form, tasks, debounce)], vec![])
        }
        PaymentFormEvent::SetBonuses(bonuses) => {
            form.draft.bonuses = bonuses;
            (vec![schedule_preview(form, tasks, debounce)], vec![])
        }
        PaymentFormEvent::SetScheduledTo(date) => {
            form.draft.scheduled_to = date;
            (vec![], vec![])
        }
        PaymentFormEvent::DebounceElapsed { task } => {
            if !form.debounce.finish_if_active(task) {
                debug!(task = task.0, "superseded preview debounce");
                return (vec![], vec![]);
            }
            let Some(input) = form.draft.preview_input() else {
                form.clear_preview();
                return (vec![], vec![]);
            };
            let task = form.preview_task.begin(tasks);
            form.fetching_preview = true;
            (
                vec![UiEffect::api(ApiCall::PreviewPayment { task, input })],
                vec![],
            )
        }
        PaymentFormEvent::PreviewLoaded { task, result } => {
            if !form.preview_task.finish_if_active(task) {
                debug!(task = task.0, "discarding stale payment preview");
                return (vec![], vec![]);
            }
            form.fetching_preview = false;
            match result {
                Ok(preview) => {
                    form.preview = Some(preview);
                    form.preview_error = None;
                }
                Err(err) => {
                    form.preview = None;
                    form.preview_error = (err.kind() == ApiErrorKind::Business).then_some(err);
                }
            }
            (vec![], vec![])
        }
        PaymentFormEvent::Submit => {
            if form.scheduling {
                return (vec![], vec![]);
            }
            let Some(input) = form.draft.payment_input() else {
                return (
                    vec![],
                    vec![StateMutation::Notify(Notification::error(
                        "Preencha os campos obrigatórios",
                    ))],
                );
            };
            form.scheduling = true;
            (vec![UiEffect::api(ApiCall::SchedulePayment { input })], vec![])
        }
        PaymentFormEvent::Scheduled { result } => {
            form.scheduling = false;
            if result.is_err() {
                return (vec![], vec![]);
            }
            *form = PaymentFormState::default();
            (
                vec![],
                vec![
                    StateMutation::Notify(Notification::success("Pagamento agendado com sucesso")),
                    StateMutation::Navigate(Route::Payments),
                ],
            )
        }
    }
}

/// Restarts the debounce timer; only the latest timer triggers a preview.
fn schedule_preview(form: &mut PaymentFormState, tasks: &mut TaskSeq, delay: Duration) -> UiEffect {
    let task = form.debounce.begin(tasks);
    UiEffect::Debounce {
        delay,
        event: Box::new(UiEvent::PaymentForm(PaymentFormEvent::DebounceElapsed { task })),
    }
}
