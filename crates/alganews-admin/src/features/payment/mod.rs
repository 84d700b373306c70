mod form;
mod state;
mod update;

pub use form::{PaymentDraft, PaymentFormState, handle_payment_form_event};
pub use state::PaymentState;
pub use update::handle_payment_event;
