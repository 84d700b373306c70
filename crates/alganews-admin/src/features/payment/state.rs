use alganews_core::sdk::PageMeta;
use alganews_core::sdk::payment::{PaymentDetailed, PaymentQuery, PaymentSummary};

use crate::features::slice::{DetailState, ListSlice};

#[derive(Debug, Clone, Default)]
pub struct PaymentState {
    pub list: ListSlice<PaymentSummary, PaymentQuery>,
    /// Pagination metadata of the last applied page.
    pub page: PageMeta,
    pub detail: DetailState<PaymentDetailed>,
}

impl PaymentState {
    pub fn find(&self, id: u64) -> Option<&PaymentSummary> {
        self.list.list.iter().find(|payment| payment.id == id)
    }
}
