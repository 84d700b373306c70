use std::future::Future;

use super::cash_flow::{
    CategoryInput, CategoryQuery, CategorySummary, EntryDetailed, EntryInput, EntryQuery,
    EntrySummary,
};
use super::metric::MonthlyRevenueExpense;
use super::payment::{
    PaymentDetailed, PaymentInput, PaymentPreview, PaymentQuery, PaymentSummary, PreviewInput,
};
use super::post::{PostQuery, PostSummary};
use super::user::{UserDetailed, UserInput, UserSummary};
use super::{ApiResult, Id, Page};

/// Operations of the AlgaNews remote API.
///
/// Every call is one request. Nothing is cached or retried here.
pub trait AlgaNewsApi: Send + Sync + 'static {
    // users
    fn list_users(&self) -> impl Future<Output = ApiResult<Vec<UserSummary>>> + Send;
    fn get_user(&self, id: Id) -> impl Future<Output = ApiResult<UserDetailed>> + Send;
    fn create_user(&self, input: UserInput)
    -> impl Future<Output = ApiResult<UserDetailed>> + Send;
    fn update_user(
        &self,
        id: Id,
        input: UserInput,
    ) -> impl Future<Output = ApiResult<UserDetailed>> + Send;
    fn activate_user(&self, id: Id) -> impl Future<Output = ApiResult<()>> + Send;
    fn deactivate_user(&self, id: Id) -> impl Future<Output = ApiResult<()>> + Send;

    // payments
    fn list_payments(
        &self,
        query: PaymentQuery,
    ) -> impl Future<Output = ApiResult<Page<PaymentSummary>>> + Send;
    fn get_payment(&self, id: Id) -> impl Future<Output = ApiResult<PaymentDetailed>> + Send;
    fn schedule_payment(
        &self,
        input: PaymentInput,
    ) -> impl Future<Output = ApiResult<PaymentDetailed>> + Send;
    fn remove_payment(&self, id: Id) -> impl Future<Output = ApiResult<()>> + Send;
    fn approve_payments(&self, ids: Vec<Id>) -> impl Future<Output = ApiResult<()>> + Send;
    fn preview_payment(
        &self,
        input: PreviewInput,
    ) -> impl Future<Output = ApiResult<PaymentPreview>> + Send;

    // cash flow
    fn list_entries(
        &self,
        query: EntryQuery,
    ) -> impl Future<Output = ApiResult<Vec<EntrySummary>>> + Send;
    fn get_entry(&self, id: Id) -> impl Future<Output = ApiResult<EntryDetailed>> + Send;
    fn create_entry(
        &self,
        input: EntryInput,
    ) -> impl Future<Output = ApiResult<EntryDetailed>> + Send;
    fn update_entry(
        &self,
        id: Id,
        input: EntryInput,
    ) -> impl Future<Output = ApiResult<EntryDetailed>> + Send;
    fn remove_entry(&self, id: Id) -> impl Future<Output = ApiResult<()>> + Send;
    fn remove_entries(&self, ids: Vec<Id>) -> impl Future<Output = ApiResult<()>> + Send;
    fn list_categories(
        &self,
        query: CategoryQuery,
    ) -> impl Future<Output = ApiResult<Vec<CategorySummary>>> + Send;
    fn create_category(
        &self,
        input: CategoryInput,
    ) -> impl Future<Output = ApiResult<CategorySummary>> + Send;
    fn remove_category(&self, id: Id) -> impl Future<Output = ApiResult<()>> + Send;

    // metrics and posts
    fn monthly_revenues_expenses(
        &self,
    ) -> impl Future<Output = ApiResult<Vec<MonthlyRevenueExpense>>> + Send;
    fn list_posts(
        &self,
        query: PostQuery,
    ) -> impl Future<Output = ApiResult<Page<PostSummary>>> + Send;
}
