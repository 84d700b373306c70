//! Stable identifiers of asynchronous actions.
//!
//! Identifiers keep the `slice/actionName` shape so logs and the suppression
//! list read the same across slices.

use std::fmt;

use alganews_core::sdk::cash_flow::EntryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    // user
    GetAllUsers,
    GetDetailedUser,
    CreateUser,
    UpdateUser,
    ToggleUserStatus,
    // payment
    GetAllPayments,
    GetPaymentDetailed,
    ApprovePaymentsInBatch,
    RemovePayment,
    SchedulePayment,
    PreviewPayment,
    // cash flow
    GetEntries(EntryType),
    GetEntryDetailed(EntryType),
    CreateEntry(EntryType),
    UpdateEntry(EntryType),
    RemoveEntry(EntryType),
    RemoveEntriesInBatch(EntryType),
    GetCategories,
    CreateCategory,
    DeleteCategory,
    // auth
    FetchUser,
    ExchangeCode,
    RefreshToken,
    // home
    GetLatestPosts,
    GetMonthlyRevenuesExpenses,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        use EntryType::{Expense, Revenue};

        match self {
            ActionId::GetAllUsers => "user/getAllUsers",
            ActionId::GetDetailedUser => "user/getDetailedUser",
            ActionId::CreateUser => "user/createUser",
            ActionId::UpdateUser => "user/updateUser",
            ActionId::ToggleUserStatus => "user/toggleUserStatus",
            ActionId::GetAllPayments => "payment/getAllPayments",
            ActionId::GetPaymentDetailed => "payment/getPaymentDetailed",
            ActionId::ApprovePaymentsInBatch => "payment/approvePaymentsInBatch",
            ActionId::RemovePayment => "payment/removePayment",
            ActionId::SchedulePayment => "payment/schedulePayment",
            ActionId::PreviewPayment => "payment/previewPayment",
            ActionId::GetEntries(Expense) => "cash-flow/expenses/getExpenses",
            ActionId::GetEntries(Revenue) => "cash-flow/revenues/getRevenues",
            ActionId::GetEntryDetailed(Expense) => "cash-flow/expenses/getExpenseDetailed",
            ActionId::GetEntryDetailed(Revenue) => "cash-flow/revenues/getRevenueDetailed",
            ActionId::CreateEntry(Expense) => "cash-flow/expenses/createExpense",
            ActionId::CreateEntry(Revenue) => "cash-flow/revenues/createRevenue",
            ActionId::UpdateEntry(Expense) => "cash-flow/expenses/updateExpense",
            ActionId::UpdateEntry(Revenue) => "cash-flow/revenues/updateRevenue",
            ActionId::RemoveEntry(Expense) => "cash-flow/expenses/removeExpense",
            ActionId::RemoveEntry(Revenue) => "cash-flow/revenues/removeRevenue",
            ActionId::RemoveEntriesInBatch(Expense) => "cash-flow/expenses/removeEntriesInBatch",
            ActionId::RemoveEntriesInBatch(Revenue) => "cash-flow/revenues/removeEntriesInBatch",
            ActionId::GetCategories => "cash-flow/categories/getCategories",
            ActionId::CreateCategory => "cash-flow/categories/createCategory",
            ActionId::DeleteCategory => "cash-flow/categories/deleteCategory",
            ActionId::FetchUser => "auth/fetchUser",
            ActionId::ExchangeCode => "auth/exchangeCode",
            ActionId::RefreshToken => "auth/refreshToken",
            ActionId::GetLatestPosts => "home/getLatestPosts",
            ActionId::GetMonthlyRevenuesExpenses => "home/getMonthlyRevenuesExpenses",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_actions_are_namespaced_by_type() {
        assert_eq!(
            ActionId::GetEntries(EntryType::Expense).as_str(),
            "cash-flow/expenses/getExpenses"
        );
        assert_eq!(
            ActionId::CreateEntry(EntryType::Revenue).to_string(),
            "cash-flow/revenues/createRevenue"
        );
    }
}
