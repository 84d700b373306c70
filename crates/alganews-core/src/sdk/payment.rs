//! Payment models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::BankAccount;
use super::{Id, Sort};

/// Payment recipient. Requests only carry the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Payee {
    pub fn id(id: Id) -> Self {
        Self {
            id,
            name: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingPeriod {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    pub title: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Earnings {
    pub words: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub id: Id,
    pub payee: Payee,
    pub accounting_period: AccountingPeriod,
    pub scheduled_to: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub can_be_approved: bool,
    #[serde(default)]
    pub can_be_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailed {
    #[serde(flatten)]
    pub summary: PaymentSummary,
    #[serde(default)]
    pub earnings: Earnings,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(default)]
    pub grand_total_amount: f64,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
}

/// Body of a payment scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub payee: Payee,
    pub accounting_period: AccountingPeriod,
    pub scheduled_to: NaiveDate,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

/// Body of a payment preview request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInput {
    pub payee: Payee,
    pub accounting_period: AccountingPeriod,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

/// Server-computed preview of a payment that has not been scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPreview {
    pub payee: Payee,
    pub accounting_period: AccountingPeriod,
    #[serde(default)]
    pub earnings: Earnings,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(default)]
    pub grand_total_amount: f64,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
}

/// Payment list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuery {
    /// `YYYY-MM`.
    pub scheduled_to_year_month: Option<String>,
    pub sort: Sort,
    pub page: u32,
    pub size: Option<u32>,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            scheduled_to_year_month: None,
            sort: Sort::desc("scheduledTo"),
            page: 0,
            size: None,
        }
    }
}

/// Partial update of a [`PaymentQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentQueryPatch {
    pub scheduled_to_year_month: Option<Option<String>>,
    pub sort: Option<Sort>,
    pub page: Option<u32>,
    pub size: Option<Option<u32>>,
}

impl PaymentQuery {
    pub fn merge(&mut self, patch: PaymentQueryPatch) {
        if let Some(month) = patch.scheduled_to_year_month {
            self.scheduled_to_year_month = month;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        if let Some(page) = patch.page {
            self.page = page;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
    }

    /// Query string pairs for `GET /payments`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort", self.sort.to_param()), ("page", self.page.to_string())];
        if let Some(month) = &self.scheduled_to_year_month {
            params.push(("scheduledToYearMonth", month.clone()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let mut query = PaymentQuery::default();
        query.merge(PaymentQueryPatch {
            page: Some(2),
            ..Default::default()
        });

        assert_eq!(query.page, 2);
        assert_eq!(query.sort, Sort::desc("scheduledTo"));
        assert_eq!(query.size, None);
    }

    #[test]
    fn test_params_include_month_filter() {
        let query = PaymentQuery {
            scheduled_to_year_month: Some("2021-07".to_string()),
            ..Default::default()
        };
        let params = query.to_params();

        assert!(params.contains(&("scheduledToYearMonth", "2021-07".to_string())));
        assert!(params.contains(&("sort", "scheduledTo,desc".to_string())));
    }
}
