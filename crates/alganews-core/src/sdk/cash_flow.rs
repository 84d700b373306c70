//! Cash-flow entries and categories.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, Sort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Expense,
    Revenue,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Expense => "EXPENSE",
            EntryType::Revenue => "REVENUE",
        }
    }
}

/// Reference to a category or a user inside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn id(id: Id) -> Self {
        Self { id, name: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: Id,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub description: String,
    pub amount: f64,
    pub transacted_on: NaiveDate,
    pub category: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetailed {
    #[serde(flatten)]
    pub summary: EntrySummary,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<Reference>,
    #[serde(default)]
    pub updated_by: Option<Reference>,
}

/// Body of entry creation and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub description: String,
    pub amount: f64,
    pub transacted_on: NaiveDate,
    pub category: Reference,
}

/// Current month in the `YYYY-MM` format the API filters by.
pub fn current_year_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Entry list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub entry_type: EntryType,
    /// `YYYY-MM`.
    pub year_month: String,
    pub sort: Sort,
}

impl EntryQuery {
    pub fn new(entry_type: EntryType, year_month: &str) -> Self {
        Self {
            entry_type,
            year_month: year_month.to_string(),
            sort: Sort::desc("transactedOn"),
        }
    }

    /// Query for the current month.
    pub fn current(entry_type: EntryType) -> Self {
        Self::new(entry_type, &current_year_month())
    }

    pub fn merge(&mut self, patch: EntryQueryPatch) {
        if let Some(year_month) = patch.year_month {
            self.year_month = year_month;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.entry_type.as_str().to_string()),
            ("yearMonth", self.year_month.clone()),
            ("sort", self.sort.to_param()),
        ]
    }
}

/// Partial update of an [`EntryQuery`]. The entry type is fixed per slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQueryPatch {
    pub year_month: Option<String>,
    pub sort: Option<Sort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub total_entries: u64,
    #[serde(default)]
    pub can_be_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Category list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    pub sort: Sort,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            sort: Sort::asc("name"),
        }
    }
}

impl CategoryQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![("sort", self.sort.to_param())]
    }
}
