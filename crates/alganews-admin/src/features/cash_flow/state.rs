use alganews_core::sdk::Id;
use alganews_core::sdk::cash_flow::{
    CategoryQuery, CategorySummary, EntryDetailed, EntryQuery, EntrySummary, EntryType,
};

use crate::features::slice::{DetailState, ListSlice};

/// Entries of one fixed type.
#[derive(Debug, Clone)]
pub struct EntrySlice {
    pub list: ListSlice<EntrySummary, EntryQuery>,
    /// Entry being edited or inspected.
    pub detail: DetailState<EntryDetailed>,
}

impl EntrySlice {
    /// Slice filtered to the current month.
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            list: ListSlice::new(EntryQuery::current(entry_type)),
            detail: DetailState::default(),
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.list.query.entry_type
    }

    /// Sum of the listed amounts.
    pub fn total(&self) -> f64 {
        self.list.list.iter().map(|entry| entry.amount).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryState {
    pub list: ListSlice<CategorySummary, CategoryQuery>,
}

impl CategoryState {
    pub fn expenses(&self) -> Vec<&CategorySummary> {
        self.of_type(EntryType::Expense)
    }

    pub fn revenues(&self) -> Vec<&CategorySummary> {
        self.of_type(EntryType::Revenue)
    }

    pub fn of_type(&self, entry_type: EntryType) -> Vec<&CategorySummary> {
        self.list
            .list
            .iter()
            .filter(|category| category.entry_type == entry_type)
            .collect()
    }

    pub fn find(&self, id: Id) -> Option<&CategorySummary> {
        self.list.list.iter().find(|category| category.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct CashFlowState {
    pub expenses: EntrySlice,
    pub revenues: EntrySlice,
    pub categories: CategoryState,
}

impl Default for CashFlowState {
    fn default() -> Self {
        Self {
            expenses: EntrySlice::new(EntryType::Expense),
            revenues: EntrySlice::new(EntryType::Revenue),
            categories: CategoryState::default(),
        }
    }
}

impl CashFlowState {
    pub fn entries(&self, entry_type: EntryType) -> &EntrySlice {
        match entry_type {
            EntryType::Expense => &self.expenses,
            EntryType::Revenue => &self.revenues,
        }
    }

    pub fn entries_mut(&mut self, entry_type: EntryType) -> &mut EntrySlice {
        match entry_type {
            EntryType::Expense => &mut self.expenses,
            EntryType::Revenue => &mut self.revenues,
        }
    }
}
