//! Expenses, revenues and their categories.

mod state;
mod update;

pub use state::{CashFlowState, CategoryState, EntrySlice};
pub use update::{handle_category_event, handle_entry_event};
