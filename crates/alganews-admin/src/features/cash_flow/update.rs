use alganews_core::sdk::cash_flow::EntryType;
use tracing::debug;

use super::{CashFlowState, CategoryState, EntrySlice};
use crate::actions::ActionId;
use crate::common::TaskSeq;
use crate::effects::{ApiCall, UiEffect};
use crate::events::{CategoryEvent, EntryEvent};
use crate::mutations::StateMutation;
use crate::ui::Notification;

/// Handles an event of the expense or revenue slice.
pub fn handle_entry_event(
    cash_flow: &mut CashFlowState,
    tasks: &mut TaskSeq,
    entry_type: EntryType,
    event: EntryEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let entries = cash_flow.entries_mut(entry_type);

    match event {
        EntryEvent::Fetch => (vec![fetch_entries(entries, tasks)], vec![]),
        EntryEvent::SetQuery(patch) => {
            entries.list.set_query(patch);
            (vec![fetch_entries(entries, tasks)], vec![])
        }
        EntryEvent::ListLoaded { task, result } => {
            entries.list.finish_fetch(task, result);
            (vec![], vec![])
        }
        EntryEvent::SetSelected(ids) => {
            entries.list.set_selected(ids);
            (vec![], vec![])
        }
        EntryEvent::FetchDetail { id } => {
            let task = entries.detail.begin(tasks);
            (
                vec![UiEffect::api(ApiCall::FetchEntry {
                    task,
                    entry_type,
                    id,
                })],
                vec![],
            )
        }
        EntryEvent::DetailLoaded { task, result } => {
            entries.detail.finish(task, result);
            (vec![], vec![])
        }
        EntryEvent::Create(mut input) => {
            input.entry_type = entry_type;
            entries.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::CreateEntry { input })], vec![])
        }
        EntryEvent::Update { id, mut input } => {
            input.entry_type = entry_type;
            entries.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::UpdateEntry { id, input })], vec![])
        }
        EntryEvent::Remove(id) => {
            entries.list.begin_mutation();
            (
                vec![UiEffect::api(ApiCall::RemoveEntry { entry_type, id })],
                vec![],
            )
        }
        EntryEvent::RemoveBatch(ids) => {
            if ids.is_empty() {
                return (vec![], vec![]);
            }
            entries.list.begin_mutation();
            (
                vec![UiEffect::api(ApiCall::RemoveEntries { entry_type, ids })],
                vec![],
            )
        }
        EntryEvent::Mutated { action, result } => {
            entries.list.finish_mutation();
            if result.is_err() {
                return (vec![], vec![]);
            }
            let message = match action {
                ActionId::CreateEntry(_) => Some("Entrada cadastrada com sucesso"),
                ActionId::UpdateEntry(_) => Some("Entrada atualizada com sucesso"),
                ActionId::RemoveEntriesInBatch(_) => {
                    entries.list.selected.clear();
                    None
                }
                _ => None,
            };
            let mutations = message
                .map(|m| StateMutation::Notify(Notification::success(m)))
                .into_iter()
                .collect();
            (vec![fetch_entries(entries, tasks)], mutations)
        }
    }
}

pub fn handle_category_event(
    categories: &mut CategoryState,
    tasks: &mut TaskSeq,
    event: CategoryEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    match event {
        CategoryEvent::Fetch => (vec![fetch_categories(categories, tasks)], vec![]),
        CategoryEvent::SetSort(sort) => {
            categories.list.set_query(sort);
            (vec![fetch_categories(categories, tasks)], vec![])
        }
        CategoryEvent::ListLoaded { task, result } => {
            categories.list.finish_fetch(task, result);
            (vec![], vec![])
        }
        CategoryEvent::Create(input) => {
            categories.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::CreateCategory { input })], vec![])
        }
        CategoryEvent::Remove(id) => {
            // Deletability is decided by the server; unknown ids are not removed.
            if !categories.find(id).is_some_and(|category| category.can_be_deleted) {
                debug!(id, "category cannot be deleted");
                return (vec![], vec![]);
            }
            categories.list.begin_mutation();
            (vec![UiEffect::api(ApiCall::RemoveCategory { id })], vec![])
        }
        CategoryEvent::Mutated { action, result } => {
            categories.list.finish_mutation();
            if result.is_err() {
                return (vec![], vec![]);
            }
            let message = match action {
                ActionId::CreateCategory => "Categoria cadastrada com sucesso",
                _ => "Categoria removida com sucesso",
            };
            (
                vec![fetch_categories(categories, tasks)],
                vec![StateMutation::Notify(Notification::success(message))],
            )
        }
    }
}

fn fetch_entries(entries: &mut EntrySlice, tasks: &mut TaskSeq) -> UiEffect {
    let (task, query) = entries.list.begin_fetch(tasks);
    UiEffect::api(ApiCall::FetchEntries { task, query })
}

fn fetch_categories(categories: &mut CategoryState, tasks: &mut TaskSeq) -> UiEffect {
    let (task, query) = categories.list.begin_fetch(tasks);
    UiEffect::api(ApiCall::FetchCategories { task, query })
}
