//! Expense, revenue and category commands.

use alganews_admin::events::{CategoryEvent, EntryEvent, UiEvent};
use alganews_admin::overlays::ConfirmPrompt;
use alganews_core::config::Config;
use alganews_core::sdk::cash_flow::{EntryQueryPatch, EntryType};
use anyhow::{Result, bail};

use super::session::{self, money, print_notifications};

pub async fn list(config: &Config, entry_type: EntryType, month: Option<String>) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    let event = match month {
        Some(year_month) => EntryEvent::SetQuery(EntryQueryPatch {
            year_month: Some(year_month),
            sort: None,
        }),
        None => EntryEvent::Fetch,
    };
    session::run(&mut runtime, UiEvent::Entries(entry_type, event)).await;
    print_notifications(&mut runtime);

    let entries = runtime.state().cash_flow.entries(entry_type);
    session::ensure_loaded(entries.list.error.as_ref())?;
    let mut table = session::table(["ID", "Description", "Category", "Date", "Amount"]);
    for entry in &entries.list.list {
        table.add_row([
            entry.id.to_string(),
            entry.description.clone(),
            entry
                .category
                .name
                .clone()
                .unwrap_or_else(|| entry.category.id.to_string()),
            entry.transacted_on.to_string(),
            money(entry.amount),
        ]);
    }
    println!("{table}");
    println!("{}: total {}", entries.list.query.year_month, money(entries.total()));
    Ok(())
}

pub async fn remove(config: &Config, entry_type: EntryType, ids: Vec<u64>, yes: bool) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    let prompt = ConfirmPrompt::remove_entries(entry_type, ids.len());
    let removed = session::confirm(
        &mut runtime,
        prompt,
        UiEvent::Entries(entry_type, EntryEvent::RemoveBatch(ids)),
        yes,
    )
    .await?;
    if print_notifications(&mut runtime) > 0 {
        bail!("request failed");
    }
    if removed {
        println!("Removed.");
    }
    Ok(())
}

pub async fn categories(config: &Config, entry_type: Option<EntryType>) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    session::run(&mut runtime, UiEvent::Category(CategoryEvent::Fetch)).await;
    print_notifications(&mut runtime);

    let state = &runtime.state().cash_flow.categories;
    session::ensure_loaded(state.list.error.as_ref())?;
    let categories = match entry_type {
        Some(entry_type) => state.of_type(entry_type),
        None => state.list.list.iter().collect(),
    };

    let mut table = session::table(["ID", "Name", "Type", "Entries", "Removable"]);
    for category in categories {
        table.add_row([
            category.id.to_string(),
            category.name.clone(),
            category.entry_type.as_str().to_string(),
            category.total_entries.to_string(),
            if category.can_be_deleted { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn remove_category(config: &Config, id: u64) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    session::run(&mut runtime, UiEvent::Category(CategoryEvent::Fetch)).await;
    print_notifications(&mut runtime);

    let categories = &runtime.state().cash_flow.categories;
    session::ensure_loaded(categories.list.error.as_ref())?;
    let removable = categories.find(id).map(|category| category.can_be_deleted);
    match removable {
        None => bail!("Category {id} not found"),
        Some(false) => bail!("Category {id} has entries and cannot be removed"),
        Some(true) => {}
    }

    session::run(&mut runtime, UiEvent::Category(CategoryEvent::Remove(id))).await;
    if print_notifications(&mut runtime) > 0 {
        bail!("request failed");
    }
    Ok(())
}
