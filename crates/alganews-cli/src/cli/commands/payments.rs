//! Payment commands, including the scheduling form.

use alganews_admin::Route;
use alganews_admin::events::{PaymentEvent, PaymentFormEvent, UiEvent};
use alganews_admin::overlays::ConfirmPrompt;
use alganews_core::config::Config;
use alganews_core::sdk::payment::{Bonus, PaymentPreview, PaymentQueryPatch};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use super::session::{self, Runtime, money, print_notifications};

/// Form values given on the command line.
#[derive(Debug, Clone)]
pub struct Draft {
    pub payee: u64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub bonuses: Vec<Bonus>,
}

/// Parses `TITLE=AMOUNT`.
pub fn parse_bonus(raw: &str) -> Result<Bonus> {
    let (title, amount) = raw
        .split_once('=')
        .with_context(|| format!("bonus '{raw}' must look like TITLE=AMOUNT"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid bonus amount in '{raw}'"))?;
    Ok(Bonus {
        title: title.trim().to_string(),
        amount,
    })
}

pub async fn list(config: &Config, month: Option<String>, page: u32) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    let patch = PaymentQueryPatch {
        scheduled_to_year_month: Some(month),
        page: Some(page),
        ..Default::default()
    };
    session::run(&mut runtime, UiEvent::Payment(PaymentEvent::SetQuery(patch))).await;
    print_notifications(&mut runtime);

    let payments = &runtime.state().payments;
    session::ensure_loaded(payments.list.error.as_ref())?;
    let mut table = session::table(["ID", "Payee", "Period", "Scheduled to", "Approved"]);
    for payment in &payments.list.list {
        table.add_row([
            payment.id.to_string(),
            payment.payee.name.clone().unwrap_or_else(|| payment.payee.id.to_string()),
            format!(
                "{} - {}",
                payment.accounting_period.starts_on, payment.accounting_period.ends_on
            ),
            payment.scheduled_to.to_string(),
            payment
                .approved_at
                .map_or_else(|| "pending".to_string(), |at| at.date_naive().to_string()),
        ]);
    }
    println!("{table}");
    println!(
        "Page {} of {} ({} payments)",
        payments.page.number + 1,
        payments.page.total_pages.max(1),
        payments.page.total_elements
    );
    Ok(())
}

pub async fn show(config: &Config, id: u64) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    session::run(&mut runtime, UiEvent::Navigate(Route::PaymentDetail(id))).await;

    let detail = &runtime.state().payments.detail;
    if detail.not_found {
        bail!("Payment {id} not found");
    }
    let Some(payment) = detail.value.clone() else {
        print_notifications(&mut runtime);
        bail!("Could not load payment {id}");
    };

    let mut table = session::table(["Field", "Value"]);
    table.add_row(["Payee".to_string(), payment.summary.payee.name.clone().unwrap_or_default()]);
    table.add_row(["Scheduled to".to_string(), payment.summary.scheduled_to.to_string()]);
    table.add_row(["Words".to_string(), payment.earnings.words.to_string()]);
    table.add_row(["Earnings".to_string(), money(payment.earnings.total_amount)]);
    for bonus in &payment.bonuses {
        table.add_row([format!("Bonus: {}", bonus.title), money(bonus.amount)]);
    }
    table.add_row(["Total".to_string(), money(payment.grand_total_amount)]);
    println!("{table}");
    Ok(())
}

pub async fn approve(config: &Config, ids: Vec<u64>, yes: bool) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    let prompt = ConfirmPrompt::approve_payments(ids.len());
    session::confirm(
        &mut runtime,
        prompt,
        UiEvent::Payment(PaymentEvent::ApproveBatch(ids)),
        yes,
    )
    .await?;
    finish(&mut runtime)
}

pub async fn remove(config: &Config, id: u64, yes: bool) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    let removed = session::confirm(
        &mut runtime,
        ConfirmPrompt::remove_payment(),
        UiEvent::Payment(PaymentEvent::Remove(id)),
        yes,
    )
    .await?;
    finish(&mut runtime)?;
    if removed {
        println!("Removed payment {id}.");
    }
    Ok(())
}

pub async fn preview(config: &Config, draft: &Draft) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    fill_form(&mut runtime, draft).await;
    print_notifications(&mut runtime);

    let form = &runtime.state().payment_form;
    if let Some(err) = &form.preview_error {
        bail!("{}", err.message());
    }
    let preview = form.preview.clone().context("no preview was returned")?;
    print_preview(&preview);
    Ok(())
}

pub async fn schedule(config: &Config, draft: &Draft, date: NaiveDate) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    fill_form(&mut runtime, draft).await;
    runtime.dispatch(UiEvent::PaymentForm(PaymentFormEvent::SetScheduledTo(Some(date))));
    session::run(&mut runtime, UiEvent::PaymentForm(PaymentFormEvent::Submit)).await;
    finish(&mut runtime)
}

/// Opens a fresh form, fills it and waits for the debounced preview.
async fn fill_form(runtime: &mut Runtime, draft: &Draft) {
    session::run(runtime, UiEvent::Navigate(Route::PaymentCreate)).await;
    let events = [
        PaymentFormEvent::SetPayee(Some(draft.payee)),
        PaymentFormEvent::SetAccountingPeriod {
            starts_on: Some(draft.starts_on),
            ends_on: Some(draft.ends_on),
        },
        PaymentFormEvent::SetBonuses(draft.bonuses.clone()),
    ];
    for event in events {
        runtime.dispatch(UiEvent::PaymentForm(event));
    }
    runtime.settle().await;
}

fn print_preview(preview: &PaymentPreview) {
    let mut table = session::table(["Field", "Value"]);
    table.add_row([
        "Period".to_string(),
        format!(
            "{} - {}",
            preview.accounting_period.starts_on, preview.accounting_period.ends_on
        ),
    ]);
    table.add_row(["Words".to_string(), preview.earnings.words.to_string()]);
    table.add_row(["Earnings".to_string(), money(preview.earnings.total_amount)]);
    for bonus in &preview.bonuses {
        table.add_row([format!("Bonus: {}", bonus.title), money(bonus.amount)]);
    }
    table.add_row(["Total".to_string(), money(preview.grand_total_amount)]);
    println!("{table}");
}

fn finish(runtime: &mut Runtime) -> Result<()> {
    if print_notifications(runtime) > 0 {
        bail!("request failed");
    }
    Ok(())
}
