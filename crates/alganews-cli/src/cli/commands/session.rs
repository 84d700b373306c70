//! Builds the admin runtime over the HTTP SDK and drives it from the terminal.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use alganews_admin::auth::{self, BootstrapPlan};
use alganews_admin::events::{ConfirmEvent, UiEvent};
use alganews_admin::overlays::{ConfirmPrompt, ConfirmStage, DoubleConfirm};
use alganews_admin::ui::NotificationKind;
use alganews_admin::{AdminRuntime, AdminSettings, AdminState, Route, RuntimeOptions, Store};
use alganews_core::auth::{FileTokenStore, HttpAuthClient, StoredSession, TokenStore};
use alganews_core::config::Config;
use alganews_core::sdk::{ApiError, HttpApi};
use anyhow::{Context, Result, bail};
use comfy_table::{ContentArrangement, Table};

const NOT_SIGNED_IN: &str = "Not signed in. Run `alganews login` first.";

pub type Runtime = AdminRuntime<HttpApi, HttpAuthClient>;

pub fn open(config: &Config, open_browser: bool) -> Result<Runtime> {
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new());
    let api = HttpApi::new(&config.api, Arc::clone(&tokens)).context("build API client")?;
    let auth = HttpAuthClient::new(&config.auth);
    let store = Store::new(AdminState::new(AdminSettings::from(config)));

    Ok(AdminRuntime::new(
        store,
        Arc::new(api),
        Arc::new(auth),
        tokens,
        RuntimeOptions {
            auth: config.auth.clone(),
            open_browser,
        },
    ))
}

/// Restores the stored session and fails unless it is signed in.
///
/// A session that can only be fixed by logging in again is rejected before
/// the runtime starts, so a pending `alganews login` is left untouched.
pub async fn signed_in(config: &Config) -> Result<Runtime> {
    let stored = FileTokenStore::new()
        .load()
        .context("read the stored session")?;
    if needs_login(&stored, chrono::Utc::now().timestamp()) {
        bail!(NOT_SIGNED_IN);
    }

    let mut runtime = open(config, false)?;
    runtime.bootstrap("/")?;
    runtime.settle().await;
    print_notifications(&mut runtime);

    if !runtime.state().auth.is_authenticated() {
        let mut message = NOT_SIGNED_IN.to_string();
        // A failed refresh started a new login.
        if let Some(url) = runtime.state().auth.login_url.as_deref() {
            message.push_str(&format!("\nLogin URL: {url}"));
        }
        bail!(message);
    }
    Ok(runtime)
}

fn needs_login(session: &StoredSession, now: i64) -> bool {
    matches!(
        auth::plan(&Route::Home, session, now),
        BootstrapPlan::RedirectToLogin { .. }
    )
}

/// Fails with the error of a listing whose failure was not notified.
pub fn ensure_loaded(error: Option<&ApiError>) -> Result<()> {
    match error {
        Some(err) if err.is_forbidden() => bail!("Access denied: {}", err.message()),
        Some(err) => bail!("{}", err.message()),
        None => Ok(()),
    }
}

/// Dispatches `event` and waits for everything it started.
pub async fn run(runtime: &mut Runtime, event: UiEvent) {
    runtime.dispatch(event);
    runtime.settle().await;
}

/// Prints pending notifications. Returns how many were errors.
pub fn print_notifications(runtime: &mut Runtime) -> usize {
    let mut errors = 0;
    for notification in runtime.state_mut().ui.take_notifications() {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            NotificationKind::Error => {
                errors += 1;
                eprintln!("error: {}", notification.message);
                if let Some(description) = &notification.description {
                    eprintln!("  {description}");
                }
                for detail in &notification.details {
                    eprintln!("  - {detail}");
                }
            }
        }
    }
    errors
}

/// Runs `action` behind both confirmation stages. Returns `false` if declined.
pub async fn confirm(
    runtime: &mut Runtime,
    prompt: ConfirmPrompt,
    action: UiEvent,
    assume_yes: bool,
) -> Result<bool> {
    runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Open {
        prompt,
        action: Box::new(action),
    }));

    while let Some(question) = runtime.state().overlay.as_ref().map(question) {
        let accepted = assume_yes || ask(&question)?;
        if !accepted {
            runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Cancel));
            println!("Cancelled.");
            return Ok(false);
        }
        runtime.dispatch(UiEvent::Confirm(ConfirmEvent::Accept));
    }
    runtime.settle().await;
    Ok(true)
}

fn question(dialog: &DoubleConfirm) -> String {
    match dialog.stage {
        ConfirmStage::PopConfirm => dialog.prompt.pop_confirm_title.clone(),
        ConfirmStage::Modal => format!(
            "{}\n{}\nContinue?",
            dialog.prompt.modal_title, dialog.prompt.modal_content
        ),
    }
}

fn ask(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read answer")?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}

pub fn table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn money(amount: f64) -> String {
    format!("R$ {amount:.2}")
}
