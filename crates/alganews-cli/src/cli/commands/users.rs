use alganews_admin::Route;
use alganews_admin::events::UiEvent;
use alganews_core::config::Config;
use anyhow::Result;

use super::session::{self, print_notifications};

pub async fn list(config: &Config) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    session::run(&mut runtime, UiEvent::Navigate(Route::Users)).await;
    print_notifications(&mut runtime);

    let users = &runtime.state().users.list;
    // Failed listings are not notified; report them here.
    session::ensure_loaded(users.error.as_ref())?;

    let mut table = session::table(["ID", "Name", "E-mail", "Role", "Active"]);
    for user in &users.list {
        table.add_row([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.role.as_str().to_string(),
            if user.active { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
