//! Login, logout and session commands.

use alganews_admin::auth::AuthPhase;
use alganews_admin::events::{AuthEvent, UiEvent};
use alganews_core::config::Config;
use anyhow::{Context, Result, bail};

use super::session::{self, print_notifications};

pub async fn login(config: &Config, open_browser: bool) -> Result<()> {
    let mut runtime = session::open(config, open_browser)?;
    runtime.login();
    runtime.settle().await;

    let url = runtime
        .state()
        .auth
        .login_url
        .clone()
        .context("no login URL was issued")?;
    println!("Sign in at:\n{url}\n");
    println!("Then run `alganews authorize <redirect-url>` with the URL you land on.");
    Ok(())
}

pub async fn authorize(config: &Config, location: &str) -> Result<()> {
    let mut runtime = session::open(config, false)?;
    runtime.bootstrap(location)?;
    runtime.settle().await;
    print_notifications(&mut runtime);

    let auth = &runtime.state().auth;
    match &auth.phase {
        AuthPhase::Authenticated { user_id } => {
            match &auth.user {
                Some(user) => println!("Signed in as {} <{}>", user.summary.name, user.summary.email),
                None => println!("Signed in as user {user_id}"),
            }
            Ok(())
        }
        AuthPhase::MissingCode => bail!("The redirect URL has no authorization code"),
        AuthPhase::Failed => bail!("The authorization code was rejected"),
        AuthPhase::RedirectingToLogin => {
            let hint = auth.login_url.as_deref().unwrap_or_default();
            bail!("No login in progress. Sign in again at:\n{hint}")
        }
        phase => bail!("Login did not complete ({phase:?})"),
    }
}

pub async fn logout(config: &Config) -> Result<()> {
    let mut runtime = session::open(config, false)?;
    session::run(&mut runtime, UiEvent::Auth(AuthEvent::Logout)).await;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let runtime = session::signed_in(config).await?;
    let auth = &runtime.state().auth;

    let Some(user) = &auth.user else {
        let id = auth.user_id().unwrap_or_default();
        println!("User {id} (profile unavailable)");
        return Ok(());
    };

    let mut table = session::table(["ID", "Name", "E-mail", "Role"]);
    table.add_row([
        user.summary.id.to_string(),
        user.summary.name.clone(),
        user.summary.email.clone(),
        user.summary.role.as_str().to_string(),
    ]);
    println!("{table}");
    Ok(())
}
