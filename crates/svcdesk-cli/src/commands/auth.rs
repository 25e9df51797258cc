use super::{applied, print_json};
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use svcdesk_application::DeskContext;
use svcdesk_core::DeskError;
use svcdesk_core::route::{AccessDecision, Route};

fn read_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(context: &DeskContext, identifier: &str, password: Option<String>) -> Result<()> {
    if let AccessDecision::Redirect(_) = context.access.check(&Route::Login) {
        let who = context
            .auth
            .current_identity()
            .map(|i| i.identifier)
            .unwrap_or_default();
        bail!("Already signed in as {}. Run `svcdesk logout` first.", who);
    }

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let mut view = context.login_view();
    applied(view.submit(identifier, &password).await)?;
    print_json(&view.state().signed_in_as)
}

pub fn logout(context: &DeskContext) -> Result<()> {
    context.auth.logout();
    eprintln!("Signed out.");
    Ok(())
}

pub fn whoami(context: &DeskContext) -> Result<()> {
    match context.auth.current_identity() {
        Some(identity) => print_json(&identity),
        None => Err(DeskError::Unauthenticated.into()),
    }
}
