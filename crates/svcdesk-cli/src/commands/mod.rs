pub mod auth;
pub mod reference;
pub mod requests;

use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use svcdesk_application::{DeskContext, Outcome};
use svcdesk_core::DeskError;
use svcdesk_core::route::{AccessDecision, Route};

/// Runs the access check for `route` before a command touches the service.
pub(crate) fn enter(context: &DeskContext, route: Route) -> Result<()> {
    match context.access.enter(&route) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Redirect(Route::Login) => Err(DeskError::Unauthenticated.into()),
        AccessDecision::Redirect(target) => {
            bail!("{} is not available, continue at {}", route, target)
        }
    }
}

pub(crate) fn applied<T>(outcome: Outcome<svcdesk_core::error::Result<T>>) -> Result<T> {
    match outcome {
        Outcome::Applied(result) => Ok(result?),
        Outcome::Discarded => Err(anyhow!("view closed before the result arrived")),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
