use super::{enter, print_json};
use anyhow::Result;
use svcdesk_application::DeskContext;
use svcdesk_core::route::Route;

pub async fn types(context: &DeskContext) -> Result<()> {
    enter(context, Route::RequestList)?;
    print_json(&context.requests.request_types().await?)
}

pub async fn channels(context: &DeskContext) -> Result<()> {
    enter(context, Route::RequestList)?;
    print_json(&context.requests.channels().await?)
}

pub async fn states(context: &DeskContext) -> Result<()> {
    enter(context, Route::RequestList)?;
    let data = context.requests.states().await?;
    let mut states: Vec<_> = data.iter().collect();
    states.sort_by_key(|s| s.order);
    print_json(&states)
}

pub async fn users(context: &DeskContext) -> Result<()> {
    enter(context, Route::RequestList)?;
    print_json(&context.requests.users().await?)
}
