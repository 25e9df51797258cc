use super::{applied, enter, print_json};
use anyhow::{Result, bail};
use svcdesk_application::DeskContext;
use svcdesk_application::view::{CreateForm, RequestDetailView};
use svcdesk_core::request::{
    AssignCommand, AttendCommand, ClassifyCommand, CloseCommand, LifecycleState, Priority,
    RequestFilter, RequestId, TransitionCommand,
};
use svcdesk_core::route::Route;
use svcdesk_core::session::UserId;

pub async fn list(
    context: &DeskContext,
    state: Option<LifecycleState>,
    request_type: Option<i64>,
    priority: Option<Priority>,
    assigned_to: Option<UserId>,
) -> Result<()> {
    enter(context, Route::RequestList)?;
    let filter = RequestFilter {
        state,
        request_type,
        priority,
        assigned_to,
    };
    let mut view = context.list_view();
    applied(view.apply_filters(filter).await)?;
    print_json(&view.state().requests)
}

async fn open_detail(context: &DeskContext, id: RequestId) -> Result<RequestDetailView> {
    enter(context, Route::RequestDetail(id))?;
    let mut view = context.detail_view(id);
    applied(view.load().await)?;
    Ok(view)
}

pub async fn show(context: &DeskContext, id: RequestId) -> Result<()> {
    let view = open_detail(context, id).await?;
    print_json(view.state())
}

pub async fn create(context: &DeskContext, mut form: CreateForm, suggest: bool) -> Result<()> {
    enter(context, Route::RequestCreate)?;
    let mut view = context.create_view();
    if suggest {
        if !view.load().await.is_applied() {
            bail!("view closed before the form loaded");
        }
        let suggestion = applied(view.suggest(&mut form).await)?;
        if !suggestion.is_available() {
            eprintln!("Classification assist is not available.");
        } else if form.request_type_id.is_none() {
            eprintln!("No offered request type matches the suggestion.");
        }
    }
    let created = applied(view.submit(form).await)?;
    print_json(&created)
}

async fn perform(mut view: RequestDetailView, command: TransitionCommand) -> Result<()> {
    applied(view.perform(command).await)?;
    print_json(&view.state().request)
}

pub async fn classify(
    context: &DeskContext,
    id: RequestId,
    request_type: Option<i64>,
    priority: Option<Priority>,
    justification: Option<String>,
) -> Result<()> {
    let view = open_detail(context, id).await?;
    let defaults = view.classification_defaults();
    let command = ClassifyCommand {
        request_type_id: request_type
            .or(defaults.as_ref().map(|d| d.request_type_id))
            .unwrap_or_default(),
        priority: priority
            .or(defaults.as_ref().map(|d| d.priority))
            .unwrap_or(Priority::Medium),
        priority_justification: justification,
    };
    perform(view, TransitionCommand::Classify(command)).await
}

pub async fn assign(context: &DeskContext, id: RequestId, to: UserId) -> Result<()> {
    let view = open_detail(context, id).await?;
    perform(
        view,
        TransitionCommand::Assign(AssignCommand { assigned_to_id: to }),
    )
    .await
}

pub async fn attend(context: &DeskContext, id: RequestId, note: Option<String>) -> Result<()> {
    let view = open_detail(context, id).await?;
    perform(
        view,
        TransitionCommand::Attend(AttendCommand { observations: note }),
    )
    .await
}

pub async fn close(context: &DeskContext, id: RequestId, note: String) -> Result<()> {
    let view = open_detail(context, id).await?;
    perform(view, TransitionCommand::Close(CloseCommand::new(note))).await
}

pub async fn history(context: &DeskContext, id: RequestId) -> Result<()> {
    enter(context, Route::RequestDetail(id))?;
    let history = context.requests.history(id).await?;
    print_json(&history)
}

pub async fn suggest(context: &DeskContext, id: RequestId) -> Result<()> {
    let mut view = open_detail(context, id).await?;
    let suggestion = applied(view.suggest().await)?;
    if !suggestion.is_available() {
        eprintln!("Classification assist is not available.");
    }
    print_json(&suggestion)
}
