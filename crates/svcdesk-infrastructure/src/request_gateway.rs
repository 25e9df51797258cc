use crate::dto::{HistoryEntryDto, RequestDto, SuggestRequestDto};
use crate::http::ApiRequest;
use crate::transport::AuthenticatedTransport;
use async_trait::async_trait;
use svcdesk_core::assist::{AssistStatus, ClassificationSuggestion};
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::reference::{Channel, RequestType, StateInfo, UserSummary};
use svcdesk_core::request::{
    CreateRequest, HistoryEntry, LifecycleState, Request, RequestFilter, RequestGateway,
    RequestId, TransitionCommand,
};

/// [`RequestGateway`] over the request service's REST API.
#[derive(Clone)]
pub struct HttpRequestGateway {
    transport: AuthenticatedTransport,
}

impl HttpRequestGateway {
    pub fn new(transport: AuthenticatedTransport) -> Self {
        Self { transport }
    }

    async fn fetch_request(&self, request: ApiRequest) -> Result<Request> {
        let dto: RequestDto = self.transport.call(request).await?;
        let request = Request::try_from(dto)?;
        reconcile(&request);
        Ok(request)
    }
}

fn require_id(id: RequestId) -> Result<()> {
    if id <= 0 {
        return Err(DeskError::validation("id", "Request id must be positive"));
    }
    Ok(())
}

/// Logs any lifecycle invariant the snapshot breaks. The snapshot is kept
/// as is; the service is the source of truth.
fn reconcile(request: &Request) {
    for violation in request.invariant_violations() {
        tracing::warn!(
            "[HttpRequestGateway] Request {} in state {}: {}",
            request.id,
            request.state,
            violation
        );
    }
}

fn transition_call(id: RequestId, command: &TransitionCommand) -> Result<ApiRequest> {
    let path = command.path(id);
    let call = match command {
        TransitionCommand::Classify(cmd) => ApiRequest::post(path, cmd)?,
        TransitionCommand::Assign(cmd) => ApiRequest::post(path, cmd)?,
        TransitionCommand::Attend(cmd) => ApiRequest::post(path, cmd)?,
        TransitionCommand::Close(cmd) => ApiRequest::post(path, cmd)?,
    };
    Ok(call.for_entity("request", id))
}

#[async_trait]
impl RequestGateway for HttpRequestGateway {
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<Request>> {
        let request = ApiRequest::get("/requests").with_query(filter.query_pairs());
        let dtos: Vec<RequestDto> = self.transport.call(request).await?;

        let mut requests = Vec::with_capacity(dtos.len());
        for dto in dtos {
            let request = Request::try_from(dto)?;
            reconcile(&request);
            if filter.matches(&request) {
                requests.push(request);
            } else {
                tracing::warn!(
                    "[HttpRequestGateway] Dropping request {} ({}) returned for a filter it does not match",
                    request.id,
                    request.state
                );
            }
        }
        tracing::debug!("[HttpRequestGateway] Listed {} requests", requests.len());
        Ok(requests)
    }

    async fn get_request(&self, id: RequestId) -> Result<Request> {
        require_id(id)?;
        self.fetch_request(ApiRequest::get(format!("/requests/{}", id)).for_entity("request", id))
            .await
    }

    async fn create_request(&self, request: &CreateRequest) -> Result<Request> {
        request.validate()?;
        let payload = request.normalized();
        let created = self
            .fetch_request(ApiRequest::post("/requests", &payload)?)
            .await?;

        if created.state != LifecycleState::Registered {
            tracing::warn!(
                "[HttpRequestGateway] New request {} reported in state {}",
                created.id,
                created.state
            );
        }
        tracing::info!("[HttpRequestGateway] Registered request {}", created.id);
        Ok(created)
    }

    async fn transition(&self, id: RequestId, command: &TransitionCommand) -> Result<Request> {
        require_id(id)?;
        command.validate()?;
        let command = command.normalized();
        let action = command.action();

        let updated = self.fetch_request(transition_call(id, &command)?).await?;

        if updated.state != action.target_state() {
            tracing::warn!(
                "[HttpRequestGateway] {} on request {} left it in {} (expected {})",
                action,
                id,
                updated.state,
                action.target_state()
            );
        }
        tracing::info!(
            "[HttpRequestGateway] Request {}: {} -> {}",
            id,
            action,
            updated.state
        );
        Ok(updated)
    }

    async fn history(&self, id: RequestId) -> Result<Vec<HistoryEntry>> {
        require_id(id)?;
        let request = ApiRequest::get(format!("/requests/{}/history", id)).for_entity("request", id);
        let dtos: Vec<HistoryEntryDto> = self.transport.call(request).await?;
        Ok(dtos.into_iter().map(HistoryEntry::from).collect())
    }

    async fn request_types(&self) -> Result<Vec<RequestType>> {
        self.transport.call(ApiRequest::get("/request-types")).await
    }

    async fn channels(&self) -> Result<Vec<Channel>> {
        self.transport.call(ApiRequest::get("/channels")).await
    }

    async fn states(&self) -> Result<Vec<StateInfo>> {
        self.transport.call(ApiRequest::get("/states")).await
    }

    async fn users(&self) -> Result<Vec<UserSummary>> {
        self.transport.call(ApiRequest::get("/users")).await
    }

    async fn assist_status(&self) -> Result<AssistStatus> {
        self.transport.call(ApiRequest::get("/ai/status")).await
    }

    async fn suggest_classification(&self, description: &str) -> Result<ClassificationSuggestion> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DeskError::validation("description", "Description is required"));
        }
        let body = SuggestRequestDto {
            description: description.to_string(),
        };
        self.transport
            .call(ApiRequest::post("/ai/suggest", &body)?)
            .await
    }
}
