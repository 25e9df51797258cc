//! Test doubles for the core gateway traits.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use svcdesk_core::assist::{AssistStatus, ClassificationSuggestion};
use svcdesk_core::auth::{AuthGateway, Role};
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::reference::{Channel, RequestType, StateInfo, UserSummary};
use svcdesk_core::request::{
    CreateRequest, HistoryEntry, LifecycleState, NamedRef, Priority, Request, RequestFilter,
    RequestGateway, RequestId, TransitionCommand, UserRef,
};
use svcdesk_core::route::{Navigator, Route};
use svcdesk_core::session::{AccessToken, Identity, Session};
use tokio::sync::Notify;

pub fn request_in(state: LifecycleState) -> Request {
    let mut request = Request {
        id: 11,
        description: "printer offline".to_string(),
        registered_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        request_type: NamedRef {
            id: 2,
            code: Some("HOMOLOG".to_string()),
            name: None,
        },
        channel: NamedRef::id(1),
        state,
        state_name: None,
        priority: None,
        priority_justification: None,
        requested_by: UserRef::id(7),
        assigned_to: None,
        closure_observation: None,
        created_at: None,
        updated_at: None,
    };
    if state >= LifecycleState::Classified {
        request.priority = Some(Priority::High);
    }
    if state >= LifecycleState::InProgress {
        request.assigned_to = Some(UserRef::id(2));
    }
    if state == LifecycleState::Closed {
        request.closure_observation = Some("done".to_string());
    }
    request
}

pub fn history_entry(action: &str) -> HistoryEntry {
    HistoryEntry {
        id: 1,
        request_id: 11,
        occurred_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        action: action.to_string(),
        user: UserRef::id(1),
        observations: None,
    }
}

// Mock RequestGateway for testing
pub struct MockRequestGateway {
    pub request: Mutex<Result<Request>>,
    pub list: Mutex<Result<Vec<Request>>>,
    pub history: Mutex<Result<Vec<HistoryEntry>>>,
    pub reference_fails: Mutex<bool>,
    pub suggestion: Mutex<Result<ClassificationSuggestion>>,
    pub assist_available: bool,
    pub calls: Mutex<Vec<String>>,
    /// When set, `get_request` and `list_requests` wait for a notification.
    pub gate: Option<Arc<Notify>>,
}

impl MockRequestGateway {
    pub fn with_request(request: Request) -> Self {
        Self {
            request: Mutex::new(Ok(request.clone())),
            list: Mutex::new(Ok(vec![request])),
            history: Mutex::new(Ok(vec![history_entry("REGISTERED")])),
            reference_fails: Mutex::new(false),
            suggestion: Mutex::new(Ok(ClassificationSuggestion::default())),
            assist_available: false,
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl RequestGateway for MockRequestGateway {
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<Request>> {
        self.record(format!("list:{}", filter.query_pairs().len()));
        self.wait_gate().await;
        let list = self.list.lock().unwrap().clone()?;
        Ok(list.into_iter().filter(|r| filter.matches(r)).collect())
    }

    async fn get_request(&self, id: RequestId) -> Result<Request> {
        self.record(format!("get:{}", id));
        self.wait_gate().await;
        self.request.lock().unwrap().clone()
    }

    async fn create_request(&self, request: &CreateRequest) -> Result<Request> {
        self.record("create");
        request.validate()?;
        let mut created = request_in(LifecycleState::Registered);
        created.id = 12;
        created.description = request.description.trim().to_string();
        created.request_type = NamedRef::id(request.request_type_id);
        created.channel = NamedRef::id(request.channel_id);
        created.requested_by = UserRef::id(request.requested_by_id);
        Ok(created)
    }

    async fn transition(&self, id: RequestId, command: &TransitionCommand) -> Result<Request> {
        self.record(format!("transition:{}:{}", id, command.action()));
        let mut request = self.request.lock().unwrap().clone()?;
        request.state = command.action().target_state();
        match command.normalized() {
            TransitionCommand::Classify(cmd) => {
                request.request_type = NamedRef::id(cmd.request_type_id);
                request.priority = Some(cmd.priority);
                request.priority_justification = cmd.priority_justification;
            }
            TransitionCommand::Assign(cmd) => {
                request.assigned_to = Some(UserRef::id(cmd.assigned_to_id));
            }
            TransitionCommand::Attend(_) => {}
            TransitionCommand::Close(cmd) => {
                request.closure_observation = Some(cmd.closure_observation);
            }
        }
        *self.request.lock().unwrap() = Ok(request.clone());
        Ok(request)
    }

    async fn history(&self, id: RequestId) -> Result<Vec<HistoryEntry>> {
        self.record(format!("history:{}", id));
        self.history.lock().unwrap().clone()
    }

    async fn request_types(&self) -> Result<Vec<RequestType>> {
        if *self.reference_fails.lock().unwrap() {
            return Err(DeskError::transport("connection reset"));
        }
        Ok(vec![
            RequestType {
                id: 2,
                code: "HOMOLOG".to_string(),
                name: "Course recognition".to_string(),
                description: None,
            },
            RequestType {
                id: 3,
                code: "CONSULTA".to_string(),
                name: "Inquiry".to_string(),
                description: None,
            },
        ])
    }

    async fn channels(&self) -> Result<Vec<Channel>> {
        Ok(vec![Channel {
            id: 1,
            code: "CSU".to_string(),
            name: "Service desk".to_string(),
        }])
    }

    async fn states(&self) -> Result<Vec<StateInfo>> {
        Ok(vec![StateInfo {
            id: 1,
            code: "REGISTRADA".to_string(),
            name: "Registrada".to_string(),
            order: 1,
        }])
    }

    async fn users(&self) -> Result<Vec<UserSummary>> {
        Ok(vec![UserSummary {
            id: 2,
            identifier: "staff".to_string(),
            name: "Staff Member".to_string(),
            active: true,
        }])
    }

    async fn assist_status(&self) -> Result<AssistStatus> {
        Ok(AssistStatus {
            available: self.assist_available,
        })
    }

    async fn suggest_classification(&self, _description: &str) -> Result<ClassificationSuggestion> {
        self.record("suggest");
        self.suggestion.lock().unwrap().clone()
    }
}

// Mock AuthGateway backed by a plain slot
#[derive(Default)]
pub struct MockAuthGateway {
    pub session: Mutex<Option<Arc<Session>>>,
    pub accept: Option<Role>,
}

impl MockAuthGateway {
    pub fn signed_in(role: Role) -> Self {
        Self {
            session: Mutex::new(Some(Arc::new(session(role)))),
            accept: None,
        }
    }

    pub fn accepting(role: Role) -> Self {
        Self {
            session: Mutex::new(None),
            accept: Some(role),
        }
    }
}

pub fn session(role: Role) -> Session {
    Session::new(
        AccessToken::new("tok"),
        Identity {
            id: match role {
                Role::Requester => 7,
                Role::Staff => 2,
                Role::Admin => 1,
            },
            identifier: role.to_string().to_lowercase(),
            name: format!("{} user", role),
            role,
        },
    )
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, identifier: &str, secret: &str) -> Result<Arc<Session>> {
        if identifier.trim().is_empty() {
            return Err(DeskError::validation("identifier", "Identifier is required"));
        }
        match self.accept {
            Some(role) if secret == "secret" => {
                let session = Arc::new(session(role));
                *self.session.lock().unwrap() = Some(session.clone());
                Ok(session)
            }
            _ => Err(DeskError::LoginFailed),
        }
    }

    fn logout(&self) {
        self.session.lock().unwrap().take();
    }

    fn current_session(&self) -> Option<Arc<Session>> {
        self.session.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
