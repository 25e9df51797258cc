//! In-memory stand-in for the request service, plus recording doubles.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use svcdesk_core::auth::Role;
use svcdesk_core::error::Result;
use svcdesk_core::request::{
    Action, AssignCommand, AttendCommand, ClassifyCommand, CloseCommand, CreateRequest,
    HistoryEntry, LifecycleState, NamedRef, Priority, Request, UserRef,
};
use svcdesk_core::route::{Navigator, Route, RouteAccessControl};
use svcdesk_core::session::{AccessToken, Session, SessionStore, UserId};
use svcdesk_infrastructure::dto::{HistoryEntryDto, RequestDto};
use svcdesk_infrastructure::http::{ApiResponse, HttpExchange, Method, OutboundCall};
use svcdesk_infrastructure::{
    AuthenticatedTransport, HttpAuthGateway, HttpRequestGateway, MemorySessionStore,
};
use tokio::sync::Barrier;

struct Account {
    id: UserId,
    identifier: &'static str,
    name: &'static str,
    password: &'static str,
    role: Role,
}

static ACCOUNTS: [Account; 3] = [
    Account {
        id: 1,
        identifier: "admin",
        name: "Administrator",
        password: "admin123",
        role: Role::Admin,
    },
    Account {
        id: 2,
        identifier: "staff",
        name: "Staff Member",
        password: "staff123",
        role: Role::Staff,
    },
    Account {
        id: 7,
        identifier: "student",
        name: "Student",
        password: "student123",
        role: Role::Requester,
    },
];

fn account(id: UserId) -> Option<&'static Account> {
    ACCOUNTS.iter().find(|a| a.id == id)
}

#[derive(Default)]
struct FakeState {
    next_request_id: i64,
    next_token: u32,
    requests: Vec<Request>,
    history: Vec<HistoryEntry>,
    tokens: HashMap<String, UserId>,
    calls: Vec<OutboundCall>,
    lenient_filters: bool,
}

/// Request service double. Enforces the same lifecycle and role rules as
/// the real service.
pub struct FakeDeskService {
    state: Mutex<FakeState>,
    barrier: Option<Barrier>,
}

impl FakeDeskService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState::default()),
            barrier: None,
        })
    }

    /// Holds every call until `n` calls are in flight.
    pub fn with_barrier(n: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState::default()),
            barrier: Some(Barrier::new(n)),
        })
    }

    pub fn issue_token(&self, user_id: UserId) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_token += 1;
        let token = format!("token-{}", state.next_token);
        state.tokens.insert(token.clone(), user_id);
        token
    }

    /// Makes the list endpoint ignore every state filter.
    pub fn ignore_state_filters(&self) {
        self.state.lock().unwrap().lenient_filters = true;
    }

    pub fn revoke_all_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn calls(&self) -> Vec<OutboundCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn seed(&self, description: &str, request_type: i64, state: LifecycleState) -> i64 {
        let mut s = self.state.lock().unwrap();
        s.next_request_id += 1;
        let id = s.next_request_id;
        let mut request = Request {
            id,
            description: description.to_string(),
            registered_at: Utc::now(),
            request_type: NamedRef::id(request_type),
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
            request.priority = Some(if request_type == 4 {
                Priority::High
            } else {
                Priority::Medium
            });
        }
        if state >= LifecycleState::InProgress {
            request.assigned_to = Some(UserRef::id(2));
        }
        if state == LifecycleState::Closed {
            request.closure_observation = Some("done".to_string());
        }
        s.requests.push(request);
        id
    }

    fn handle(&self, call: &OutboundCall) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());

        let segments: Vec<&str> = call
            .request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if call.request.method == Method::Post && segments == ["auth", "login"] {
            return Self::login(&mut state, call.request.body.as_ref());
        }

        let Some(user_id) = call
            .bearer
            .as_ref()
            .and_then(|t| state.tokens.get(t.as_str()).copied())
        else {
            return ApiResponse::json_body(401, &json!({"message": "Unauthorized"}));
        };
        let Some(user) = account(user_id) else {
            return ApiResponse::new(401, "");
        };

        match (call.request.method, segments.as_slice()) {
            (Method::Get, ["requests"]) => Self::list(&state, &call.request.query),
            (Method::Post, ["requests"]) => Self::create(&mut state, call.request.body.as_ref()),
            (Method::Get, ["requests", id]) => match Self::find(&state, id) {
                Some(index) => ok(&RequestDto::from(&state.requests[index])),
                None => not_found(),
            },
            (Method::Get, ["requests", id, "history"]) => match Self::find(&state, id) {
                Some(index) => {
                    let request_id = state.requests[index].id;
                    let entries: Vec<HistoryEntryDto> = state
                        .history
                        .iter()
                        .filter(|e| e.request_id == request_id)
                        .map(HistoryEntryDto::from)
                        .collect();
                    ok(&entries)
                }
                None => not_found(),
            },
            (Method::Post, ["requests", id, action]) => match Self::find(&state, id) {
                Some(index) => {
                    Self::transition(&mut state, index, action, user, call.request.body.as_ref())
                }
                None => not_found(),
            },
            (Method::Get, ["request-types"]) => ok(&json!([
                {"id": 1, "code": "CONSULTA", "name": "Inquiry"},
                {"id": 2, "code": "HOMOLOG", "name": "Course recognition"},
                {"id": 4, "code": "CUPOS", "name": "Quota request"}
            ])),
            (Method::Get, ["channels"]) => ok(&json!([
                {"id": 1, "code": "CSU", "name": "Service desk"},
                {"id": 2, "code": "EMAIL", "name": "Email"}
            ])),
            (Method::Get, ["states"]) => ok(&json!([
                {"id": 5, "code": "CERRADA", "name": "Cerrada", "order": 5},
                {"id": 1, "code": "REGISTRADA", "name": "Registrada", "order": 1},
                {"id": 3, "code": "EN_ATENCION", "name": "En atención", "order": 3},
                {"id": 2, "code": "CLASIFICADA", "name": "Clasificada", "order": 2},
                {"id": 4, "code": "ATENDIDA", "name": "Atendida", "order": 4}
            ])),
            (Method::Get, ["users"]) => ok(&json!(
                ACCOUNTS
                    .iter()
                    .map(|a| json!({"id": a.id, "identifier": a.identifier, "name": a.name, "active": true}))
                    .collect::<Vec<_>>()
            )),
            (Method::Get, ["ai", "status"]) => ok(&json!({"available": false})),
            (Method::Post, ["ai", "suggest"]) => ok(&json!({
                "available": false,
                "message": "Assist is not configured"
            })),
            _ => not_found(),
        }
    }

    fn login(state: &mut FakeState, body: Option<&Value>) -> ApiResponse {
        let identifier = body.and_then(|b| b["identifier"].as_str()).unwrap_or_default();
        let password = body.and_then(|b| b["password"].as_str()).unwrap_or_default();
        let Some(account) = ACCOUNTS
            .iter()
            .find(|a| a.identifier == identifier && a.password == password)
        else {
            return ApiResponse::json_body(401, &json!({"message": "Bad credentials"}));
        };
        state.next_token += 1;
        let token = format!("token-{}", state.next_token);
        state.tokens.insert(token.clone(), account.id);
        ok(&json!({
            "token": token,
            "user": {
                "id": account.id,
                "identifier": account.identifier,
                "name": account.name,
                "role": account.role.to_string()
            }
        }))
    }

    fn find(state: &FakeState, id: &str) -> Option<usize> {
        let id: i64 = id.parse().ok()?;
        state.requests.iter().position(|r| r.id == id)
    }

    fn list(state: &FakeState, query: &[(String, String)]) -> ApiResponse {
        let param = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        // Unknown state codes are ignored, not rejected.
        let wanted_state = if state.lenient_filters {
            None
        } else {
            param("state").and_then(|s| LifecycleState::from_wire_code(&s))
        };
        let wanted_type = param("requestType").and_then(|s| s.parse::<i64>().ok());
        let wanted_priority = param("priority").and_then(|s| s.parse::<Priority>().ok());
        let wanted_assignee = param("assignedTo").and_then(|s| s.parse::<UserId>().ok());

        let matching: Vec<RequestDto> = state
            .requests
            .iter()
            .filter(|r| wanted_state.is_none_or(|s| r.state == s))
            .filter(|r| wanted_type.is_none_or(|t| r.request_type.id == t))
            .filter(|r| wanted_priority.is_none_or(|p| r.priority == Some(p)))
            .filter(|r| {
                wanted_assignee.is_none_or(|u| r.assigned_to.as_ref().is_some_and(|a| a.id == u))
            })
            .map(RequestDto::from)
            .collect();
        ok(&matching)
    }

    fn create(state: &mut FakeState, body: Option<&Value>) -> ApiResponse {
        let Some(command) = body.and_then(|b| serde_json::from_value::<CreateRequest>(b.clone()).ok())
        else {
            return bad_request("Malformed request");
        };
        if command.description.trim().is_empty() {
            return bad_request("Description is required");
        }
        state.next_request_id += 1;
        let now = Utc::now();
        let request = Request {
            id: state.next_request_id,
            description: command.description,
            registered_at: command.registered_at.unwrap_or(now),
            request_type: NamedRef::id(command.request_type_id),
            channel: NamedRef::id(command.channel_id),
            state: LifecycleState::Registered,
            state_name: None,
            priority: None,
            priority_justification: None,
            requested_by: UserRef::id(command.requested_by_id),
            assigned_to: None,
            closure_observation: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        Self::record(state, request.id, "REGISTERED", command.requested_by_id, None);
        let response = ApiResponse::json_body(
            201,
            &serde_json::to_value(RequestDto::from(&request)).unwrap_or_default(),
        );
        state.requests.push(request);
        response
    }

    fn transition(
        state: &mut FakeState,
        index: usize,
        action: &str,
        user: &Account,
        body: Option<&Value>,
    ) -> ApiResponse {
        let Ok(action) = action.parse::<Action>() else {
            return not_found();
        };
        let current = state.requests[index].state;
        if current != action.required_state() {
            return bad_request("Invalid state transition");
        }
        if user.role < action.minimum_role() {
            return ApiResponse::json_body(403, &json!({"message": "Forbidden"}));
        }
        let body = body.cloned().unwrap_or_else(|| json!({}));
        let mut request = state.requests[index].clone();
        let mut observations = None;
        let label = match action {
            Action::Classify => {
                let Ok(cmd) = serde_json::from_value::<ClassifyCommand>(body) else {
                    return bad_request("Malformed request");
                };
                request.request_type = NamedRef::id(cmd.request_type_id);
                request.priority = Some(cmd.priority);
                request.priority_justification = cmd.priority_justification;
                "CLASSIFIED"
            }
            Action::Assign => {
                let Ok(cmd) = serde_json::from_value::<AssignCommand>(body) else {
                    return bad_request("Malformed request");
                };
                request.assigned_to = Some(UserRef::id(cmd.assigned_to_id));
                "ASSIGNED"
            }
            Action::Attend => {
                let Ok(cmd) = serde_json::from_value::<AttendCommand>(body) else {
                    return bad_request("Malformed request");
                };
                observations = cmd.observations;
                "ATTENDED"
            }
            Action::Close => {
                let Ok(cmd) = serde_json::from_value::<CloseCommand>(body) else {
                    return bad_request("Malformed request");
                };
                if cmd.closure_observation.trim().is_empty() {
                    return bad_request("Closure observation is required");
                }
                observations = Some(cmd.closure_observation.clone());
                request.closure_observation = Some(cmd.closure_observation);
                "CLOSED"
            }
        };
        request.state = action.target_state();
        request.updated_at = Some(Utc::now());
        Self::record(state, request.id, label, user.id, observations);
        let response = ok(&RequestDto::from(&request));
        state.requests[index] = request;
        response
    }

    fn record(
        state: &mut FakeState,
        request_id: i64,
        action: &str,
        user_id: UserId,
        observations: Option<String>,
    ) {
        let id = state.history.len() as i64 + 1;
        state.history.push(HistoryEntry {
            id,
            request_id,
            occurred_at: Utc::now(),
            action: action.to_string(),
            user: UserRef::id(user_id),
            observations,
        });
    }
}

fn ok<T: serde::Serialize + ?Sized>(body: &T) -> ApiResponse {
    ApiResponse::json_body(200, &serde_json::to_value(body).unwrap_or_default())
}

fn not_found() -> ApiResponse {
    ApiResponse::json_body(404, &json!({"message": "Not found"}))
}

fn bad_request(message: &str) -> ApiResponse {
    ApiResponse::json_body(400, &json!({"message": message}))
}

#[async_trait]
impl HttpExchange for FakeDeskService {
    async fn send(&self, call: &OutboundCall) -> Result<ApiResponse> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        Ok(self.handle(call))
    }
}

/// Session store that counts the teardowns it performs.
#[derive(Default)]
pub struct CountingStore {
    inner: MemorySessionStore,
    pub clears: AtomicUsize,
}

impl CountingStore {
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SessionStore for CountingStore {
    fn get(&self) -> Option<Arc<Session>> {
        self.inner.get()
    }

    fn set(&self, session: Session) {
        self.inner.set(session)
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }

    fn clear_if_current(&self, token: &AccessToken) -> bool {
        let cleared = self.inner.clear_if_current(token);
        if cleared {
            self.clears.fetch_add(1, Ordering::SeqCst);
        }
        cleared
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
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

/// Everything wired together over one fake service.
pub struct Harness {
    pub service: Arc<FakeDeskService>,
    pub store: Arc<CountingStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub auth: HttpAuthGateway,
    pub requests: HttpRequestGateway,
    pub access: RouteAccessControl,
}

impl Harness {
    pub fn new(service: Arc<FakeDeskService>) -> Self {
        let store = Arc::new(CountingStore::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let transport =
            AuthenticatedTransport::new(service.clone(), store.clone(), navigator.clone());
        Self {
            auth: HttpAuthGateway::new(transport.clone(), store.clone(), navigator.clone()),
            requests: HttpRequestGateway::new(transport),
            access: RouteAccessControl::new(store.clone(), navigator.clone()),
            service,
            store,
            navigator,
        }
    }
}
