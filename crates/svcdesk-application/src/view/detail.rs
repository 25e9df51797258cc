//! Request detail view: snapshot, history and lifecycle actions.
//!
//! The snapshot shown is always the last one the request service returned.
//! Every action goes through the same four steps, in order:
//!
//! 1. local policy check against the current snapshot and role
//! 2. dispatch to the request service
//! 3. replace the snapshot with the returned request
//! 4. re-fetch the history
//!
//! A failure in step 4 is logged and leaves step 3 in place.

use super::list::or_empty;
use super::scope::{Outcome, ViewScope};
use serde::Serialize;
use std::sync::Arc;
use svcdesk_core::assist::ClassificationSuggestion;
use svcdesk_core::auth::AuthGateway;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::reference::ReferenceData;
use svcdesk_core::request::{
    ActionSet, ClassifyCommand, HistoryEntry, Priority, Request, RequestGateway, RequestId,
    TransitionCommand, TransitionPolicy,
};
use svcdesk_core::route::{Navigator, Route};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    #[default]
    Loading,
    Ready,
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailState {
    pub status: DetailStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    pub history: Vec<HistoryEntry>,
    /// Actions offered for the snapshot and role at the time it was applied.
    pub actions: ActionSet,
    #[serde(skip)]
    pub reference: ReferenceData,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_error: Option<String>,
    pub assist_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<ClassificationSuggestion>,
}

pub struct RequestDetailView {
    id: RequestId,
    auth: Arc<dyn AuthGateway>,
    requests: Arc<dyn RequestGateway>,
    navigator: Arc<dyn Navigator>,
    scope: ViewScope,
    state: DetailState,
}

impl RequestDetailView {
    pub fn new(
        id: RequestId,
        auth: Arc<dyn AuthGateway>,
        requests: Arc<dyn RequestGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            id,
            auth,
            requests,
            navigator,
            scope: ViewScope::new(),
            state: DetailState::default(),
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Actions the current user may take on the current snapshot.
    ///
    /// Re-derived on every call, so a role change is reflected at once.
    pub fn legal_actions(&self) -> ActionSet {
        match &self.state.request {
            Some(request) => TransitionPolicy::legal_actions(request.state, self.auth.current_role()),
            None => ActionSet::new(),
        }
    }

    /// Loads the request, then its history and the lookups the actions need.
    ///
    /// An unknown request ends in [`DetailStatus::NotFound`] and a redirect
    /// to the list.
    pub async fn load(&mut self) -> Outcome<Result<()>> {
        self.state = DetailState::default();
        let id = self.id;

        let Outcome::Applied(result) = self.scope.run(self.requests.get_request(id)).await else {
            return Outcome::Discarded;
        };
        let request = match result {
            Ok(request) => request,
            Err(e) => {
                let status = if e.is_not_found() {
                    DetailStatus::NotFound
                } else {
                    DetailStatus::Failed(e.user_message())
                };
                self.state = DetailState {
                    status,
                    ..DetailState::default()
                };
                if e.is_not_found() {
                    self.navigator.navigate(Route::RequestList);
                }
                return Outcome::Applied(Err(e));
            }
        };

        let requests = self.requests.clone();
        let extras = async {
            futures::join!(
                requests.history(id),
                requests.request_types(),
                requests.users(),
                requests.assist_status()
            )
        };
        let Outcome::Applied((history, request_types, users, assist)) =
            self.scope.run(extras).await
        else {
            return Outcome::Discarded;
        };

        let assist_available = match assist {
            Ok(status) => status.available,
            Err(e) => {
                tracing::debug!("[RequestDetailView] Assist status unavailable: {}", e);
                false
            }
        };
        self.state = DetailState {
            status: DetailStatus::Ready,
            actions: TransitionPolicy::legal_actions(request.state, self.auth.current_role()),
            request: Some(request),
            history: or_empty("history", history),
            reference: ReferenceData {
                request_types: or_empty("request types", request_types),
                users: or_empty("users", users),
                ..ReferenceData::default()
            },
            assist_available,
            ..DetailState::default()
        };
        Outcome::Applied(Ok(()))
    }

    /// Runs one lifecycle action against the current snapshot.
    pub async fn perform(&mut self, command: TransitionCommand) -> Outcome<Result<()>> {
        let Some(current) = self.state.request.as_ref() else {
            return Outcome::Applied(Err(DeskError::internal("no request loaded")));
        };

        if let Err(e) = TransitionPolicy::check(current.state, self.auth.current_role(), &command) {
            self.state = DetailState {
                action_error: Some(e.user_message()),
                ..self.state.clone()
            };
            return Outcome::Applied(Err(e));
        }

        self.state = DetailState {
            busy: true,
            action_error: None,
            ..self.state.clone()
        };
        let id = self.id;
        let Outcome::Applied(result) = self.scope.run(self.requests.transition(id, &command)).await
        else {
            tracing::debug!("[RequestDetailView] Dropped {} result for a left view", command.action());
            return Outcome::Discarded;
        };

        let updated = match result {
            Ok(updated) => updated,
            Err(e) => {
                self.state = DetailState {
                    busy: false,
                    action_error: Some(e.user_message()),
                    ..self.state.clone()
                };
                return Outcome::Applied(Err(e));
            }
        };

        self.state = DetailState {
            busy: false,
            actions: TransitionPolicy::legal_actions(updated.state, self.auth.current_role()),
            request: Some(updated),
            suggestion: None,
            ..self.state.clone()
        };

        let Outcome::Applied(history) = self.scope.run(self.requests.history(id)).await else {
            return Outcome::Discarded;
        };
        match history {
            Ok(history) => {
                self.state = DetailState {
                    history,
                    ..self.state.clone()
                };
            }
            Err(e) => {
                tracing::warn!(
                    "[RequestDetailView] History refresh for request {} failed: {}",
                    id,
                    e
                );
            }
        }
        Outcome::Applied(Ok(()))
    }

    /// Asks the assist lookup for a classification of the description.
    pub async fn suggest(&mut self) -> Outcome<Result<ClassificationSuggestion>> {
        let Some(current) = self.state.request.as_ref() else {
            return Outcome::Applied(Err(DeskError::internal("no request loaded")));
        };
        let description = current.description.clone();

        let Outcome::Applied(result) = self
            .scope
            .run(self.requests.suggest_classification(&description))
            .await
        else {
            return Outcome::Discarded;
        };
        if let Ok(suggestion) = &result {
            if !suggestion.is_available() {
                tracing::info!("[RequestDetailView] Classification assist is unavailable");
            }
            self.state = DetailState {
                suggestion: Some(suggestion.clone()),
                ..self.state.clone()
            };
        }
        Outcome::Applied(result)
    }

    /// Pre-filled classification for the current snapshot.
    ///
    /// Takes the suggestion when one is loaded, otherwise the request type's
    /// default priority. The staff member confirms before it is sent.
    pub fn classification_defaults(&self) -> Option<ClassifyCommand> {
        let request = self.state.request.as_ref()?;
        let suggestion = self
            .state
            .suggestion
            .as_ref()
            .filter(|s| s.is_available());

        let suggested_type = suggestion
            .and_then(|s| s.suggested_request_type_code.as_deref())
            .and_then(|code| self.state.reference.request_type_by_code(code));
        let request_type_id = suggested_type.map_or(request.request_type.id, |t| t.id);

        let type_code = suggested_type.map(|t| t.code.clone()).or_else(|| {
            self.state
                .reference
                .request_type(request_type_id)
                .map(|t| t.code.clone())
                .or_else(|| request.request_type.code.clone())
        });
        let priority = suggestion
            .and_then(|s| s.priority())
            .unwrap_or_else(|| Priority::suggest_for_type_code(type_code.as_deref()));

        Some(ClassifyCommand {
            request_type_id,
            priority,
            priority_justification: None,
        })
    }
}
