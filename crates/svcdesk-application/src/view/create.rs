//! Request registration view.

use super::list::or_empty;
use super::scope::{Outcome, ViewScope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use svcdesk_core::assist::ClassificationSuggestion;
use svcdesk_core::auth::AuthGateway;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::reference::ReferenceData;
use svcdesk_core::request::{CreateRequest, Request, RequestGateway};
use svcdesk_core::route::{Navigator, Route};
use svcdesk_core::session::UserId;

/// Form input as entered. Unset selections stay `None` until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForm {
    pub description: String,
    pub request_type_id: Option<i64>,
    pub channel_id: Option<i64>,
    /// Defaults to the signed-in user.
    pub requested_by_id: Option<UserId>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl CreateForm {
    fn into_request(self, current_user: Option<UserId>) -> Result<CreateRequest> {
        let request_type_id = self
            .request_type_id
            .ok_or_else(|| DeskError::validation("requestTypeId", "Request type is required"))?;
        let channel_id = self
            .channel_id
            .ok_or_else(|| DeskError::validation("channelId", "Channel is required"))?;
        let requested_by_id = self
            .requested_by_id
            .or(current_user)
            .ok_or_else(|| DeskError::validation("requestedById", "Requester is required"))?;

        let request = CreateRequest {
            registered_at: self.registered_at,
            ..CreateRequest::new(self.description, request_type_id, channel_id, requested_by_id)
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateState {
    pub submitting: bool,
    pub reference: ReferenceData,
    pub assist_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<ClassificationSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct RequestCreateView {
    auth: Arc<dyn AuthGateway>,
    requests: Arc<dyn RequestGateway>,
    navigator: Arc<dyn Navigator>,
    scope: ViewScope,
    state: CreateState,
}

impl RequestCreateView {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        requests: Arc<dyn RequestGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            requests,
            navigator,
            scope: ViewScope::new(),
            state: CreateState::default(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &CreateState {
        &self.state
    }

    /// Loads the request types and channels the form offers, and whether
    /// the classification assist can be asked.
    pub async fn load(&mut self) -> Outcome<()> {
        let requests = self.requests.clone();
        let lookups = async {
            futures::join!(
                requests.request_types(),
                requests.channels(),
                requests.assist_status()
            )
        };
        let Outcome::Applied((request_types, channels, assist)) = self.scope.run(lookups).await
        else {
            return Outcome::Discarded;
        };
        let assist_available = match assist {
            Ok(status) => status.available,
            Err(e) => {
                tracing::debug!("[RequestCreateView] Assist status unavailable: {}", e);
                false
            }
        };
        self.state = CreateState {
            assist_available,
            reference: ReferenceData {
                request_types: or_empty("request types", request_types),
                channels: or_empty("channels", channels),
                ..ReferenceData::default()
            },
            ..self.state.clone()
        };
        Outcome::Applied(())
    }

    /// Asks the assist lookup for a request type matching the form's
    /// description and selects it in `form`.
    ///
    /// Advisory only: nothing is submitted, and the form keeps its type when
    /// the assist is down or names a type this form does not offer.
    pub async fn suggest(
        &mut self,
        form: &mut CreateForm,
    ) -> Outcome<Result<ClassificationSuggestion>> {
        let description = form.description.trim().to_string();
        if description.is_empty() {
            let e = DeskError::validation("description", "Description is required");
            self.state = CreateState {
                error: Some(e.user_message()),
                ..self.state.clone()
            };
            return Outcome::Applied(Err(e));
        }

        let Outcome::Applied(result) = self
            .scope
            .run(self.requests.suggest_classification(&description))
            .await
        else {
            return Outcome::Discarded;
        };
        let suggestion = match result {
            Ok(suggestion) => suggestion,
            Err(e) => {
                tracing::debug!("[RequestCreateView] Suggestion failed: {}", e);
                return Outcome::Applied(Err(e));
            }
        };

        if !suggestion.is_available() {
            tracing::info!("[RequestCreateView] Classification assist is unavailable");
        } else if let Some(code) = suggestion.suggested_request_type_code.as_deref() {
            match self.state.reference.request_type_by_code(code) {
                Some(request_type) => form.request_type_id = Some(request_type.id),
                None => tracing::warn!(
                    "[RequestCreateView] Suggested request type {} is not offered",
                    code
                ),
            }
        }
        self.state = CreateState {
            suggestion: Some(suggestion.clone()),
            error: None,
            ..self.state.clone()
        };
        Outcome::Applied(Ok(suggestion))
    }

    /// Registers the request and opens its detail view.
    ///
    /// Incomplete input is rejected without a network call.
    pub async fn submit(&mut self, form: CreateForm) -> Outcome<Result<Request>> {
        let current_user = self.auth.current_identity().map(|i| i.id);
        let request = match form.into_request(current_user) {
            Ok(request) => request,
            Err(e) => {
                self.state = CreateState {
                    error: Some(e.user_message()),
                    ..self.state.clone()
                };
                return Outcome::Applied(Err(e));
            }
        };

        self.state = CreateState {
            submitting: true,
            error: None,
            ..self.state.clone()
        };
        let Outcome::Applied(result) = self.scope.run(self.requests.create_request(&request)).await
        else {
            tracing::debug!("[RequestCreateView] Dropped create result for a left view");
            return Outcome::Discarded;
        };

        match result {
            Ok(created) => {
                self.state = CreateState {
                    submitting: false,
                    created: Some(created.clone()),
                    error: None,
                    ..self.state.clone()
                };
                self.navigator.navigate(Route::RequestDetail(created.id));
                Outcome::Applied(Ok(created))
            }
            Err(e) => {
                self.state = CreateState {
                    submitting: false,
                    error: Some(e.user_message()),
                    ..self.state.clone()
                };
                Outcome::Applied(Err(e))
            }
        }
    }
}
