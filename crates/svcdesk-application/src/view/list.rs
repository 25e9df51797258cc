//! Request list view.

use super::scope::{Outcome, ViewScope};
use serde::Serialize;
use std::sync::Arc;
use svcdesk_core::error::Result;
use svcdesk_core::reference::ReferenceData;
use svcdesk_core::request::{Request, RequestFilter, RequestGateway};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListState {
    pub loading: bool,
    pub filter: RequestFilter,
    pub requests: Vec<Request>,
    pub reference: ReferenceData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct RequestListView {
    requests: Arc<dyn RequestGateway>,
    scope: ViewScope,
    state: ListState,
}

/// Loads the lookups the list filters need. A failed lookup leaves that set
/// empty instead of failing the view.
pub(crate) async fn load_lookups(requests: &dyn RequestGateway) -> ReferenceData {
    let (states, request_types, users) =
        futures::join!(requests.states(), requests.request_types(), requests.users());
    ReferenceData {
        states: or_empty("states", states),
        request_types: or_empty("request types", request_types),
        users: or_empty("users", users),
        channels: Vec::new(),
    }
}

pub(crate) fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!("[RequestView] Could not load {}: {}", what, e);
        Vec::new()
    })
}

impl RequestListView {
    pub fn new(requests: Arc<dyn RequestGateway>) -> Self {
        Self {
            requests,
            scope: ViewScope::new(),
            state: ListState::default(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Loads lookups and the list for the current filter.
    pub async fn load(&mut self) -> Outcome<Result<()>> {
        self.state = ListState {
            loading: true,
            ..self.state.clone()
        };
        let requests = self.requests.clone();
        let loaded = self.scope.run(load_lookups(requests.as_ref())).await;
        let Outcome::Applied(reference) = loaded else {
            return Outcome::Discarded;
        };
        self.state = ListState {
            reference,
            ..self.state.clone()
        };
        self.refresh().await
    }

    pub async fn apply_filters(&mut self, filter: RequestFilter) -> Outcome<Result<()>> {
        self.state = ListState {
            filter,
            ..self.state.clone()
        };
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> Outcome<Result<()>> {
        self.apply_filters(RequestFilter::default()).await
    }

    async fn refresh(&mut self) -> Outcome<Result<()>> {
        let filter = self.state.filter.clone();
        self.state = ListState {
            loading: true,
            error: None,
            ..self.state.clone()
        };

        let Outcome::Applied(result) = self.scope.run(self.requests.list_requests(&filter)).await
        else {
            tracing::debug!("[RequestListView] Dropped list result for a left view");
            return Outcome::Discarded;
        };

        match result {
            Ok(requests) => {
                self.state = ListState {
                    loading: false,
                    requests,
                    error: None,
                    ..self.state.clone()
                };
                Outcome::Applied(Ok(()))
            }
            Err(e) => {
                self.state = ListState {
                    loading: false,
                    error: Some(e.user_message()),
                    ..self.state.clone()
                };
                Outcome::Applied(Err(e))
            }
        }
    }
}
