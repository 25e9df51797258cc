//! List filters for requests.

use super::model::Request;
use super::state::{LifecycleState, Priority};
use crate::session::UserId;
use serde::{Deserialize, Serialize};

/// Conjunctive request filter. Every criterion is optional; an absent
/// criterion does not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    pub state: Option<LifecycleState>,
    pub request_type: Option<i64>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<UserId>,
}

impl RequestFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_state(mut self, state: LifecycleState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_request_type(mut self, request_type: i64) -> Self {
        self.request_type = Some(request_type);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Query parameters for the list endpoint; absent criteria are omitted.
    ///
    /// States go out as service codes (`CLASIFICADA`, ...). The service
    /// ignores a state it cannot resolve instead of rejecting the call.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state {
            pairs.push(("state", state.wire_code().to_string()));
        }
        if let Some(request_type) = self.request_type {
            pairs.push(("requestType", request_type.to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(assigned_to) = self.assigned_to {
            pairs.push(("assignedTo", assigned_to.to_string()));
        }
        pairs
    }

    /// True if `request` satisfies every present criterion.
    pub fn matches(&self, request: &Request) -> bool {
        self.state.is_none_or(|state| request.state == state)
            && self
                .request_type
                .is_none_or(|id| request.request_type.id == id)
            && self
                .priority
                .is_none_or(|priority| request.priority == Some(priority))
            && self.assigned_to.is_none_or(|user_id| {
                request
                    .assigned_to
                    .as_ref()
                    .is_some_and(|assignee| assignee.id == user_id)
            })
    }
}
