//! Request domain model.
//!
//! Requests are snapshots of server state. The client never advances a
//! request on its own; it replaces its snapshot with whatever the request
//! service returns.

use super::state::{LifecycleState, Priority};
use crate::session::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequence identifier of a request.
pub type RequestId = i64;

/// Reference to a lookup entity (request type, channel) with optional
/// resolved display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedRef {
    pub fn id(id: i64) -> Self {
        Self {
            id,
            code: None,
            name: None,
        }
    }
}

/// Reference to a user with optional resolved display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserRef {
    pub fn id(id: UserId) -> Self {
        Self {
            id,
            identifier: None,
            name: None,
        }
    }
}

/// Priority assessment made when a request is classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub priority: Priority,
    pub justification: Option<String>,
}

/// A service request ("ticket").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub description: String,
    pub registered_at: DateTime<Utc>,
    /// Chosen at creation; may be changed by classification.
    pub request_type: NamedRef,
    /// Channel the request came in through.
    pub channel: NamedRef,
    pub state: LifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_justification: Option<String>,
    pub requested_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Request {
    /// The classification, once a priority has been set.
    pub fn classification(&self) -> Option<Classification> {
        self.priority.map(|priority| Classification {
            priority,
            justification: self
                .priority_justification
                .clone()
                .filter(|j| !j.trim().is_empty()),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    /// Lists every lifecycle invariant this snapshot breaks.
    ///
    /// The request service is the source of truth, so a violation is
    /// reported rather than corrected.
    pub fn invariant_violations(&self) -> Vec<&'static str> {
        let mut violations = Vec::new();
        if self.state == LifecycleState::Registered && self.classification().is_some() {
            violations.push("classified fields present while REGISTERED");
        }
        if self.state < LifecycleState::Classified && self.assigned_to.is_some() {
            violations.push("assignee present before CLASSIFIED");
        }
        let has_note = self
            .closure_observation
            .as_deref()
            .is_some_and(|note| !note.trim().is_empty());
        if has_note != self.is_closed() {
            violations.push("closure note must be present exactly when CLOSED");
        }
        violations
    }
}
