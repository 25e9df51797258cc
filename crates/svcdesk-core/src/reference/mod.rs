//! Reference data: small lookup sets used to fill forms and resolve names.
//!
//! Fetched once per view activation; read-only on the client.

use crate::session::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestType {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// A lifecycle state as described by the request service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInfo {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub identifier: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Lookup sets loaded together for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub request_types: Vec<RequestType>,
    pub channels: Vec<Channel>,
    pub states: Vec<StateInfo>,
    pub users: Vec<UserSummary>,
}

impl ReferenceData {
    pub fn request_type(&self, id: i64) -> Option<&RequestType> {
        self.request_types.iter().find(|t| t.id == id)
    }

    pub fn request_type_by_code(&self, code: &str) -> Option<&RequestType> {
        self.request_types
            .iter()
            .find(|t| t.code.eq_ignore_ascii_case(code))
    }

    pub fn channel(&self, id: i64) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn user(&self, id: UserId) -> Option<&UserSummary> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Users a request may be assigned to.
    pub fn assignable_users(&self) -> impl Iterator<Item = &UserSummary> {
        self.users.iter().filter(|u| u.active)
    }

    /// States in display order.
    pub fn ordered_states(&self) -> Vec<&StateInfo> {
        let mut states: Vec<_> = self.states.iter().collect();
        states.sort_by_key(|s| s.order);
        states
    }
}
