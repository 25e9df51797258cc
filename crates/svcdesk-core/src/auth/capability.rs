//! Role-derived capabilities.

use super::role::Role;
use crate::request::Action;
use serde::{Deserialize, Serialize};

/// A category of things a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Register new requests.
    Register,
    /// Classify, assign and attend requests.
    Triage,
    /// Close attended requests.
    Close,
}

impl Capability {
    pub fn minimum_role(self) -> Role {
        match self {
            Self::Register => Role::Requester,
            Self::Triage => Role::Staff,
            Self::Close => Role::Admin,
        }
    }

    pub fn granted_to(self, role: Role) -> bool {
        role.at_least(self.minimum_role())
    }

    /// The capability a lifecycle action falls under.
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Classify | Action::Assign | Action::Attend => Self::Triage,
            Action::Close => Self::Close,
        }
    }
}
