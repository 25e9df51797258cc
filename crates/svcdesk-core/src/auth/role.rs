//! Role domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Privilege level of an authenticated user.
///
/// The declaration order is the privilege order: `Requester < Staff < Admin`.
/// Capability checks compare roles with `>=`, so adding a role means
/// placing it at the right position here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    /// Submits requests and follows their progress.
    #[serde(alias = "STUDENT")]
    #[strum(to_string = "REQUESTER", serialize = "STUDENT")]
    Requester,
    /// Classifies, assigns and attends requests.
    Staff,
    /// Everything staff can do, plus closing requests.
    Admin,
}

impl Role {
    /// All roles, lowest privilege first.
    pub const ALL: [Role; 3] = [Role::Requester, Role::Staff, Role::Admin];

    /// Returns true if this role grants at least the privileges of `minimum`.
    pub fn at_least(self, minimum: Role) -> bool {
        self >= minimum
    }
}
