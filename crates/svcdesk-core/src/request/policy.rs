//! Transition policy: which lifecycle actions a role may take in a state.
//!
//! Pure functions only. The view re-derives the legal action set from every
//! fresh snapshot, and the same table gates each transition before it is
//! dispatched. The request service enforces the same rules independently.

use super::command::TransitionCommand;
use super::state::LifecycleState;
use crate::auth::Role;
use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A lifecycle transition, named by what the actor does.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Action {
    Classify,
    Assign,
    Attend,
    Close,
}

impl Action {
    /// The only state in which this action is legal.
    pub fn required_state(self) -> LifecycleState {
        match self {
            Self::Classify => LifecycleState::Registered,
            Self::Assign => LifecycleState::Classified,
            Self::Attend => LifecycleState::InProgress,
            Self::Close => LifecycleState::Attended,
        }
    }

    /// The lowest role allowed to perform this action.
    pub fn minimum_role(self) -> Role {
        match self {
            Self::Classify | Self::Assign | Self::Attend => Role::Staff,
            Self::Close => Role::Admin,
        }
    }

    /// The state a successful transition leads to.
    pub fn target_state(self) -> LifecycleState {
        match self {
            Self::Classify => LifecycleState::Classified,
            Self::Assign => LifecycleState::InProgress,
            Self::Attend => LifecycleState::Attended,
            Self::Close => LifecycleState::Closed,
        }
    }
}

/// Set of actions legal for one (state, role) pair.
pub type ActionSet = BTreeSet<Action>;

/// Stateless transition table.
pub struct TransitionPolicy;

impl TransitionPolicy {
    /// Legal actions for an actor with `role` on a request in `state`.
    ///
    /// `role` is `None` when nobody is signed in, which permits nothing.
    pub fn legal_actions(state: LifecycleState, role: Option<Role>) -> ActionSet {
        let Some(role) = role else {
            return ActionSet::new();
        };
        Action::iter()
            .filter(|action| action.required_state() == state)
            .filter(|action| role.at_least(action.minimum_role()))
            .collect()
    }

    pub fn is_permitted(state: LifecycleState, role: Option<Role>, action: Action) -> bool {
        Self::legal_actions(state, role).contains(&action)
    }

    /// Gate for a single transition, evaluated before dispatch.
    ///
    /// Payload validation runs first, so an empty closure note is always a
    /// validation failure whatever the state or role.
    pub fn check(
        state: LifecycleState,
        role: Option<Role>,
        command: &TransitionCommand,
    ) -> Result<()> {
        command.validate()?;
        let action = command.action();
        if !Self::is_permitted(state, role, action) {
            tracing::debug!(
                "[TransitionPolicy] Rejected {} in state {} for role {:?}",
                action,
                state,
                role
            );
            return Err(DeskError::NotPermitted {
                action,
                state,
                role,
            });
        }
        Ok(())
    }
}
