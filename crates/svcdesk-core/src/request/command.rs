//! Request creation and transition request models.
//!
//! These are the payloads of the mutating calls. Each one can validate
//! itself so obviously incomplete input never costs a round trip; the
//! request service validates again and has the final word.

use super::model::RequestId;
use super::policy::Action;
use super::state::Priority;
use crate::error::{DeskError, Result};
use crate::session::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn require_positive(field: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(DeskError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Request to register a new service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    /// Free-text description (required)
    pub description: String,
    pub request_type_id: i64,
    pub channel_id: i64,
    pub requested_by_id: UserId,
    /// Server uses "now" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl CreateRequest {
    pub fn new(
        description: impl Into<String>,
        request_type_id: i64,
        channel_id: i64,
        requested_by_id: UserId,
    ) -> Self {
        Self {
            description: description.into(),
            request_type_id,
            channel_id,
            requested_by_id,
            registered_at: None,
        }
    }

    /// Validate the request and return the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(DeskError::validation(
                "description",
                "Description is required",
            ));
        }
        require_positive("requestTypeId", self.request_type_id)?;
        require_positive("channelId", self.channel_id)?;
        require_positive("requestedById", self.requested_by_id)?;
        Ok(())
    }

    /// Returns a copy with the description trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            description: self.description.trim().to_string(),
            ..self.clone()
        }
    }
}

/// REGISTERED → CLASSIFIED: set type and priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyCommand {
    pub request_type_id: i64,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_justification: Option<String>,
}

/// CLASSIFIED → IN_PROGRESS: set the assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCommand {
    pub assigned_to_id: UserId,
}

/// IN_PROGRESS → ATTENDED, with an optional observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// ATTENDED → CLOSED, with a mandatory closure note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseCommand {
    pub closure_observation: String,
}

impl CloseCommand {
    pub fn new(closure_observation: impl Into<String>) -> Self {
        Self {
            closure_observation: closure_observation.into(),
        }
    }
}

/// A lifecycle transition together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionCommand {
    Classify(ClassifyCommand),
    Assign(AssignCommand),
    Attend(AttendCommand),
    Close(CloseCommand),
}

impl TransitionCommand {
    pub fn action(&self) -> Action {
        match self {
            Self::Classify(_) => Action::Classify,
            Self::Assign(_) => Action::Assign,
            Self::Attend(_) => Action::Attend,
            Self::Close(_) => Action::Close,
        }
    }

    /// Field-level checks that do not depend on state or role.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Classify(cmd) => require_positive("requestTypeId", cmd.request_type_id),
            Self::Assign(cmd) => require_positive("assignedToId", cmd.assigned_to_id),
            Self::Attend(_) => Ok(()),
            Self::Close(cmd) => {
                if cmd.closure_observation.trim().is_empty() {
                    return Err(DeskError::validation(
                        "closureObservation",
                        "Closure observation is required",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Returns the payload as it should be sent: free text trimmed, blank
    /// optional notes dropped.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Classify(cmd) => Self::Classify(ClassifyCommand {
                priority_justification: non_blank(cmd.priority_justification.clone()),
                ..cmd.clone()
            }),
            Self::Assign(cmd) => Self::Assign(cmd.clone()),
            Self::Attend(cmd) => Self::Attend(AttendCommand {
                observations: non_blank(cmd.observations.clone()),
            }),
            Self::Close(cmd) => Self::Close(CloseCommand::new(cmd.closure_observation.trim())),
        }
    }

    /// Path segment of the transition endpoint for request `id`.
    pub fn path(&self, id: RequestId) -> String {
        format!("/requests/{}/{}", id, self.action())
    }
}
