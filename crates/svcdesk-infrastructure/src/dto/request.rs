//! Request and history DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::request::{
    HistoryEntry, LifecycleState, NamedRef, Priority, Request, RequestId, UserRef,
};
use svcdesk_core::session::UserId;

/// A request as the service sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDto {
    pub id: RequestId,
    pub description: String,
    pub registered_at: DateTime<Utc>,
    pub request_type_id: i64,
    #[serde(default)]
    pub request_type_code: Option<String>,
    #[serde(default)]
    pub request_type_name: Option<String>,
    pub channel_id: i64,
    #[serde(default)]
    pub channel_code: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub state_id: Option<i64>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub priority_justification: Option<String>,
    pub requested_by_id: UserId,
    #[serde(default)]
    pub requested_by_identifier: Option<String>,
    #[serde(default)]
    pub requested_by_name: Option<String>,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    #[serde(default)]
    pub assigned_to_identifier: Option<String>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub closure_observation: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<RequestDto> for Request {
    type Error = DeskError;

    fn try_from(dto: RequestDto) -> Result<Self> {
        let code = dto
            .state_code
            .as_deref()
            .ok_or_else(|| DeskError::transport(format!("request {} has no state", dto.id)))?;
        let state: LifecycleState = code.trim().parse().map_err(|_| {
            DeskError::transport(format!("request {} has unknown state '{}'", dto.id, code))
        })?;

        Ok(Request {
            id: dto.id,
            description: dto.description,
            registered_at: dto.registered_at,
            request_type: NamedRef {
                id: dto.request_type_id,
                code: dto.request_type_code,
                name: dto.request_type_name,
            },
            channel: NamedRef {
                id: dto.channel_id,
                code: dto.channel_code,
                name: dto.channel_name,
            },
            state,
            state_name: dto.state_name,
            priority: dto.priority,
            priority_justification: dto.priority_justification,
            requested_by: UserRef {
                id: dto.requested_by_id,
                identifier: dto.requested_by_identifier,
                name: dto.requested_by_name,
            },
            assigned_to: dto.assigned_to_id.map(|id| UserRef {
                id,
                identifier: dto.assigned_to_identifier,
                name: dto.assigned_to_name,
            }),
            closure_observation: dto.closure_observation,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<&Request> for RequestDto {
    fn from(request: &Request) -> Self {
        let assignee = request.assigned_to.clone();
        Self {
            id: request.id,
            description: request.description.clone(),
            registered_at: request.registered_at,
            request_type_id: request.request_type.id,
            request_type_code: request.request_type.code.clone(),
            request_type_name: request.request_type.name.clone(),
            channel_id: request.channel.id,
            channel_code: request.channel.code.clone(),
            channel_name: request.channel.name.clone(),
            state_id: None,
            state_code: Some(request.state.wire_code().to_string()),
            state_name: request.state_name.clone(),
            priority: request.priority,
            priority_justification: request.priority_justification.clone(),
            requested_by_id: request.requested_by.id,
            requested_by_identifier: request.requested_by.identifier.clone(),
            requested_by_name: request.requested_by.name.clone(),
            assigned_to_id: assignee.as_ref().map(|a| a.id),
            assigned_to_identifier: assignee.as_ref().and_then(|a| a.identifier.clone()),
            assigned_to_name: assignee.and_then(|a| a.name),
            closure_observation: request.closure_observation.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    pub id: i64,
    pub request_id: RequestId,
    pub occurred_at: DateTime<Utc>,
    pub action: String,
    pub user_id: UserId,
    #[serde(default)]
    pub user_identifier: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
}

impl From<HistoryEntryDto> for HistoryEntry {
    fn from(dto: HistoryEntryDto) -> Self {
        HistoryEntry {
            id: dto.id,
            request_id: dto.request_id,
            occurred_at: dto.occurred_at,
            action: dto.action,
            user: UserRef {
                id: dto.user_id,
                identifier: dto.user_identifier,
                name: dto.user_name,
            },
            observations: dto.observations,
        }
    }
}

impl From<&HistoryEntry> for HistoryEntryDto {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            request_id: entry.request_id,
            occurred_at: entry.occurred_at,
            action: entry.action.clone(),
            user_id: entry.user.id,
            user_identifier: entry.user.identifier.clone(),
            user_name: entry.user.name.clone(),
            observations: entry.observations.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequestDto {
    pub description: String,
}
