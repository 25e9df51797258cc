//! Request history (audit trail) model.

use super::model::{RequestId, UserRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable audit record, produced by the request service as a side
/// effect of a transition. The client only fetches and displays these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub request_id: RequestId,
    pub occurred_at: DateTime<Utc>,
    /// Action label, e.g. "REGISTERED" or "ASSIGNED".
    pub action: String,
    pub user: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}
