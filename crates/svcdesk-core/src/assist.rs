//! Classification assist models.
//!
//! The request service may offer an advisory lookup that proposes a request
//! type and priority from a description. Suggestions are shown to the staff
//! member and never applied automatically.

use crate::request::Priority;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether the assist lookup is configured on the service side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistStatus {
    pub available: bool,
}

/// A proposed classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_request_type_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_priority: Option<String>,
    /// `Some(false)` when the assist backend is down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ClassificationSuggestion {
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// The suggested priority, if it is one the client understands.
    pub fn priority(&self) -> Option<Priority> {
        self.suggested_priority
            .as_deref()
            .and_then(|p| Priority::from_str(p.trim()).ok())
    }
}
