//! Lifecycle state and priority value objects.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Stage of a request within its forward-only lifecycle.
///
/// Declaration order is lifecycle order. The request service also reports
/// states with its own deployment codes (`REGISTRADA`, ...), which are
/// accepted as aliases.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LifecycleState {
    #[serde(alias = "REGISTRADA")]
    #[strum(to_string = "REGISTERED", serialize = "REGISTRADA")]
    Registered,
    #[serde(alias = "CLASIFICADA")]
    #[strum(to_string = "CLASSIFIED", serialize = "CLASIFICADA")]
    Classified,
    #[serde(alias = "EN_ATENCION")]
    #[strum(to_string = "IN_PROGRESS", serialize = "EN_ATENCION")]
    InProgress,
    #[serde(alias = "ATENDIDA")]
    #[strum(to_string = "ATTENDED", serialize = "ATENDIDA")]
    Attended,
    #[serde(alias = "CERRADA")]
    #[strum(to_string = "CLOSED", serialize = "CERRADA")]
    Closed,
}

impl LifecycleState {
    /// All states, lifecycle order.
    pub const ALL: [LifecycleState; 5] = [
        Self::Registered,
        Self::Classified,
        Self::InProgress,
        Self::Attended,
        Self::Closed,
    ];

    /// The state a request moves to from here, or `None` when terminal.
    pub fn next(self) -> Option<LifecycleState> {
        match self {
            Self::Registered => Some(Self::Classified),
            Self::Classified => Some(Self::InProgress),
            Self::InProgress => Some(Self::Attended),
            Self::Attended => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }

    /// Canonical code, as shown to users.
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Code the request service stores the state under. The list endpoint
    /// only resolves a state filter given in this form.
    pub fn wire_code(self) -> &'static str {
        match self {
            Self::Registered => "REGISTRADA",
            Self::Classified => "CLASIFICADA",
            Self::InProgress => "EN_ATENCION",
            Self::Attended => "ATENDIDA",
            Self::Closed => "CERRADA",
        }
    }

    /// Exact inverse of [`wire_code`](Self::wire_code).
    pub fn from_wire_code(code: &str) -> Option<LifecycleState> {
        Self::ALL.into_iter().find(|s| s.wire_code() == code)
    }
}

/// Urgency assigned during classification.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Default priority for a request type code.
    ///
    /// Used only to pre-fill the classification form; the staff member
    /// always confirms or changes it.
    pub fn suggest_for_type_code(code: Option<&str>) -> Priority {
        match code.map(|c| c.trim().to_ascii_uppercase()).as_deref() {
            Some("HOMOLOG") | Some("CUPOS") => Priority::High,
            Some("CONSULTA") => Priority::Low,
            _ => Priority::Medium,
        }
    }
}
