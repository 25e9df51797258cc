//! Error types for the svcdesk client.

use crate::auth::Role;
use crate::request::{Action, LifecycleState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire svcdesk client.
///
/// Variants follow the failure categories a caller must branch on:
/// local validation, authorization, authentication, remote/transport
/// failures and missing entities.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeskError {
    /// Local input validation failed; never reaches the network.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The state/role precondition for an action is unmet.
    #[error("Action '{action}' not permitted in state {state} for role {role:?}")]
    NotPermitted {
        action: Action,
        state: LifecycleState,
        role: Option<Role>,
    },

    /// Credential missing, invalid or expired.
    #[error("Authentication required")]
    Unauthenticated,

    /// Login was rejected. Deliberately carries no detail.
    #[error("Login failed")]
    LoginFailed,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The remote service answered with a non-success status.
    #[error("Remote service error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Network failure or malformed response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a field-level validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a local validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an authorization (state/role) error
    pub fn is_not_permitted(&self) -> bool {
        matches!(self, Self::NotPermitted { .. })
    }

    /// Check if this is an authentication error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for failures that were decided locally, before dispatch.
    pub fn is_local(&self) -> bool {
        self.is_validation() || self.is_not_permitted()
    }

    /// Returns true when the user may simply try the same thing again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::Transport(_))
    }

    /// The single user-facing message for this failure category.
    ///
    /// Validation messages are field-level and pass through; every other
    /// category maps to one generic text so that no view leaks more detail
    /// than the remote service itself signals.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotPermitted { .. } => "Action not permitted.".to_string(),
            Self::Unauthenticated => "Your session has ended. Please sign in again.".to_string(),
            Self::LoginFailed => "Invalid identifier or password.".to_string(),
            Self::NotFound { entity_type, .. } => format!("The {} was not found.", entity_type),
            Self::Remote { .. } | Self::Transport(_) => {
                "The service could not complete the request. Please try again.".to_string()
            }
            Self::Serialization { .. } | Self::Config(_) | Self::Internal(_) => {
                "Unexpected error.".to_string()
            }
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DeskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DeskError>`.
pub type Result<T> = std::result::Result<T, DeskError>;
