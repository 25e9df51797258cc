//! Domain layer for svcdesk.
//!
//! Holds the request lifecycle state machine, the session and role model,
//! navigation gating, and the traits the infrastructure layer implements.

pub mod assist;
pub mod auth;
pub mod config;
pub mod error;
pub mod reference;
pub mod request;
pub mod route;
pub mod session;

// Re-export common error type
pub use error::DeskError;
