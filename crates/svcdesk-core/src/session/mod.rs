//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session, identity and token types
//! - `store`: Storage trait for the current session
//!
//! # Usage
//!
//! ```ignore
//! use svcdesk_core::session::{Session, Identity, AccessToken, SessionStore};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{AccessToken, Identity, Session, TokenClaims, UserId};
pub use store::SessionStore;
