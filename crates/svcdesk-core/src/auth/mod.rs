//! Authentication and authorization domain module.
//!
//! - `role`: The ordered set of roles
//! - `capability`: Role-derived permissions
//! - `gateway`: Login/logout trait with role predicates

mod capability;
mod gateway;
mod role;

// Re-export public API
pub use capability::Capability;
pub use gateway::AuthGateway;
pub use role::Role;
