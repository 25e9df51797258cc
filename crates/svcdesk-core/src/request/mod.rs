//! Request domain module.
//!
//! # Module Structure
//!
//! - `model`: The request snapshot and its references
//! - `state`: Lifecycle state and priority value objects
//! - `history`: Audit trail entries
//! - `command`: Payloads for creating and transitioning requests
//! - `filter`: Conjunctive list filter
//! - `policy`: The (state, role) → legal actions table
//! - `gateway`: Remote-call trait for the request service

mod command;
mod filter;
mod gateway;
mod history;
mod model;
mod policy;
mod state;

// Re-export public API
pub use command::{
    AssignCommand, AttendCommand, ClassifyCommand, CloseCommand, CreateRequest, TransitionCommand,
};
pub use filter::RequestFilter;
pub use gateway::RequestGateway;
pub use history::HistoryEntry;
pub use model::{Classification, NamedRef, Request, RequestId, UserRef};
pub use policy::{Action, ActionSet, TransitionPolicy};
pub use state::{LifecycleState, Priority};
