//! Application layer for svcdesk.
//!
//! Views coordinate the gateways for one screen each and hold the state a
//! front end renders. `DeskContext` wires everything together.

pub mod context;
pub mod view;

pub use context::DeskContext;
pub use view::{
    LoginView, Outcome, RequestCreateView, RequestDetailView, RequestListView, ViewHandle,
    ViewScope,
};
