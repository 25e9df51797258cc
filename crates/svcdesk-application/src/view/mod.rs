//! Views.
//!
//! # Module Structure
//!
//! - `scope`: Ties in-flight results to the view activation that issued them
//! - `login`: Sign-in form
//! - `list`: Filtered request list
//! - `create`: Registration form
//! - `detail`: One request with its history and lifecycle actions
//!
//! Every view owns a single state struct. Each result replaces it as a
//! whole, so a renderer never sees a half-applied update.

mod create;
mod detail;
mod list;
mod login;
mod scope;

pub use create::{CreateForm, CreateState, RequestCreateView};
pub use detail::{DetailState, DetailStatus, RequestDetailView};
pub use list::{ListState, RequestListView};
pub use login::{LoginState, LoginView};
pub use scope::{Outcome, ViewHandle, ViewScope};

#[cfg(test)]
pub(crate) mod mocks;
