//! Navigation domain module.
//!
//! - `Route`: the views a user can navigate to
//! - `Navigator`: sink for navigation signals
//! - `guard`: composable access predicates
//! - `access`: the gate evaluated before every view is entered

mod access;
mod guard;

pub use access::{AccessDecision, AccessRule, RouteAccessControl};
pub use guard::Guard;

use crate::request::RequestId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    RequestList,
    RequestCreate,
    RequestDetail(RequestId),
}

impl Route {
    /// Resolves a path. Unknown paths fall back to the request list.
    pub fn parse(path: &str) -> Route {
        let path = path.trim().trim_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["requests", "new"] => Route::RequestCreate,
            ["requests", id] => match id.parse::<RequestId>() {
                Ok(id) if id > 0 => Route::RequestDetail(id),
                _ => Route::RequestList,
            },
            _ => Route::RequestList,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::RequestList => "/".to_string(),
            Route::RequestCreate => "/requests/new".to_string(),
            Route::RequestDetail(id) => format!("/requests/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation signals (e.g. "go to login").
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
