//! Authentication gateway trait.

use async_trait::async_trait;
use std::sync::Arc;

use super::capability::Capability;
use super::role::Role;
use crate::error::Result;
use crate::session::{Identity, Session};

/// Exchanges credentials for a session and answers role questions.
///
/// Role predicates read the session store at call time. Implementations
/// must not cache a role, so a logout followed by a login as someone else
/// is reflected immediately.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Performs one unauthenticated login call.
    ///
    /// On success the session store holds exactly the returned session. On
    /// any failure the store is left untouched and the error is
    /// `DeskError::LoginFailed` (or a validation error for blank input),
    /// never a detail of why the login was refused.
    async fn login(&self, identifier: &str, secret: &str) -> Result<Arc<Session>>;

    /// Clears the session and signals a return to the login entry point.
    /// Calling it without a session only emits the signal.
    fn logout(&self);

    /// Snapshot of the current session.
    fn current_session(&self) -> Option<Arc<Session>>;

    fn current_identity(&self) -> Option<Identity> {
        self.current_session().map(|s| s.identity.clone())
    }

    fn current_role(&self) -> Option<Role> {
        self.current_session().map(|s| s.role())
    }

    /// True if the current user has exactly `role`.
    fn has_role(&self, role: Role) -> bool {
        self.current_role() == Some(role)
    }

    /// True if the current user has any of `roles`.
    fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_role().is_some_and(|r| roles.contains(&r))
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.current_role()
            .is_some_and(|r| capability.granted_to(r))
    }

    fn can_register(&self) -> bool {
        self.has_capability(Capability::Register)
    }

    fn can_classify_or_assign(&self) -> bool {
        self.has_capability(Capability::Triage)
    }

    fn can_close(&self) -> bool {
        self.has_capability(Capability::Close)
    }
}
