//! Route access control.

use super::guard::Guard;
use super::{Navigator, Route};
use crate::auth::Capability;
use crate::session::SessionStore;
use std::sync::Arc;

/// A guard plus where to send the user when it fails.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub guard: Guard,
    pub redirect_to: Route,
}

impl AccessRule {
    pub fn new(guard: Guard, redirect_to: Route) -> Self {
        Self { guard, redirect_to }
    }

    /// The rule for views that need a signed-in user.
    pub fn authenticated() -> Self {
        Self::new(Guard::session_required(), Route::Login)
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(Route),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Gate evaluated before a view is entered.
///
/// Reads the session store on every call. Nothing is cached, because the
/// transport may tear the session down at any time.
#[derive(Clone)]
pub struct RouteAccessControl {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteAccessControl {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// The access rule for `route`.
    pub fn rule_for(route: &Route) -> AccessRule {
        match route {
            Route::Login => AccessRule::new(Guard::anonymous_only(), Route::RequestList),
            Route::RequestList | Route::RequestDetail(_) => AccessRule::authenticated(),
            Route::RequestCreate => AccessRule::new(
                Guard::session_required().and(Guard::capability(Capability::Register)),
                Route::Login,
            ),
        }
    }

    /// Evaluates `rule` against the current session without side effects.
    pub fn evaluate(&self, rule: &AccessRule) -> AccessDecision {
        let session = self.store.get();
        if rule.guard.allows(session.as_deref()) {
            AccessDecision::Allow
        } else {
            AccessDecision::Redirect(rule.redirect_to)
        }
    }

    /// Evaluates the rule for `route` without side effects.
    pub fn check(&self, route: &Route) -> AccessDecision {
        self.evaluate(&Self::rule_for(route))
    }

    /// Checks `route` and, on denial, signals the redirect.
    pub fn enter(&self, route: &Route) -> AccessDecision {
        let decision = self.check(route);
        if let AccessDecision::Redirect(target) = decision {
            tracing::debug!("[RouteAccessControl] Denied {}, redirecting to {}", route, target);
            self.navigator.navigate(target);
        }
        decision
    }
}
