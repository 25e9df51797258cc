//! Composable access predicates.

use crate::auth::{Capability, Role};
use crate::session::Session;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(Option<&Session>) -> bool + Send + Sync;

/// A predicate over the current session.
///
/// Guards combine with [`Guard::and`] and [`Guard::or`]; a new protected
/// view gets its rule by combining existing guards.
#[derive(Clone)]
pub struct Guard {
    label: String,
    predicate: Arc<Predicate>,
}

impl Guard {
    pub fn from_fn<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Session>) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn allow_all() -> Self {
        Self::from_fn("any", |_| true)
    }

    pub fn session_required() -> Self {
        Self::from_fn("session", |session| session.is_some())
    }

    /// Passes only when nobody is signed in (the login view).
    pub fn anonymous_only() -> Self {
        Self::from_fn("anonymous", |session| session.is_none())
    }

    pub fn role_at_least(minimum: Role) -> Self {
        Self::from_fn(format!("role>={}", minimum), move |session| {
            session.is_some_and(|s| s.role().at_least(minimum))
        })
    }

    pub fn capability(capability: Capability) -> Self {
        Self::from_fn(format!("{:?}", capability), move |session| {
            session.is_some_and(|s| capability.granted_to(s.role()))
        })
    }

    pub fn and(self, other: Guard) -> Self {
        let label = format!("({} && {})", self.label, other.label);
        Self::from_fn(label, move |session| {
            self.allows(session) && other.allows(session)
        })
    }

    pub fn or(self, other: Guard) -> Self {
        let label = format!("({} || {})", self.label, other.label);
        Self::from_fn(label, move |session| {
            self.allows(session) || other.allows(session)
        })
    }

    pub fn allows(&self, session: Option<&Session>) -> bool {
        (self.predicate)(session)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guard").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AccessToken, Identity};

    fn session(role: Role) -> Session {
        Session::new(
            AccessToken::new("t"),
            Identity {
                id: 1,
                identifier: "u".to_string(),
                name: "U".to_string(),
                role,
            },
        )
    }

    #[test]
    fn test_basic_guards() {
        let staff = session(Role::Staff);
        assert!(Guard::session_required().allows(Some(&staff)));
        assert!(!Guard::session_required().allows(None));
        assert!(Guard::anonymous_only().allows(None));
        assert!(!Guard::anonymous_only().allows(Some(&staff)));
        assert!(Guard::allow_all().allows(None));
    }

    #[test]
    fn test_guards_compose() {
        let admin_area = Guard::session_required().and(Guard::role_at_least(Role::Admin));
        assert!(admin_area.allows(Some(&session(Role::Admin))));
        assert!(!admin_area.allows(Some(&session(Role::Staff))));
        assert!(!admin_area.allows(None));

        let triage_or_close =
            Guard::capability(Capability::Triage).or(Guard::capability(Capability::Close));
        assert!(triage_or_close.allows(Some(&session(Role::Staff))));
        assert!(!triage_or_close.allows(Some(&session(Role::Requester))));
        assert_eq!(triage_or_close.label(), "(Triage || Close)");
    }
}
