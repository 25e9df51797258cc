//! Login view.

use super::scope::{Outcome, ViewScope};
use serde::Serialize;
use std::sync::Arc;
use svcdesk_core::auth::AuthGateway;
use svcdesk_core::error::Result;
use svcdesk_core::route::{Navigator, Route};
use svcdesk_core::session::Identity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginState {
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_in_as: Option<Identity>,
}

pub struct LoginView {
    auth: Arc<dyn AuthGateway>,
    navigator: Arc<dyn Navigator>,
    scope: ViewScope,
    state: LoginState,
}

impl LoginView {
    pub fn new(auth: Arc<dyn AuthGateway>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            scope: ViewScope::new(),
            state: LoginState::default(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Submits the credentials once.
    ///
    /// On failure the state carries the generic login error and the session
    /// store is untouched.
    pub async fn submit(&mut self, identifier: &str, secret: &str) -> Outcome<Result<()>> {
        self.state = LoginState {
            submitting: true,
            ..LoginState::default()
        };

        let outcome = self.scope.run(self.auth.login(identifier, secret)).await;
        let Outcome::Applied(result) = outcome else {
            tracing::debug!("[LoginView] Login finished after the view was left");
            return Outcome::Discarded;
        };

        match result {
            Ok(session) => {
                tracing::info!("[LoginView] Signed in as {}", session.identity.identifier);
                self.state = LoginState {
                    signed_in_as: Some(session.identity.clone()),
                    ..LoginState::default()
                };
                self.navigator.navigate(Route::RequestList);
                Outcome::Applied(Ok(()))
            }
            Err(e) => {
                self.state = LoginState {
                    error: Some(e.user_message()),
                    ..LoginState::default()
                };
                Outcome::Applied(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::mocks::{MockAuthGateway, RecordingNavigator};
    use svcdesk_core::DeskError;
    use svcdesk_core::auth::Role;

    fn view(auth: MockAuthGateway) -> (LoginView, Arc<MockAuthGateway>, Arc<RecordingNavigator>) {
        let auth = Arc::new(auth);
        let navigator = Arc::new(RecordingNavigator::default());
        (
            LoginView::new(auth.clone(), navigator.clone()),
            auth,
            navigator,
        )
    }

    #[tokio::test]
    async fn test_successful_login_navigates_to_list() {
        let (mut view, auth, navigator) = view(MockAuthGateway::accepting(Role::Staff));

        let outcome = view.submit("staff", "secret").await;
        assert_eq!(outcome, Outcome::Applied(Ok(())));
        assert!(!view.state().submitting);
        assert!(view.state().error.is_none());
        assert_eq!(view.state().signed_in_as.as_ref().map(|i| i.role), Some(Role::Staff));
        assert!(auth.current_session().is_some());
        assert_eq!(navigator.routes(), vec![Route::RequestList]);
    }

    #[tokio::test]
    async fn test_failed_login_shows_generic_message() {
        let (mut view, auth, navigator) = view(MockAuthGateway::accepting(Role::Staff));

        let outcome = view.submit("staff", "wrong").await;
        assert_eq!(outcome, Outcome::Applied(Err(DeskError::LoginFailed)));
        assert_eq!(
            view.state().error.as_deref(),
            Some("Invalid identifier or password.")
        );
        assert!(auth.current_session().is_none());
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_left_view_discards_login_result() {
        let (mut view, _auth, navigator) = view(MockAuthGateway::accepting(Role::Admin));
        view.scope().handle().abandon();

        assert!(view.submit("admin", "secret").await.is_discarded());
        assert!(navigator.routes().is_empty());
    }
}
