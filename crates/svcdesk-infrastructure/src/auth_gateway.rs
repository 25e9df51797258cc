use crate::dto::{LoginRequestDto, LoginResponseDto};
use crate::http::ApiRequest;
use crate::transport::AuthenticatedTransport;
use async_trait::async_trait;
use std::sync::Arc;
use svcdesk_core::auth::AuthGateway;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::route::{Navigator, Route};
use svcdesk_core::session::{Session, SessionStore};

pub const LOGIN_PATH: &str = "/auth/login";

/// [`AuthGateway`] backed by the request service's login endpoint.
pub struct HttpAuthGateway {
    transport: AuthenticatedTransport,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl HttpAuthGateway {
    pub fn new(
        transport: AuthenticatedTransport,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, identifier: &str, secret: &str) -> Result<Arc<Session>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(DeskError::validation("identifier", "Identifier is required"));
        }
        if secret.is_empty() {
            return Err(DeskError::validation("password", "Password is required"));
        }

        let body = LoginRequestDto {
            identifier,
            password: secret,
        };
        let request = ApiRequest::post(LOGIN_PATH, &body)?.anonymous();

        let session = self
            .transport
            .call::<LoginResponseDto>(request)
            .await
            .and_then(Session::try_from)
            .map_err(|e| {
                tracing::info!("[HttpAuthGateway] Login for '{}' failed: {}", identifier, e);
                DeskError::LoginFailed
            })?;

        tracing::info!(
            "[HttpAuthGateway] Logged in as '{}' ({})",
            session.identity.identifier,
            session.role()
        );
        self.store.set(session);
        self.store
            .get()
            .ok_or_else(|| DeskError::internal("session store dropped the new session"))
    }

    fn logout(&self) {
        if let Some(session) = self.store.get() {
            tracing::info!("[HttpAuthGateway] Logged out '{}'", session.identity.identifier);
        }
        self.store.clear();
        self.navigator.navigate(Route::Login);
    }

    fn current_session(&self) -> Option<Arc<Session>> {
        self.store.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ApiResponse, HttpExchange, OutboundCall};
    use crate::session_store::MemorySessionStore;
    use serde_json::json;
    use std::sync::Mutex;
    use svcdesk_core::auth::{Capability, Role};
    use svcdesk_core::session::{AccessToken, Identity};

    struct MockExchange {
        response: ApiResponse,
        calls: Mutex<Vec<OutboundCall>>,
    }

    impl MockExchange {
        fn new(response: ApiResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpExchange for MockExchange {
        async fn send(&self, call: &OutboundCall) -> Result<ApiResponse> {
            self.calls.lock().unwrap().push(call.clone());
            Ok(self.response.clone())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    struct Fixture {
        gateway: HttpAuthGateway,
        exchange: Arc<MockExchange>,
        store: Arc<MemorySessionStore>,
        navigator: Arc<RecordingNavigator>,
    }

    fn fixture(response: ApiResponse, store: MemorySessionStore) -> Fixture {
        let exchange = MockExchange::new(response);
        let store = Arc::new(store);
        let navigator = Arc::new(RecordingNavigator::default());
        let transport =
            AuthenticatedTransport::new(exchange.clone(), store.clone(), navigator.clone());
        Fixture {
            gateway: HttpAuthGateway::new(transport, store.clone(), navigator.clone()),
            exchange,
            store,
            navigator,
        }
    }

    fn login_ok(role: &str) -> ApiResponse {
        ApiResponse::json_body(
            200,
            &json!({
                "token": "tok-1",
                "user": {"id": 2, "identifier": "staff", "name": "Staff Member", "role": role}
            }),
        )
    }

    fn existing_session() -> Session {
        Session::new(
            AccessToken::new("previous"),
            Identity {
                id: 1,
                identifier: "admin".to_string(),
                name: "Administrator".to_string(),
                role: Role::Admin,
            },
        )
    }

    #[tokio::test]
    async fn test_login_stores_exact_session() {
        let f = fixture(login_ok("STAFF"), MemorySessionStore::new());

        let session = f.gateway.login("  staff ", "secret").await.unwrap();
        assert_eq!(session.token.as_str(), "tok-1");
        assert_eq!(session.identity.id, 2);
        assert_eq!(f.store.get(), Some(session));

        let calls = f.exchange.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].bearer.is_none());
        assert_eq!(
            calls[0].request.body,
            Some(json!({"identifier": "staff", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_role_predicates_follow_store() {
        let f = fixture(login_ok("STAFF"), MemorySessionStore::new());
        assert!(!f.gateway.has_role(Role::Staff));
        assert!(!f.gateway.can_register());

        f.gateway.login("staff", "secret").await.unwrap();
        assert!(f.gateway.has_role(Role::Staff));
        assert!(!f.gateway.has_role(Role::Admin));
        assert!(f.gateway.has_any_role(&[Role::Admin, Role::Staff]));
        assert!(f.gateway.can_classify_or_assign());
        assert!(!f.gateway.can_close());
        assert!(f.gateway.has_capability(Capability::Register));

        f.store.set(existing_session());
        assert!(f.gateway.can_close());
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_store_untouched() {
        let f = fixture(
            ApiResponse::json_body(401, &json!({"message": "Bad credentials"})),
            MemorySessionStore::with_session(existing_session()),
        );

        let err = f.gateway.login("admin", "wrong").await.unwrap_err();
        assert_eq!(err, DeskError::LoginFailed);
        assert_eq!(f.store.get().unwrap().token.as_str(), "previous");
        assert!(f.navigator.routes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_any_failure_is_login_failed() {
        for response in [
            ApiResponse::new(500, "boom"),
            ApiResponse::new(200, "not json"),
            ApiResponse::json_body(
                200,
                &json!({"token": "", "user": {"id": 1, "identifier": "a", "name": "A"}}),
            ),
        ] {
            let f = fixture(response, MemorySessionStore::new());
            let err = f.gateway.login("admin", "pw").await.unwrap_err();
            assert_eq!(err, DeskError::LoginFailed);
            assert!(f.store.get().is_none());
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_locally() {
        let f = fixture(login_ok("ADMIN"), MemorySessionStore::new());
        let err = f.gateway.login("   ", "pw").await.unwrap_err();
        assert!(err.is_validation());
        let err = f.gateway.login("admin", "").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(f.exchange.call_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_and_redirects() {
        let f = fixture(login_ok("ADMIN"), MemorySessionStore::with_session(existing_session()));
        f.gateway.logout();
        assert!(f.store.get().is_none());
        assert!(f.gateway.current_role().is_none());

        f.gateway.logout();
        assert_eq!(
            *f.navigator.routes.lock().unwrap(),
            vec![Route::Login, Route::Login]
        );
    }
}
