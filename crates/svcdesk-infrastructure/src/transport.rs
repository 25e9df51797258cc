//! Authenticated transport.
//!
//! Every outbound call goes through [`AuthenticatedTransport`]. It attaches
//! the current credential, tags the call with a correlation id and maps the
//! response status onto [`DeskError`]. A 401 on a call that carried a
//! credential tears the session down and signals a redirect to login.

use crate::http::{ApiRequest, ApiResponse, AuthMode, HttpExchange, OutboundCall};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::route::{Navigator, Route};
use svcdesk_core::session::{AccessToken, SessionStore};
use tracing::Instrument;
use uuid::Uuid;

pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_NOT_FOUND: u16 = 404;

#[derive(Clone)]
pub struct AuthenticatedTransport {
    exchange: Arc<dyn HttpExchange>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthenticatedTransport {
    pub fn new(
        exchange: Arc<dyn HttpExchange>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            exchange,
            store,
            navigator,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Sends `request` and returns the response if its status is a success.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let bearer = match request.auth {
            AuthMode::Bearer => self.store.get().map(|session| session.token.clone()),
            AuthMode::Anonymous => None,
        };
        let call = OutboundCall {
            request,
            bearer,
            request_id: Uuid::new_v4().to_string(),
        };

        let span = tracing::debug_span!(
            "api_call",
            method = %call.request.method,
            path = %call.request.path,
            request_id = %call.request_id,
        );
        let response = self.exchange.send(&call).instrument(span).await?;

        if response.is_success() {
            tracing::debug!(
                "[AuthenticatedTransport] {} {} -> {} ({})",
                call.request.method,
                call.request.path,
                response.status,
                call.request_id
            );
            return Ok(response);
        }
        Err(self.map_failure(&call, &response))
    }

    /// Sends `request` and decodes the successful body as `T`.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.execute(request).await?.json()
    }

    fn map_failure(&self, call: &OutboundCall, response: &ApiResponse) -> DeskError {
        match response.status {
            STATUS_UNAUTHORIZED => {
                match (&call.bearer, call.request.auth) {
                    (Some(token), _) => self.teardown(token, &call.request_id),
                    (None, AuthMode::Bearer) => self.redirect_signed_out(call),
                    (None, AuthMode::Anonymous) => tracing::debug!(
                        "[AuthenticatedTransport] 401 on {} without credential ({})",
                        call.request.path,
                        call.request_id
                    ),
                }
                DeskError::Unauthenticated
            }
            STATUS_NOT_FOUND => {
                let (entity_type, id) = call
                    .request
                    .entity
                    .clone()
                    .unwrap_or(("resource", call.request.path.clone()));
                DeskError::not_found(entity_type, id)
            }
            status => {
                let message = response.error_message();
                tracing::warn!(
                    "[AuthenticatedTransport] {} {} failed with {}: {} ({})",
                    call.request.method,
                    call.request.path,
                    status,
                    message,
                    call.request_id
                );
                DeskError::Remote { status, message }
            }
        }
    }

    /// Clears the session the rejected call was made with.
    ///
    /// Only the first rejection of a given credential clears the store and
    /// redirects. Later rejections of the same credential, or of one that
    /// was already replaced by a new login, change nothing.
    fn teardown(&self, token: &AccessToken, request_id: &str) {
        if self.store.clear_if_current(token) {
            tracing::warn!(
                "[AuthenticatedTransport] Credential rejected, session cleared ({})",
                request_id
            );
            self.navigator.navigate(Route::Login);
        } else {
            tracing::debug!(
                "[AuthenticatedTransport] Credential rejected, session already replaced ({})",
                request_id
            );
        }
    }

    /// A protected call went out with no session to attach. There is
    /// nothing to clear, so only send the user to login, unless a login
    /// completed while the call was in flight.
    fn redirect_signed_out(&self, call: &OutboundCall) {
        if self.store.is_authenticated() {
            tracing::debug!(
                "[AuthenticatedTransport] 401 on {} sent before login completed ({})",
                call.request.path,
                call.request_id
            );
            return;
        }
        tracing::info!(
            "[AuthenticatedTransport] {} requires a session, redirecting to login ({})",
            call.request.path,
            call.request_id
        );
        self.navigator.navigate(Route::Login);
    }
}
