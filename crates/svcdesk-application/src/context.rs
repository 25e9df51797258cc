//! Composition root: wires configuration, storage, transport and gateways.

use crate::view::{LoginView, RequestCreateView, RequestDetailView, RequestListView};
use std::sync::Arc;
use svcdesk_core::auth::AuthGateway;
use svcdesk_core::config::ClientConfig;
use svcdesk_core::error::Result;
use svcdesk_core::request::{RequestGateway, RequestId};
use svcdesk_core::route::{Navigator, Route, RouteAccessControl};
use svcdesk_core::session::SessionStore;
use svcdesk_infrastructure::{
    AuthenticatedTransport, ChannelNavigator, HttpAuthGateway, HttpExchange, HttpRequestGateway,
    ReqwestExchange, open_session_store,
};
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything a front end needs, sharing one session store.
#[derive(Clone)]
pub struct DeskContext {
    pub config: ClientConfig,
    pub store: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub auth: Arc<dyn AuthGateway>,
    pub requests: Arc<dyn RequestGateway>,
    pub access: Arc<RouteAccessControl>,
}

impl DeskContext {
    /// Builds the context for `config`. Navigation signals arrive on the
    /// returned receiver.
    pub fn build(config: ClientConfig) -> Result<(Self, UnboundedReceiver<Route>)> {
        config.validate()?;
        let exchange = Arc::new(ReqwestExchange::new(config.clone())?);
        let store = open_session_store(config.session_storage);
        let (navigator, routes) = ChannelNavigator::new();
        tracing::debug!(
            "[DeskContext] API at {} with {:?} session storage",
            config.api_base_url,
            config.session_storage
        );
        Ok((Self::from_parts(config, exchange, store, Arc::new(navigator)), routes))
    }

    pub fn from_parts(
        config: ClientConfig,
        exchange: Arc<dyn HttpExchange>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let transport = AuthenticatedTransport::new(exchange, store.clone(), navigator.clone());
        let auth = Arc::new(HttpAuthGateway::new(
            transport.clone(),
            store.clone(),
            navigator.clone(),
        ));
        let requests = Arc::new(HttpRequestGateway::new(transport));
        let access = Arc::new(RouteAccessControl::new(store.clone(), navigator.clone()));
        Self {
            config,
            store,
            navigator,
            auth,
            requests,
            access,
        }
    }

    pub fn login_view(&self) -> LoginView {
        LoginView::new(self.auth.clone(), self.navigator.clone())
    }

    pub fn list_view(&self) -> RequestListView {
        RequestListView::new(self.requests.clone())
    }

    pub fn create_view(&self) -> RequestCreateView {
        RequestCreateView::new(
            self.auth.clone(),
            self.requests.clone(),
            self.navigator.clone(),
        )
    }

    pub fn detail_view(&self, id: RequestId) -> RequestDetailView {
        RequestDetailView::new(
            id,
            self.auth.clone(),
            self.requests.clone(),
            self.navigator.clone(),
        )
    }
}
