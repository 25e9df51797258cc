//! HTTP plumbing.
//!
//! `HttpExchange` is the seam between the authenticated transport and the
//! wire. Production code uses [`ReqwestExchange`]; tests plug in an
//! in-memory service.

mod reqwest_exchange;

pub use reqwest_exchange::ReqwestExchange;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::session::AccessToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Whether the current credential is attached to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach the current session's token, if there is one.
    Bearer,
    /// Never attach a token (login).
    Anonymous,
}

/// A call as the gateways describe it, before any credential is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub auth: AuthMode,
    /// What a 404 on this call means, e.g. `("request", "42")`.
    pub entity: Option<(&'static str, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            auth: AuthMode::Bearer,
            entity: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        let mut request = Self::new(Method::Post, path);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    pub fn with_query<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    pub fn for_entity(mut self, entity_type: &'static str, id: impl ToString) -> Self {
        self.entity = Some((entity_type, id.to_string()));
        self
    }
}

/// An [`ApiRequest`] with its credential and correlation id resolved.
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub request: ApiRequest,
    pub bearer: Option<AccessToken>,
    pub request_id: String,
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body. A body that does not match `T` is a malformed
    /// response, reported as a transport failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| DeskError::transport(format!("malformed response: {}", e)))
    }

    /// Best-effort error text from a failed response.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

/// Sends one call and returns whatever came back.
///
/// Implementations report only network-level failures as `Err`; every
/// HTTP status, including errors, is an `Ok(ApiResponse)`.
#[async_trait]
pub trait HttpExchange: Send + Sync {
    async fn send(&self, call: &OutboundCall) -> Result<ApiResponse>;
}
