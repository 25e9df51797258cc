use super::{ApiResponse, HttpExchange, Method, OutboundCall};
use async_trait::async_trait;
use reqwest::Client;
use svcdesk_core::config::ClientConfig;
use svcdesk_core::error::{DeskError, Result};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// [`HttpExchange`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: Client,
    config: ClientConfig,
}

impl ReqwestExchange {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DeskError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn send(&self, call: &OutboundCall) -> Result<ApiResponse> {
        let url = self.config.endpoint(&call.request.path);
        let mut request = match call.request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !call.request.query.is_empty() {
            request = request.query(&call.request.query);
        }
        if let Some(body) = &call.request.body {
            request = request.json(body);
        }
        if let Some(token) = &call.bearer {
            request = request.header("Authorization", format!("Bearer {}", token.as_str()));
        }
        request = request.header(REQUEST_ID_HEADER, &call.request_id);

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                DeskError::transport(format!("{} {} timed out", call.request.method, url))
            } else {
                DeskError::transport(format!("{} {} failed: {}", call.request.method, url, err))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| DeskError::transport(format!("Failed to read response body: {}", err)))?;
        Ok(ApiResponse { status, body })
    }
}
