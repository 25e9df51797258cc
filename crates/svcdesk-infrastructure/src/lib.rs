//! Infrastructure layer for svcdesk.
//!
//! Implements the core traits against the outside world: the request
//! service over HTTP, session storage on disk or in memory, configuration
//! files and navigation channels.

pub mod auth_gateway;
pub mod config_service;
pub mod dto;
pub mod http;
pub mod navigator;
pub mod paths;
pub mod request_gateway;
pub mod session_store;
pub mod transport;

pub use crate::auth_gateway::HttpAuthGateway;
pub use crate::config_service::ConfigService;
pub use crate::http::{HttpExchange, ReqwestExchange};
pub use crate::navigator::ChannelNavigator;
pub use crate::paths::DeskPaths;
pub use crate::request_gateway::HttpRequestGateway;
pub use crate::session_store::{MemorySessionStore, RuntimeSessionStore, open_session_store};
pub use crate::transport::AuthenticatedTransport;
