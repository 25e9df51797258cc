//! Session domain model.
//!
//! A session is the credential/identity pair returned by a successful login.
//! Both halves always travel together: there is no way to build a `Session`
//! with only one of them.

use crate::auth::Role;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric user identifier as assigned by the request service.
pub type UserId = i64;

/// Opaque bearer credential.
///
/// `Debug` never prints the credential itself.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Decodes the payload segment of a JWT-shaped token.
    ///
    /// Returns `None` for opaque tokens. The signature is not checked; the
    /// claims are only used to notice locally that a session has expired.
    pub fn claims(&self) -> Option<TokenClaims> {
        let payload = self.0.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Decoded token payload. Decode only; verification is server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.exp, Some(exp) if exp <= now.timestamp())
    }
}

/// The authenticated user as reported by the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    /// Login identifier (e.g. "staff").
    pub identifier: String,
    /// Display name.
    pub name: String,
    pub role: Role,
}

/// Credential plus identity, set and cleared as one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: AccessToken,
    pub identity: Identity,
}

impl Session {
    pub fn new(token: AccessToken, identity: Identity) -> Self {
        Self { token, identity }
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    /// True if the token carries an expiry claim that has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.token
            .claims()
            .map(|claims| claims.is_expired_at(now))
            .unwrap_or(false)
    }
}
