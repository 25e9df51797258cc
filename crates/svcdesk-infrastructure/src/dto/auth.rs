//! Login DTOs.

use serde::{Deserialize, Serialize};
use svcdesk_core::auth::Role;
use svcdesk_core::error::{DeskError, Result};
use svcdesk_core::session::{AccessToken, Identity, Session, UserId};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequestDto<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserDto {
    pub id: UserId,
    pub identifier: String,
    pub name: String,
    /// Absent for legacy accounts, which are requesters.
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponseDto {
    #[serde(default)]
    pub token: Option<String>,
    pub user: AuthUserDto,
}

impl TryFrom<LoginResponseDto> for Session {
    type Error = DeskError;

    fn try_from(dto: LoginResponseDto) -> Result<Self> {
        let token = AccessToken::new(dto.token.unwrap_or_default());
        if token.is_empty() {
            return Err(DeskError::transport("login response carried no token"));
        }
        Ok(Session::new(
            token,
            Identity {
                id: dto.user.id,
                identifier: dto.user.identifier,
                name: dto.user.name,
                role: dto.user.role.unwrap_or(Role::Requester),
            },
        ))
    }
}
