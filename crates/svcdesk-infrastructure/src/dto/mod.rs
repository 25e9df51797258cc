//! Wire-format DTOs for the request service.
//!
//! The service speaks a flat JSON shape (`requestTypeId`,
//! `requestTypeCode`, ...). These types mirror it exactly and convert into
//! the nested domain model. They are private to the infrastructure layer.

mod auth;
mod request;

pub use auth::{AuthUserDto, LoginRequestDto, LoginResponseDto};
pub use request::{HistoryEntryDto, RequestDto, SuggestRequestDto};
