//! Request gateway trait.

use async_trait::async_trait;

use super::command::{CreateRequest, TransitionCommand};
use super::filter::RequestFilter;
use super::history::HistoryEntry;
use super::model::{Request, RequestId};
use crate::assist::{AssistStatus, ClassificationSuggestion};
use crate::error::Result;
use crate::reference::{Channel, ReferenceData, RequestType, StateInfo, UserSummary};

/// Typed remote-call surface of the request service.
///
/// Every mutating call returns the request as the service now sees it.
/// Callers must inspect the result; an `Err` means nothing can be assumed
/// about the remote state.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Lists requests matching every criterion in `filter`.
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<Request>>;

    /// Fetches one request. A missing id is `DeskError::NotFound`.
    async fn get_request(&self, id: RequestId) -> Result<Request>;

    async fn create_request(&self, request: &CreateRequest) -> Result<Request>;

    /// Dispatches a lifecycle transition.
    async fn transition(&self, id: RequestId, command: &TransitionCommand) -> Result<Request>;

    /// Audit trail, as ordered by the service.
    async fn history(&self, id: RequestId) -> Result<Vec<HistoryEntry>>;

    async fn request_types(&self) -> Result<Vec<RequestType>>;

    async fn channels(&self) -> Result<Vec<Channel>>;

    async fn states(&self) -> Result<Vec<StateInfo>>;

    async fn users(&self) -> Result<Vec<UserSummary>>;

    async fn assist_status(&self) -> Result<AssistStatus>;

    async fn suggest_classification(&self, description: &str) -> Result<ClassificationSuggestion>;

    /// Loads all four lookup sets concurrently.
    async fn reference_data(&self) -> Result<ReferenceData> {
        let (request_types, channels, states, users) = futures::join!(
            self.request_types(),
            self.channels(),
            self.states(),
            self.users(),
        );
        Ok(ReferenceData {
            request_types: request_types?,
            channels: channels?,
            states: states?,
            users: users?,
        })
    }
}
