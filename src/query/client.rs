use super::error::{FetchError, StatusError, SubmitError};
use super::filter::QueryFilter;
use super::types::{ContinuationToken, QueryHandle, QueryStatus, ResultPage};
use crate::window::TimeWindow;
use async_trait::async_trait;

/// The three operations of an asynchronous, windowed log query service.
///
/// Implementations make exactly one remote call per operation and never
/// retry; polling and pagination policy live in `crate::retrieval`.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Start a query over `window`.
    async fn submit(
        &self,
        window: &TimeWindow,
        filter: &QueryFilter,
    ) -> Result<QueryHandle, SubmitError>;

    /// Current execution status. A query the service does not know about is
    /// reported as [`QueryStatus::Unknown`], not as an error.
    async fn check_status(&self, handle: &QueryHandle) -> Result<QueryStatus, StatusError>;

    /// One page of results, starting after `token` when given.
    async fn fetch_page(
        &self,
        handle: &QueryHandle,
        token: Option<&ContinuationToken>,
    ) -> Result<ResultPage, FetchError>;
}
