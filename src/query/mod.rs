pub mod aws;
pub mod client;
pub mod error;
pub mod filter;
pub mod types;

pub use aws::AwsCliClient;
pub use client::QueryClient;
pub use error::{CallError, FetchError, StatusError, SubmitError};
pub use filter::{InvalidTarget, QueryFilter, TargetId};
pub use types::{ContinuationToken, QueryHandle, QueryStatus, Record, ResultField, ResultPage};
