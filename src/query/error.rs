use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single call to the remote service.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("call did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("command exited with {status}: {stderr}")]
    Exited { status: ExitStatus, stderr: String },

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
#[error("failed to start query: {0}")]
pub struct SubmitError(#[from] pub CallError);

#[derive(Debug, Error)]
#[error("failed to check query status: {0}")]
pub struct StatusError(#[from] pub CallError);

#[derive(Debug, Error)]
#[error("failed to fetch query results: {0}")]
pub struct FetchError(#[from] pub CallError);
