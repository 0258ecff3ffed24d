use crate::query::{QueryClient, QueryHandle, QueryStatus};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    /// Wall-clock bound on the whole wait, status calls included. A slow
    /// status call otherwise stretches every attempt up to the CLI timeout.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 120,
            interval: Duration::from_millis(500),
            max_wait: Some(Duration::from_secs(60)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("query {handle} not finished after {attempts} status checks (last seen: {last_status})")]
pub struct PollTimeout {
    pub handle: QueryHandle,
    pub attempts: u32,
    /// Last status successfully read, `Unknown` if every check failed.
    pub last_status: QueryStatus,
}

/// Check the status of `handle` until it reaches a terminal state, the
/// attempt budget is spent, or `max_wait` has elapsed.
///
/// Returns the terminal status observed (`Complete`, `Failed` or `Cancelled`).
/// Status check errors are logged at debug level and count as an attempt. A
/// status call still running at the deadline is abandoned and counts too.
pub async fn await_completion<C>(
    client: &C,
    handle: &QueryHandle,
    policy: &PollPolicy,
) -> Result<QueryStatus, PollTimeout>
where
    C: QueryClient + ?Sized,
{
    let deadline = policy.max_wait.map(|wait| Instant::now() + wait);
    let mut last_status = QueryStatus::Unknown;
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        attempts += 1;

        let check = client.check_status(handle);
        let result = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, check).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(query_id = %handle, attempt = attempts, "Poll deadline reached");
                    break;
                }
            },
            None => check.await,
        };

        match result {
            Ok(status) if status.is_terminal() => {
                tracing::debug!(query_id = %handle, attempt = attempts, status = %status, "Query finished");
                return Ok(status);
            }
            Ok(status) => {
                tracing::trace!(query_id = %handle, attempt = attempts, status = %status, "Query not finished");
                last_status = status;
            }
            Err(e) => {
                tracing::debug!(query_id = %handle, attempt = attempts, error = %e, "Status check failed");
            }
        }

        if attempts == policy.max_attempts {
            break;
        }
        if let Some(deadline) = deadline {
            if Instant::now() + policy.interval >= deadline {
                tracing::debug!(query_id = %handle, attempt = attempts, "Poll deadline reached");
                break;
            }
        }
        tokio::time::sleep(policy.interval).await;
    }

    Err(PollTimeout {
        handle: handle.clone(),
        attempts,
        last_status,
    })
}
