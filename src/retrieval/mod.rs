pub mod orchestrator;
pub mod paginator;
pub mod poller;

use crate::config::{ConfigError, RetrievalConfig};
use std::num::{NonZeroU64, NonZeroUsize};

pub use orchestrator::{Orchestrator, RetrievalReport, WindowOutcome, WindowReport};
pub use paginator::{drain, Drained, LineExtractor};
pub use poller::{await_completion, PollPolicy, PollTimeout};

/// Validated knobs for one retrieval run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalPolicy {
    /// Window length in seconds.
    pub chunk_size: NonZeroU64,
    pub poll: PollPolicy,
    pub max_concurrent_windows: NonZeroUsize,
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroU64::MIN.saturating_add(3599),
            poll: PollPolicy::default(),
            max_concurrent_windows: NonZeroUsize::MIN,
        }
    }
}

impl RetrievalPolicy {
    pub fn from_config(config: &RetrievalConfig) -> Result<Self, ConfigError> {
        let chunk_size = NonZeroU64::new(config.chunk_size.as_secs()).ok_or_else(|| {
            ConfigError::Validation("retrieval.chunk_size must be at least 1s".to_string())
        })?;
        let max_concurrent_windows = NonZeroUsize::new(config.max_concurrent_windows)
            .ok_or_else(|| {
                ConfigError::Validation(
                    "retrieval.max_concurrent_windows must be at least 1".to_string(),
                )
            })?;
        if config.max_poll_attempts == 0 {
            return Err(ConfigError::Validation(
                "retrieval.max_poll_attempts must be at least 1".to_string(),
            ));
        }
        if config.max_poll_wait.is_zero() {
            return Err(ConfigError::Validation(
                "retrieval.max_poll_wait must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            chunk_size,
            poll: PollPolicy {
                max_attempts: config.max_poll_attempts,
                interval: config.poll_interval,
                max_wait: Some(config.max_poll_wait),
            },
            max_concurrent_windows,
        })
    }
}
