use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOG_GROUP: &str = "/aws/containerinsights/prod/application";

/// Top-level configuration. Every section is optional; an empty file (or no
/// file at all) yields the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_log_group")]
    pub log_group: String,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_group: default_log_group(),
            aws: AwsConfig::default(),
            query: QueryConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

fn default_log_group() -> String {
    DEFAULT_LOG_GROUP.to_string()
}

/// How the `aws` command line client is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    /// Upper bound on a single CLI invocation.
    #[serde(default = "default_call_timeout", with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            region: None,
            profile: None,
            call_timeout: default_call_timeout(),
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("aws")
}

fn default_call_timeout() -> Duration {
    Duration::from_secs(30)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Log stream names are matched against `<stream_prefix><target>`.
    #[serde(default = "default_stream_prefix")]
    pub stream_prefix: String,
    #[serde(default = "default_container_name")]
    pub container_name: String,
    /// Result field holding the serialized container log event.
    #[serde(default = "default_payload_field")]
    pub payload_field: String,
    /// Key inside the payload holding the log line itself.
    #[serde(default = "default_line_field")]
    pub line_field: String,
    /// Explicit `@timestamp` direction; unset leaves it to the service.
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stream_prefix: default_stream_prefix(),
            container_name: default_container_name(),
            payload_field: default_payload_field(),
            line_field: default_line_field(),
            sort: None,
        }
    }
}

fn default_stream_prefix() -> String {
    "patcher-".to_string()
}

fn default_container_name() -> String {
    "patcher".to_string()
}

fn default_payload_field() -> String {
    "@message".to_string()
}

fn default_line_field() -> String {
    "log".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Length of each query window. Must be a whole number of seconds.
    #[serde(default = "default_chunk_size", with = "humantime_serde")]
    pub chunk_size: Duration,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Overall bound on waiting for one query, status calls included.
    #[serde(default = "default_max_poll_wait", with = "humantime_serde")]
    pub max_poll_wait: Duration,
    #[serde(default = "default_max_concurrent_windows")]
    pub max_concurrent_windows: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_poll_attempts: default_max_poll_attempts(),
            poll_interval: default_poll_interval(),
            max_poll_wait: default_max_poll_wait(),
            max_concurrent_windows: default_max_concurrent_windows(),
        }
    }
}

fn default_chunk_size() -> Duration {
    Duration::from_secs(3600)
}

fn default_max_poll_attempts() -> u32 {
    120
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

fn default_max_poll_wait() -> Duration {
    Duration::from_secs(60)
}

fn default_max_concurrent_windows() -> usize {
    1
}
