pub fn generate_starter_config() -> String {
    r#"# =============================================================================
# PODLOGS CONFIGURATION
# =============================================================================
# Every key is optional. Without a config file the values below are used.
#
# Config file locations (in order of precedence):
#   1. Path specified via --config argument
#   2. ~/.config/podlogs/config.yml
#   3. /etc/podlogs/config.yml

# CloudWatch Logs group holding the container logs
log_group: /aws/containerinsights/prod/application

# =============================================================================
# AWS CLI
# =============================================================================

aws:
  # Executable used for every call (tilde is expanded)
  program: aws
  # Passed as --region / --profile when set
  # region: eu-west-1
  # profile: prod
  # A single CLI call exceeding this is treated as failed
  call_timeout: 30s

# =============================================================================
# QUERY
# =============================================================================
# The query string is built as:
#   filter @logStream like /<stream_prefix><target>/
#     and @message like /"container_name":"<container_name>"/
#   | fields <payload_field> | sort @timestamp [asc|desc]

query:
  stream_prefix: patcher-
  container_name: patcher
  # Result field holding the JSON-encoded container log event
  payload_field: "@message"
  # Key inside that event holding the log line
  line_field: log
  # Order of lines within a window. Left unset, the service default applies
  # (newest first).
  # sort: asc

# =============================================================================
# RETRIEVAL
# =============================================================================

retrieval:
  # The requested period is split into windows of this size (whole seconds)
  chunk_size: 1h
  # Status checks per window before giving up and reading what is there
  max_poll_attempts: 120
  poll_interval: 500ms
  # Overall limit on waiting for one window's query, however slow the
  # individual status calls are
  max_poll_wait: 60s
  # Windows queried at the same time; output order is unaffected
  max_concurrent_windows: 1
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse::{parse_config, validate_config};
    use crate::config::types::Config;

    #[test]
    fn test_starter_config_matches_defaults() {
        let parsed = parse_config(&generate_starter_config()).unwrap();
        validate_config(&parsed).unwrap();

        let defaults = Config::default();
        assert_eq!(parsed.log_group, defaults.log_group);
        assert_eq!(parsed.aws.program, defaults.aws.program);
        assert_eq!(parsed.aws.call_timeout, defaults.aws.call_timeout);
        assert_eq!(parsed.query.stream_prefix, defaults.query.stream_prefix);
        assert_eq!(parsed.query.payload_field, defaults.query.payload_field);
        assert_eq!(parsed.query.sort, defaults.query.sort);
        assert_eq!(parsed.retrieval.chunk_size, defaults.retrieval.chunk_size);
        assert_eq!(parsed.retrieval.poll_interval, defaults.retrieval.poll_interval);
        assert_eq!(parsed.retrieval.max_poll_wait, defaults.retrieval.max_poll_wait);
        assert_eq!(
            parsed.retrieval.max_poll_attempts,
            defaults.retrieval.max_poll_attempts
        );
    }
}
