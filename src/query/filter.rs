use crate::config::{QueryConfig, SortOrder};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTarget {
    #[error("target id cannot be empty")]
    Empty,

    #[error("target id '{0}' may only contain letters, digits, '.', '_' and '-'")]
    Characters(String),
}

/// Workload instance whose logs are retrieved. Ends up inside regex literals
/// of the query string, hence the restricted alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetId(String);

impl TargetId {
    pub fn parse(raw: &str) -> Result<Self, InvalidTarget> {
        if raw.is_empty() {
            return Err(InvalidTarget::Empty);
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if !raw.chars().all(allowed) {
            return Err(InvalidTarget::Characters(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logs Insights query string shared by every window of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    expression: String,
}

impl QueryFilter {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    pub fn for_target(target: &TargetId, query: &QueryConfig) -> Self {
        let direction = match query.sort {
            None => "",
            Some(SortOrder::Asc) => " asc",
            Some(SortOrder::Desc) => " desc",
        };
        Self::new(format!(
            "filter @logStream like /{prefix}{target}/ and @message like /\"container_name\":\"{container}\"/ | fields {payload} | sort @timestamp{direction}",
            prefix = query.stream_prefix,
            target = target,
            container = query.container_name,
            payload = query.payload_field,
            direction = direction,
        ))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}
