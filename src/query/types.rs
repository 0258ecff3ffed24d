use std::fmt;

/// Identifier the service hands out for a submitted query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryHandle(String);

impl QueryHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque cursor to the next page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Running,
    Complete,
    Failed,
    Cancelled,
    /// The service did not list the query among its known queries.
    Unknown,
}

impl QueryStatus {
    /// Map a CloudWatch Logs Insights status string.
    pub fn from_service(status: &str) -> Self {
        match status {
            "Scheduled" => QueryStatus::Pending,
            "Running" => QueryStatus::Running,
            "Complete" => QueryStatus::Complete,
            "Failed" | "Timeout" => QueryStatus::Failed,
            "Cancelled" => QueryStatus::Cancelled,
            _ => QueryStatus::Unknown,
        }
    }

    /// No further status change is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryStatus::Complete | QueryStatus::Failed | QueryStatus::Cancelled
        )
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryStatus::Pending => "pending",
            QueryStatus::Running => "running",
            QueryStatus::Complete => "complete",
            QueryStatus::Failed => "failed",
            QueryStatus::Cancelled => "cancelled",
            QueryStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultField {
    pub field: String,
    pub value: String,
}

/// One matched log event: the fields selected by the query, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<ResultField>,
}

impl Record {
    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(field, value)| ResultField {
                    field: field.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    /// Value of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == name)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub records: Vec<Record>,
    pub continuation: Option<ContinuationToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(QueryStatus::from_service("Scheduled"), QueryStatus::Pending);
        assert_eq!(QueryStatus::from_service("Running"), QueryStatus::Running);
        assert_eq!(QueryStatus::from_service("Complete"), QueryStatus::Complete);
        assert_eq!(QueryStatus::from_service("Failed"), QueryStatus::Failed);
        assert_eq!(QueryStatus::from_service("Timeout"), QueryStatus::Failed);
        assert_eq!(QueryStatus::from_service("Cancelled"), QueryStatus::Cancelled);
        assert_eq!(QueryStatus::from_service("Weird"), QueryStatus::Unknown);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(QueryStatus::Complete.is_terminal());
        assert!(QueryStatus::Failed.is_terminal());
        assert!(QueryStatus::Cancelled.is_terminal());
        assert!(!QueryStatus::Pending.is_terminal());
        assert!(!QueryStatus::Running.is_terminal());
        assert!(!QueryStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_record_lookup_takes_first_match() {
        let record = Record::from_pairs([("@message", "a"), ("@ptr", "p"), ("@message", "b")]);
        assert_eq!(record.get("@message"), Some("a"));
        assert_eq!(record.get("@ptr"), Some("p"));
        assert_eq!(record.get("@timestamp"), None);
    }
}
