use super::client::QueryClient;
use super::error::{CallError, FetchError, StatusError, SubmitError};
use super::filter::QueryFilter;
use super::types::{ContinuationToken, QueryHandle, QueryStatus, Record, ResultField, ResultPage};
use crate::config::Config;
use crate::window::TimeWindow;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// CloudWatch Logs Insights client that shells out to the `aws` CLI.
#[derive(Debug, Clone)]
pub struct AwsCliClient {
    program: PathBuf,
    log_group: String,
    region: Option<String>,
    profile: Option<String>,
    call_timeout: Duration,
}

impl AwsCliClient {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.aws.program.clone(),
            log_group: config.log_group.clone(),
            region: config.aws.region.clone(),
            profile: config.aws.profile.clone(),
            call_timeout: config.aws.call_timeout,
        }
    }

    fn submit_args(&self, window: &TimeWindow, filter: &QueryFilter) -> Vec<String> {
        vec![
            "logs".to_string(),
            "start-query".to_string(),
            "--log-group-name".to_string(),
            self.log_group.clone(),
            "--start-time".to_string(),
            window.start.to_string(),
            "--end-time".to_string(),
            window.end.to_string(),
            "--query-string".to_string(),
            filter.expression().to_string(),
            "--query".to_string(),
            "queryId".to_string(),
        ]
    }

    fn status_args(&self, handle: &QueryHandle) -> Vec<String> {
        vec![
            "logs".to_string(),
            "describe-queries".to_string(),
            "--log-group-name".to_string(),
            self.log_group.clone(),
            "--query".to_string(),
            format!("queries[?queryId=='{}']", handle),
        ]
    }

    fn page_args(&self, handle: &QueryHandle, token: Option<&ContinuationToken>) -> Vec<String> {
        let mut args = vec![
            "logs".to_string(),
            "get-query-results".to_string(),
            "--query-id".to_string(),
            handle.to_string(),
        ];
        if let Some(token) = token {
            args.push("--next-token".to_string());
            args.push(token.as_str().to_string());
        }
        args
    }

    /// Run one CLI call and return its stdout.
    async fn invoke(&self, args: Vec<String>) -> Result<Vec<u8>, CallError> {
        let mut command = Command::new(&self.program);
        command.args(&args).args(["--output", "json"]);
        if let Some(region) = &self.region {
            command.args(["--region", region.as_str()]);
        }
        if let Some(profile) = &self.profile {
            command.args(["--profile", profile.as_str()]);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(program = %self.program.display(), args = ?args, "Invoking CLI");

        let output = tokio::time::timeout(self.call_timeout, command.output())
            .await
            .map_err(|_| CallError::TimedOut(self.call_timeout))?
            .map_err(|source| CallError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CallError::Exited {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl QueryClient for AwsCliClient {
    async fn submit(
        &self,
        window: &TimeWindow,
        filter: &QueryFilter,
    ) -> Result<QueryHandle, SubmitError> {
        let stdout = self.invoke(self.submit_args(window, filter)).await?;
        Ok(parse_query_id(&stdout)?)
    }

    async fn check_status(&self, handle: &QueryHandle) -> Result<QueryStatus, StatusError> {
        let stdout = self.invoke(self.status_args(handle)).await?;
        Ok(parse_status(&stdout)?)
    }

    async fn fetch_page(
        &self,
        handle: &QueryHandle,
        token: Option<&ContinuationToken>,
    ) -> Result<ResultPage, FetchError> {
        let stdout = self.invoke(self.page_args(handle, token)).await?;
        Ok(parse_page(&stdout)?)
    }
}

// ===== Response Parsing =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribedQuery {
    #[serde(default)]
    status: Option<String>,
}

/// Rows are kept as raw JSON so one odd row cannot fail the whole page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResults {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    next_token: Option<String>,
}

/// `start-query --query queryId` prints the identifier as a JSON string.
fn parse_query_id(stdout: &[u8]) -> Result<QueryHandle, CallError> {
    let id: String = serde_json::from_slice(stdout)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(CallError::Malformed("empty query id".to_string()));
    }
    Ok(QueryHandle::new(id))
}

/// `describe-queries` filtered to a single id prints a list with zero or one entry.
fn parse_status(stdout: &[u8]) -> Result<QueryStatus, CallError> {
    let queries: Vec<DescribedQuery> = serde_json::from_slice(stdout)?;
    Ok(queries
        .first()
        .and_then(|q| q.status.as_deref())
        .map(QueryStatus::from_service)
        .unwrap_or(QueryStatus::Unknown))
}

fn parse_page(stdout: &[u8]) -> Result<ResultPage, CallError> {
    let response: QueryResults = serde_json::from_slice(stdout)?;
    Ok(ResultPage {
        records: response.results.iter().map(record_from_row).collect(),
        continuation: response
            .next_token
            .filter(|t| !t.is_empty())
            .map(ContinuationToken::new),
    })
}

/// A row is a list of `{"field": .., "value": ..}` objects. Entries without a
/// string field name and string value are dropped; a row that is not a list
/// becomes an empty record.
fn record_from_row(row: &serde_json::Value) -> Record {
    let fields = row
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let field = entry.get("field")?.as_str()?;
                    let value = entry.get("value")?.as_str()?;
                    Some(ResultField {
                        field: field.to_string(),
                        value: value.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    Record { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AwsCliClient {
        AwsCliClient::new(&Config::default())
    }

    #[test]
    fn test_client_takes_config_values() {
        let mut config = Config::default();
        config.log_group = "/custom/group".to_string();
        config.aws.call_timeout = Duration::from_secs(5);

        let client = AwsCliClient::new(&config);
        assert_eq!(client.log_group, "/custom/group");
        assert_eq!(client.call_timeout, Duration::from_secs(5));
        assert_eq!(client.program, PathBuf::from("aws"));
    }

    #[test]
    fn test_submit_args() {
        let window = TimeWindow { start: 100, end: 200 };
        let args = client().submit_args(&window, &QueryFilter::new("fields @message"));
        assert_eq!(
            args,
            vec![
                "logs",
                "start-query",
                "--log-group-name",
                "/aws/containerinsights/prod/application",
                "--start-time",
                "100",
                "--end-time",
                "200",
                "--query-string",
                "fields @message",
                "--query",
                "queryId",
            ]
        );
    }

    #[test]
    fn test_status_args_filter_by_id() {
        let args = client().status_args(&QueryHandle::new("q-1"));
        assert_eq!(args.last().map(String::as_str), Some("queries[?queryId=='q-1']"));
    }

    #[test]
    fn test_page_args_with_and_without_token() {
        let handle = QueryHandle::new("q-1");
        let first = client().page_args(&handle, None);
        assert_eq!(first, vec!["logs", "get-query-results", "--query-id", "q-1"]);

        let token = ContinuationToken::new("t1");
        let next = client().page_args(&handle, Some(&token));
        assert_eq!(&next[4..], ["--next-token", "t1"]);
    }

    #[test]
    fn test_parse_query_id() {
        assert_eq!(
            parse_query_id(b"\"abc-123\"\n").unwrap(),
            QueryHandle::new("abc-123")
        );
        assert!(matches!(parse_query_id(b""), Err(CallError::Json(_))));
        assert!(matches!(parse_query_id(b"\"\""), Err(CallError::Malformed(_))));
        assert!(parse_query_id(b"null").is_err());
    }

    #[test]
    fn test_parse_status() {
        let running = br#"[{"queryId":"q","status":"Running","logGroupName":"g"}]"#;
        assert_eq!(parse_status(running).unwrap(), QueryStatus::Running);
        assert_eq!(parse_status(b"[]").unwrap(), QueryStatus::Unknown);
        assert!(parse_status(b"not json").is_err());
    }

    #[test]
    fn test_parse_page() {
        let body = br#"{
            "results": [
                [{"field": "@message", "value": "{\"log\":\"L1\"}"}, {"field": "@ptr", "value": "p"}]
            ],
            "statistics": {"recordsMatched": 1.0},
            "status": "Complete",
            "nextToken": "abc"
        }"#;
        let page = parse_page(body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].get("@message"), Some("{\"log\":\"L1\"}"));
        assert_eq!(page.continuation, Some(ContinuationToken::new("abc")));
    }

    #[test]
    fn test_parse_page_without_token() {
        let page = parse_page(br#"{"results": [], "status": "Complete"}"#).unwrap();
        assert!(page.records.is_empty());
        assert!(page.continuation.is_none());

        let page = parse_page(br#"{"results": [], "nextToken": ""}"#).unwrap();
        assert!(page.continuation.is_none());
    }

    #[test]
    fn test_parse_page_tolerates_incomplete_entries() {
        let body = br#"{
            "results": [
                [{"field": "@message", "value": null}],
                [{"value": "no field name"}],
                "not a row",
                [{"field": "@ptr", "value": "p"}, {"field": "@message", "value": "{\"log\":\"ok\"}"}]
            ],
            "nextToken": "t2"
        }"#;
        let page = parse_page(body).unwrap();

        assert_eq!(page.records.len(), 4);
        assert_eq!(page.records[0].get("@message"), None);
        assert!(page.records[1].fields.is_empty());
        assert!(page.records[2].fields.is_empty());
        assert_eq!(page.records[3].get("@message"), Some("{\"log\":\"ok\"}"));
        assert_eq!(page.continuation, Some(ContinuationToken::new("t2")));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let mut config = Config::default();
        config.aws.program = PathBuf::from("/nonexistent/podlogs-test-aws");
        let client = AwsCliClient::new(&config);

        let result = client.check_status(&QueryHandle::new("q")).await;
        assert!(matches!(result, Err(StatusError(CallError::Spawn { .. }))));
    }
}
