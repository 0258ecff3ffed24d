use super::paginator::{drain, LineExtractor};
use super::poller::{await_completion, PollTimeout};
use super::RetrievalPolicy;
use crate::query::{FetchError, QueryClient, QueryFilter, QueryHandle, QueryStatus, SubmitError};
use crate::window::{plan, TimeRange, TimeWindow};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum WindowOutcome {
    /// The query could not be started; the window contributed nothing.
    SubmitFailed(SubmitError),
    Queried {
        query: QueryHandle,
        completion: Result<QueryStatus, PollTimeout>,
        pages: usize,
        skipped: usize,
        fetch_error: Option<FetchError>,
    },
}

#[derive(Debug)]
pub struct WindowReport {
    pub window: TimeWindow,
    pub lines: usize,
    pub outcome: WindowOutcome,
}

impl WindowReport {
    /// Submitted, completed, and fully drained.
    pub fn is_clean(&self) -> bool {
        matches!(
            &self.outcome,
            WindowOutcome::Queried {
                completion: Ok(QueryStatus::Complete),
                fetch_error: None,
                ..
            }
        )
    }
}

/// Result of one run: all lines in window order, plus what happened per window.
#[derive(Debug, Default)]
pub struct RetrievalReport {
    pub lines: Vec<String>,
    pub windows: Vec<WindowReport>,
}

impl RetrievalReport {
    pub fn problem_windows(&self) -> impl Iterator<Item = &WindowReport> {
        self.windows.iter().filter(|w| !w.is_clean())
    }
}

/// Drives submit, poll and drain for every window of a time range.
pub struct Orchestrator {
    client: Arc<dyn QueryClient>,
    policy: RetrievalPolicy,
    extractor: LineExtractor,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn QueryClient>, policy: RetrievalPolicy, extractor: LineExtractor) -> Self {
        Self {
            client,
            policy,
            extractor,
        }
    }

    /// Query every window of `range`. Never fails as a whole: a window that
    /// cannot be submitted contributes no lines, and every later window is
    /// still processed. Lines keep window order regardless of concurrency.
    pub async fn run(&self, range: TimeRange, filter: &QueryFilter) -> RetrievalReport {
        let windows = plan(range, self.policy.chunk_size);
        info!(
            start = range.start(),
            end = range.end(),
            windows = windows.len(),
            concurrency = self.policy.max_concurrent_windows.get(),
            "Retrieving logs"
        );

        let results: Vec<(WindowReport, Vec<String>)> = stream::iter(windows)
            .map(|window| self.process_window(window, filter))
            .buffered(self.policy.max_concurrent_windows.get())
            .collect()
            .await;

        let mut report = RetrievalReport::default();
        for (window_report, lines) in results {
            report.lines.extend(lines);
            report.windows.push(window_report);
        }

        info!(
            lines = report.lines.len(),
            problem_windows = report.problem_windows().count(),
            "Retrieval finished"
        );
        report
    }

    async fn process_window(&self, window: TimeWindow, filter: &QueryFilter) -> (WindowReport, Vec<String>) {
        let client = self.client.as_ref();

        let query = match client.submit(&window, filter).await {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    window_start = window.start,
                    window_end = window.end,
                    error = %e,
                    "Skipping window"
                );
                let report = WindowReport {
                    window,
                    lines: 0,
                    outcome: WindowOutcome::SubmitFailed(e),
                };
                return (report, Vec::new());
            }
        };
        debug!(window = %window, query_id = %query, "Query started");

        let completion = await_completion(client, &query, &self.policy.poll).await;
        match &completion {
            Ok(QueryStatus::Complete) => {}
            Ok(status) => warn!(
                window = %window,
                query_id = %query,
                status = %status,
                "Query ended without completing, reading available results"
            ),
            Err(timeout) => warn!(
                window = %window,
                error = %timeout,
                "Reading available results"
            ),
        }

        let drained = drain(client, &query, &self.extractor).await;
        if let Some(e) = &drained.error {
            warn!(
                window = %window,
                query_id = %query,
                pages = drained.pages,
                error = %e,
                "Stopped reading results early"
            );
        }
        if drained.skipped > 0 {
            debug!(query_id = %query, skipped = drained.skipped, "Records without a log line");
        }
        debug!(
            window = %window,
            query_id = %query,
            pages = drained.pages,
            lines = drained.lines.len(),
            "Window drained"
        );

        let report = WindowReport {
            window,
            lines: drained.lines.len(),
            outcome: WindowOutcome::Queried {
                query,
                completion,
                pages: drained.pages,
                skipped: drained.skipped,
                fetch_error: drained.error,
            },
        };
        (report, drained.lines)
    }
}
