use crate::config::{load_or_default, ConfigError};
use crate::output;
use crate::query::{AwsCliClient, InvalidTarget, QueryFilter, TargetId};
use crate::retrieval::{LineExtractor, Orchestrator, RetrievalPolicy};
use crate::window::{Period, TimeRange};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid target: {0}")]
    Target(#[from] InvalidTarget),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub target: String,
    pub period: Period,
    pub config_path: Option<PathBuf>,
}

/// Fetch the last `period` of logs for `target` and print them to stdout.
pub async fn run(args: &RunArgs) -> Result<(), RunError> {
    let target = TargetId::parse(&args.target)?;
    let config = load_or_default(args.config_path.as_deref())?;
    let policy = RetrievalPolicy::from_config(&config.retrieval)?;

    let filter = QueryFilter::for_target(&target, &config.query);
    let client = Arc::new(AwsCliClient::new(&config));
    let orchestrator = Orchestrator::new(client, policy, LineExtractor::from_config(&config.query));

    let range = TimeRange::ending_at(Utc::now().timestamp(), args.period.as_secs());
    info!(
        pod = %target,
        period = %args.period,
        log_group = %config.log_group,
        "Starting retrieval"
    );

    let report = orchestrator.run(range, &filter).await;
    output::write_stdout(&report.lines)?;

    Ok(())
}
