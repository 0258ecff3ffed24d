//! Fetch application logs for one workload instance from CloudWatch Logs
//! Insights, splitting the requested period into bounded query windows.

pub mod cli;
pub mod config;
pub mod output;
pub mod query;
pub mod retrieval;
pub mod window;
