use super::types::*;
use crate::config::expand_tilde;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationList(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Load, expand and validate a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml_string = fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read config file '{}': {}", path.display(), e),
        ))
    })?;

    let mut config = parse_config(&yaml_string).map_err(|e| match e {
        ConfigError::YamlParse(e) => ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("in file '{}': {}", path.display(), e),
        )),
        other => other,
    })?;

    config.aws.program = expand_tilde(&config.aws.program);

    validate_config(&config)?;

    Ok(config)
}

/// Parse a YAML document. A document without any keys (empty, or only
/// comments) yields the defaults.
pub fn parse_config(yaml: &str) -> Result<Config, ConfigError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if value.is_null() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_value(value)?)
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.log_group.trim().is_empty() {
        errors.push("log_group cannot be empty".to_string());
    }

    validate_aws(&config.aws, &mut errors);
    validate_query(&config.query, &mut errors);
    validate_retrieval(&config.retrieval, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationList(errors))
    }
}

fn validate_aws(aws: &AwsConfig, errors: &mut Vec<String>) {
    if aws.program.as_os_str().is_empty() {
        errors.push("aws.program cannot be empty".to_string());
    }
    if aws.call_timeout.is_zero() {
        errors.push("aws.call_timeout must be greater than zero".to_string());
    }
    if matches!(&aws.region, Some(r) if r.trim().is_empty()) {
        errors.push("aws.region cannot be empty when set".to_string());
    }
    if matches!(&aws.profile, Some(p) if p.trim().is_empty()) {
        errors.push("aws.profile cannot be empty when set".to_string());
    }
}

fn validate_query(query: &QueryConfig, errors: &mut Vec<String>) {
    // Both values end up inside /.../ regex literals of the query string
    for (name, value) in [
        ("query.stream_prefix", &query.stream_prefix),
        ("query.container_name", &query.container_name),
    ] {
        if value.contains('/') {
            errors.push(format!("{}: '/' is not allowed, got '{}'", name, value));
        }
    }
    if query.container_name.is_empty() {
        errors.push("query.container_name cannot be empty".to_string());
    }
    if query.payload_field.is_empty() {
        errors.push("query.payload_field cannot be empty".to_string());
    }
    if query.line_field.is_empty() {
        errors.push("query.line_field cannot be empty".to_string());
    }
}

fn validate_retrieval(retrieval: &RetrievalConfig, errors: &mut Vec<String>) {
    let chunk = retrieval.chunk_size;
    if chunk < Duration::from_secs(1) {
        errors.push(format!(
            "retrieval.chunk_size must be at least 1s, got {}",
            humantime_serde::re::humantime::format_duration(chunk)
        ));
    } else if chunk.subsec_nanos() != 0 {
        errors.push(format!(
            "retrieval.chunk_size must be a whole number of seconds, got {}",
            humantime_serde::re::humantime::format_duration(chunk)
        ));
    }
    if retrieval.max_poll_attempts == 0 {
        errors.push("retrieval.max_poll_attempts must be at least 1".to_string());
    }
    if retrieval.max_poll_wait.is_zero() {
        errors.push("retrieval.max_poll_wait must be greater than zero".to_string());
    }
    if retrieval.max_concurrent_windows == 0 {
        errors.push("retrieval.max_concurrent_windows must be at least 1".to_string());
    }
}
