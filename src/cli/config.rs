use crate::config::generate::generate_starter_config;
use crate::config::user_config_path;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("config file already exists at {0}, remove it first or use --stdout")]
    AlreadyExists(PathBuf),

    #[error("could not determine home directory, use --stdout instead")]
    NoHomeDir,

    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),
}

/// Print the starter config, or write it to `~/.config/podlogs/config.yml`.
pub fn init(stdout: bool) -> Result<(), InitError> {
    let config_content = generate_starter_config();

    if stdout {
        print!("{}", config_content);
        return Ok(());
    }

    let config_path = user_config_path().ok_or(InitError::NoHomeDir)?;
    write_config(&config_path, &config_content)?;
    eprintln!("Config file written to {}", config_path.display());
    Ok(())
}

/// Write `content` to `path`, creating parent directories. Never overwrites.
pub fn write_config(path: &Path, content: &str) -> Result<(), InitError> {
    if path.exists() {
        return Err(InitError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;
    Ok(())
}
