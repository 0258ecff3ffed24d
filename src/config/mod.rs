pub mod generate;
pub mod parse;
pub mod types;

use std::path::{Path, PathBuf};

pub use parse::{load_config, parse_config, ConfigError};
pub use types::{AwsConfig, Config, QueryConfig, RetrievalConfig, SortOrder};

/// Expands tilde (~) in paths to the user's home directory.
/// Returns the path unchanged if it doesn't start with tilde or home directory cannot be determined.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    } else if path_str == "~" {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir;
        }
    }

    path.to_path_buf()
}

/// Per-user config location, `~/.config/podlogs/config.yml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/podlogs/config.yml"))
}

/// Resolves the config file path based on explicit argument or default locations.
/// Returns the first existing path from:
/// 1. Explicit path (if provided, with tilde expansion)
/// 2. ~/.config/podlogs/config.yml
/// 3. /etc/podlogs/config.yml
///
/// `None` means no file is present and the defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(path));
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    let system_config = PathBuf::from("/etc/podlogs/config.yml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Load the resolved config file, or fall back to the defaults when there is none.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            load_config(&path)
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expand_tilde_with_path() {
        let expanded = expand_tilde(Path::new("~/bin/aws"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("bin/aws"));
        }
    }

    #[test]
    fn test_expand_tilde_alone() {
        let expanded = expand_tilde(Path::new("~"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }

    #[test]
    fn test_expand_tilde_no_expansion() {
        assert_eq!(expand_tilde(Path::new("/usr/bin/aws")), Path::new("/usr/bin/aws"));
        assert_eq!(expand_tilde(Path::new("aws")), Path::new("aws"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let resolved = resolve_config_path(Some(Path::new("/tmp/podlogs.yml")));
        assert_eq!(resolved, Some(PathBuf::from("/tmp/podlogs.yml")));
    }
}
