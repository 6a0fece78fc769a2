//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory),
//! and expanding `~` in configured paths.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::{BaseDirs, ProjectDirs};
use log::{debug, info};
use thiserror::Error;

use astrodb::{AstroDbError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for AstroDbError {
    fn from(err: ConfigError) -> Self {
        AstroDbError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (astrodb/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, AstroDbError> {
    if let Some(path) = explicit_path {
        let path = expand_home(path.as_ref());
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("astrodb/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "astrodb", "astrodb") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, AstroDbError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

/// Replace a leading `~` with the home directory.
///
/// Paths without one, and all paths when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Pick the command-line path, else the configured one, for a record file.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when neither names the file.
pub fn resolve_path(
    given: Option<&str>,
    configured: Option<&Path>,
    what: &str,
) -> Result<PathBuf, ConfigError> {
    given
        .map(Path::new)
        .or(configured)
        .map(expand_home)
        .ok_or_else(|| {
            ConfigError::Validation(format!(
                "no {what} file given; pass --{what} or set files.{what} in the configuration"
            ))
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use astrodb::ReportMode;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[files]\nobjects = \"/data/objects.tsv\"\n\n[catalog]\ncheck_likely_duplicates = true\n\n[output]\nmode = \"meta-list\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(
            config.files().objects(),
            Some(Path::new("/data/objects.tsv"))
        );
        assert_eq!(config.files().programs(), None);
        assert!(config.catalog().check_likely_duplicates());
        assert_eq!(config.output().mode(), ReportMode::MetaList);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("/nonexistent/astrodb.toml")).unwrap_err();
        assert!(matches!(err, AstroDbError::Config(_)));
    }

    #[test]
    fn test_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nmode = \"sky-chart\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(
            expand_home(Path::new("/abs/objects.tsv")),
            PathBuf::from("/abs/objects.tsv")
        );
        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(
                expand_home(Path::new("~/astro/objects.tsv")),
                dirs.home_dir().join("astro/objects.tsv")
            );
        }
    }

    #[test]
    fn test_resolve_path_prefers_command_line() {
        let configured = Path::new("/configured/objects.tsv");
        assert_eq!(
            resolve_path(Some("given.tsv"), Some(configured), "objects").unwrap(),
            PathBuf::from("given.tsv")
        );
        assert_eq!(
            resolve_path(None, Some(configured), "objects").unwrap(),
            PathBuf::from("/configured/objects.tsv")
        );
        assert!(resolve_path(None, None, "objects").is_err());
    }
}
