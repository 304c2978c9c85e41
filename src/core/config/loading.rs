//! Locates and reads the TOML configuration file.

use super::builder::ConfigBuilder;
use super::file::ConfigFile;
use super::Config;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_NAME: &str = "email-vet.toml";

/// Candidate locations searched when no explicit path is given.
fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
    if let Ok(home) = std::env::var("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("email-vet")
                .join("config.toml"),
        );
    }
    paths
}

/// Parses a configuration file from disk.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
    })?;
    let file: ConfigFile = toml::from_str(&raw)?;
    Ok(file)
}

/// Resolves the configuration to use.
///
/// An explicit path must exist. Without one, the first default location that
/// exists is used; if none does, the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigBuilder> {
    let found = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => default_locations().into_iter().find(|p| p.is_file()),
    };

    match found {
        Some(path) => {
            tracing::info!(target: "config", "Loading configuration from {}", path.display());
            let file = read_config_file(&path)?;
            Ok(ConfigBuilder::new()
                .apply_file(&file)
                .loaded_config_path(Some(path.display().to_string())))
        }
        None => {
            tracing::debug!(target: "config", "No configuration file found, using defaults");
            Ok(ConfigBuilder::new())
        }
    }
}

/// Convenience wrapper returning a validated [`Config`].
pub fn load_and_build(explicit: Option<&Path>) -> Result<Config> {
    load_config(explicit)?.build()
}
