//! Courier configuration file.
//!
//! The file is TOML with two parts: the log filter and the access policy.
//!
//! ```toml
//! log_level = "info,courier=debug"
//!
//! [policy]
//! filter_by = "NoFilter"
//! admin_access = "All"
//! ignored_roles = ["kibana_user", "notifications_full_access", "notifications_read_access", "own_index"]
//! ```
//!
//! The file is located by `--config`, then `$COURIER_CONFIG`, then
//! `<config dir>/courier/config.toml`. A missing file yields the defaults.
//! Environment variables override individual values after loading.

use crate::error::{Error, Result};
use courier_acl::PolicySettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name used for the config directory and the environment prefix.
pub const PROJECT_NAME: &str = "courier";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "COURIER_CONFIG";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "COURIER_LOG_LEVEL";
/// Environment variable overriding `policy.filter_by`.
pub const FILTER_BY_ENV: &str = "COURIER_FILTER_BY";
/// Environment variable overriding `policy.admin_access`.
pub const ADMIN_ACCESS_ENV: &str = "COURIER_ADMIN_ACCESS";
/// Environment variable overriding `policy.ignored_roles` (comma separated).
pub const IGNORED_ROLES_ENV: &str = "COURIER_IGNORED_ROLES";

/// Log filter used when neither the file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info,courier=debug";

/// Top-level Courier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// `tracing-subscriber` filter directive.
    pub log_level: String,
    /// Access policy settings.
    pub policy: PolicySettings,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            policy: PolicySettings::default(),
        }
    }
}

impl CourierConfig {
    /// Load the config, applying environment overrides.
    ///
    /// A path that resolves but does not exist yields the defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::debug!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Where the config file lives: `explicit`, then `$COURIER_CONFIG`, then
    /// the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_path_with(explicit, std::env::var(CONFIG_PATH_ENV).ok())
    }

    /// `<config dir>/courier/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        if let Some(value) = lookup(FILTER_BY_ENV) {
            self.policy.filter_by = value
                .parse()
                .map_err(|e: String| Error::config(format!("{FILTER_BY_ENV}: {e}")))?;
        }
        if let Some(value) = lookup(ADMIN_ACCESS_ENV) {
            self.policy.admin_access = value
                .parse()
                .map_err(|e: String| Error::config(format!("{ADMIN_ACCESS_ENV}: {e}")))?;
        }
        if let Some(value) = lookup(IGNORED_ROLES_ENV) {
            self.policy.ignored_roles = value
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// The config as `COURIER_*` environment variable pairs.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        let ignored: Vec<&str> = self.policy.ignored_roles.iter().map(String::as_str).collect();
        vec![
            (LOG_LEVEL_ENV.to_string(), self.log_level.clone()),
            (FILTER_BY_ENV.to_string(), self.policy.filter_by.to_string()),
            (
                ADMIN_ACCESS_ENV.to_string(),
                self.policy.admin_access.to_string(),
            ),
            (IGNORED_ROLES_ENV.to_string(), ignored.join(",")),
        ]
    }
}

fn resolve_path_with(explicit: Option<&str>, from_env: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    CourierConfig::default_config_path()
}

// ============================================================================
// Tests
// ============================================================================
