//! Importer configuration loaded from YAML
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! a working configuration. Policy plugin descriptors listed here are appended
//! to the built-in catalog at startup.

use crate::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Root of the importer configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ImporterConfig {
    /// Remote fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Policy plugins known to this process
    #[serde(default)]
    pub policies: PoliciesConfig,
}

/// Settings for `http(s)://` sources
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("swagger-import/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PoliciesConfig {
    #[serde(default)]
    pub plugins: Vec<PolicyPluginDescriptor>,
}

/// A discovered policy plugin
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolicyPluginDescriptor {
    /// Plugin identifier (e.g., "mock", "json-validation")
    pub id: String,
    /// Human-readable name
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON Schema of the policy configuration, as JSON text
    #[serde(default)]
    pub schema: Option<String>,
    /// Phases the policy hooks into
    #[serde(default)]
    pub phases: Vec<PolicyPhase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPhase {
    OnRequest,
    OnResponse,
}

impl ImporterConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            ImportError::Config(msg) => ImportError::Config(format!("{:?}: {}", path, msg)),
            other => other,
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ImporterConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ImportError::Config(format!("Failed to parse config YAML: {}", e)))?;

        if let Some(plugin) = config.policies.plugins.iter().find(|p| p.id.trim().is_empty()) {
            return Err(ImportError::Config(format!(
                "Policy plugin '{}' has an empty id",
                plugin.name
            )));
        }

        Ok(config)
    }
}
