use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "microfeature";
const CONFIG_FILE: &str = "config.json";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "microfeature=info";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Bundle id prefix for workspaces that don't declare one.
    pub default_base_bundle_id: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty: true,
            default_base_bundle_id: None,
        }
    }
}

impl ToolConfig {
    /// Load configuration from the user's config directory.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"defaultBaseBundleId": "com.example"}"#).unwrap();

        let config = ToolConfig::load_from(&path).unwrap();
        assert_eq!(config.default_base_bundle_id.as_deref(), Some("com.example"));
        assert!(config.pretty);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_full_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"logFilter": "microfeature=debug", "pretty": false, "defaultBaseBundleId": "org.example"}"#,
        )
        .unwrap();

        let config = ToolConfig::load_from(&path).unwrap();
        assert_eq!(
            config,
            ToolConfig {
                log_filter: "microfeature=debug".into(),
                pretty: false,
                default_base_bundle_id: Some("org.example".into()),
            }
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let error = ToolConfig::load_from(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }
}
