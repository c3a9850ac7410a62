//! Configuration handling for the funnel

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the webhook endpoint
pub const WEBHOOK_URL_ENV: &str = "INTAKE_FUNNEL_WEBHOOK_URL";
/// Environment override for the lead capture file
pub const CAPTURE_PATH_ENV: &str = "INTAKE_FUNNEL_CAPTURE_PATH";

/// User configuration for the funnel
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FunnelConfig {
    /// Webhook notified with each submitted lead
    pub webhook_url: Option<String>,
    /// File that receives each lead as a JSON line
    pub capture_path: Option<PathBuf>,
    /// Directory for the log file
    pub log_dir: Option<PathBuf>,
}

impl FunnelConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "intake-funnel", "intake-funnel")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from the platform config path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FunnelConfig = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Save configuration to file
    #[cfg(test)]
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(WEBHOOK_URL_ENV) {
            self.webhook_url = Some(url);
        }
        if let Some(path) = lookup(CAPTURE_PATH_ENV) {
            self.capture_path = Some(PathBuf::from(path));
        }
        self.normalized()
    }

    /// Blank values count as unset
    fn normalized(mut self) -> Self {
        self.webhook_url = self
            .webhook_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self.capture_path = self
            .capture_path
            .filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Directory that receives the log file
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf()))
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FunnelConfig::default();
        assert!(config.webhook_url.is_none());
        assert!(config.capture_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FunnelConfig {
            webhook_url: Some("https://hooks.example/lead".to_string()),
            capture_path: Some(PathBuf::from("/tmp/leads.jsonl")),
            log_dir: None,
        };

        config.save_to(&path).unwrap();
        let loaded = FunnelConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FunnelConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, FunnelConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(FunnelConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"webhook_url": "https://hooks.example", "unknown_field": "value"}"#;
        let parsed: FunnelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.webhook_url.as_deref(), Some("https://hooks.example"));
    }

    #[test]
    fn test_blank_webhook_is_unset() {
        let config = FunnelConfig {
            webhook_url: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = FunnelConfig {
            webhook_url: Some("https://from-file.example".to_string()),
            ..Default::default()
        }
        .with_overrides(|key| match key {
            WEBHOOK_URL_ENV => Some("https://from-env.example".to_string()),
            CAPTURE_PATH_ENV => Some("leads.jsonl".to_string()),
            _ => None,
        });

        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://from-env.example")
        );
        assert_eq!(config.capture_path, Some(PathBuf::from("leads.jsonl")));
    }

    #[test]
    fn test_log_dir_prefers_configured() {
        let config = FunnelConfig {
            log_dir: Some(PathBuf::from("/var/log/funnel")),
            ..Default::default()
        };
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/funnel"));
    }
}
